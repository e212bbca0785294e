use serde::Deserialize;

// Strong reds, reserved for the superuser prompt.
pub const RESERVED_COLOUR_IDS: [u8; 5] = [160, 196, 9, 88, 124];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled into `[0, 1]`.
    pub fn unit(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct ColourEntry {
    #[serde(rename = "colorId")]
    pub id: u8,
    pub name: String,
    pub rgb: Rgb,
}

impl ColourEntry {
    pub fn new(id: u8, name: &str, rgb: Rgb) -> Self {
        Self {
            id,
            name: name.to_string(),
            rgb,
        }
    }
}

/// Colours available for selection, in load order, with the reserved ids
/// already removed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Palette {
    entries: Vec<ColourEntry>,
}

impl Palette {
    pub fn new(entries: Vec<ColourEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|entry| !RESERVED_COLOUR_IDS.contains(&entry.id))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ColourEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry carrying `id`.
    pub fn get(&self, id: u8) -> Option<&ColourEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColourPair {
    pub fg: ColourEntry,
    pub bg: ColourEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_drops_reserved_ids() {
        let palette = Palette::new(vec![
            ColourEntry::new(196, "Red1", Rgb::new(255, 0, 0)),
            ColourEntry::new(33, "Blue", Rgb::new(0, 0, 255)),
            ColourEntry::new(9, "Red", Rgb::new(255, 0, 0)),
            ColourEntry::new(88, "DarkRed", Rgb::new(135, 0, 0)),
        ]);

        let ids = palette.entries().iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![33]);
    }

    #[test]
    fn get_returns_first_match_for_duplicate_ids() {
        let palette = Palette::new(vec![
            ColourEntry::new(34, "Blue", Rgb::new(0, 0, 255)),
            ColourEntry::new(34, "Navy", Rgb::new(0, 0, 128)),
        ]);

        assert_eq!(palette.get(34).map(|e| e.name.as_str()), Some("Blue"));
        assert_eq!(palette.get(35), None);
    }

    #[test]
    fn parses_colour_map_entry_ignoring_extra_fields() {
        let raw = r##"{"colorId":33,"hexString":"#0087ff","rgb":{"r":0,"g":135,"b":255},"hsl":{"h":208,"s":100,"l":50},"name":"DodgerBlue1"}"##;
        let entry: ColourEntry = serde_json::from_str(raw).expect("parse");
        assert_eq!(entry, ColourEntry::new(33, "DodgerBlue1", Rgb::new(0, 135, 255)));
        assert_eq!(entry.rgb.hex(), "#0087ff");
    }
}
