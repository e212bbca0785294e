use crate::domain::{ColourEntry, Palette, Rgb};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolvePalettePathError {
    #[error("home directory not found")]
    HomeDirNotFound,
}

#[derive(Debug, Error)]
pub enum LoadPaletteError {
    #[error("failed to read colour map: {0}")]
    Read(#[from] io::Error),

    #[error("failed to parse colour map: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn resolve_palette_path() -> Result<PathBuf, ResolvePalettePathError> {
    if let Some(override_path) = std::env::var_os("SYSTEM_COLOUR_PALETTE") {
        return expand_home(PathBuf::from(override_path));
    }

    let Some(home) = dirs::home_dir() else {
        return Err(ResolvePalettePathError::HomeDirNotFound);
    };

    Ok(home.join(".share").join("256-terminal-colour-map.json"))
}

/// Replaces a leading `~` component with the home directory.
fn expand_home(path: PathBuf) -> Result<PathBuf, ResolvePalettePathError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path);
    };
    let Some(home) = dirs::home_dir() else {
        return Err(ResolvePalettePathError::HomeDirNotFound);
    };
    Ok(home.join(rest))
}

/// Reads a colour map (a JSON array of `{colorId, name, rgb}` objects).
pub fn load_palette(path: &Path) -> Result<Palette, LoadPaletteError> {
    let raw = fs::read_to_string(path)?;
    let entries: Vec<ColourEntry> = serde_json::from_str(&raw)?;
    Ok(Palette::new(entries))
}

/// Loads the colour map at `path`, or the built-in palette if it is missing
/// or unreadable.
pub fn load_palette_or_fallback(path: Option<&Path>) -> Palette {
    let Some(path) = path else {
        return fallback_palette();
    };

    match load_palette(path) {
        Ok(palette) => {
            if palette.is_empty() {
                tracing::warn!(path = %path.display(), "colour map has no usable colours");
            } else {
                tracing::debug!(
                    path = %path.display(),
                    colours = palette.len(),
                    "loaded colour map"
                );
            }
            palette
        }
        Err(LoadPaletteError::Read(error)) if error.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no colour map, using built-in palette");
            fallback_palette()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), "{error}; using built-in palette");
            fallback_palette()
        }
    }
}

pub fn fallback_palette() -> Palette {
    Palette::new(vec![
        ColourEntry::new(33, "Blue", Rgb::new(0, 0, 255)),
        ColourEntry::new(37, "White", Rgb::new(255, 255, 255)),
        ColourEntry::new(32, "Green", Rgb::new(0, 128, 0)),
        ColourEntry::new(36, "Cyan", Rgb::new(0, 255, 255)),
        ColourEntry::new(35, "Purple", Rgb::new(128, 0, 128)),
        ColourEntry::new(34, "Blue", Rgb::new(0, 0, 255)),
        ColourEntry::new(31, "Red", Rgb::new(255, 0, 0)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const COLOUR_MAP: &str = r##"[
        {"colorId": 9, "hexString": "#ff0000", "rgb": {"r": 255, "g": 0, "b": 0}, "name": "Red"},
        {"colorId": 16, "hexString": "#000000", "rgb": {"r": 0, "g": 0, "b": 0}, "name": "Grey0"},
        {"colorId": 231, "hexString": "#ffffff", "rgb": {"r": 255, "g": 255, "b": 255}, "name": "Grey100"},
        {"colorId": 196, "hexString": "#ff0000", "rgb": {"r": 255, "g": 0, "b": 0}, "name": "Red1"}
    ]"##;

    #[test]
    fn loads_colour_map_and_filters_reserved() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("map.json");
        fs::write(&path, COLOUR_MAP).expect("write");

        let palette = load_palette(&path).expect("load");
        let ids = palette.entries().iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![16, 231]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempdir().expect("tempdir");
        let error = load_palette(&dir.path().join("missing.json")).expect_err("missing");
        assert!(matches!(error, LoadPaletteError::Read(_)));
    }

    #[test]
    fn malformed_map_is_a_parse_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("map.json");
        let raw = r#"[{"colorId": 300, "name": "Nope", "rgb": {"r": 0, "g": 0, "b": 0}}]"#;
        fs::write(&path, raw).expect("write");
        let error = load_palette(&path).expect_err("out of range id");
        assert!(matches!(error, LoadPaletteError::Parse(_)));
    }

    #[test]
    fn falls_back_on_missing_or_broken_map() {
        let dir = tempdir().expect("tempdir");
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").expect("write");

        assert_eq!(load_palette_or_fallback(Some(&broken)), fallback_palette());
        assert_eq!(
            load_palette_or_fallback(Some(&dir.path().join("missing.json"))),
            fallback_palette()
        );
        assert_eq!(load_palette_or_fallback(None), fallback_palette());
    }

    #[test]
    fn expands_leading_tilde_only() {
        let home = dirs::home_dir().expect("home");
        assert_eq!(
            expand_home(PathBuf::from("~/maps/colours.json")).expect("expand"),
            home.join("maps/colours.json")
        );
        assert_eq!(expand_home(PathBuf::from("~")).expect("expand"), home);
        assert_eq!(
            expand_home(PathBuf::from("/etc/colours.json")).expect("absolute"),
            PathBuf::from("/etc/colours.json")
        );
        assert_eq!(
            expand_home(PathBuf::from("~alice/colours.json")).expect("other user"),
            PathBuf::from("~alice/colours.json")
        );
    }

    #[test]
    fn fallback_palette_has_seven_colours() {
        let palette = fallback_palette();
        assert_eq!(palette.len(), 7);
        assert_eq!(palette.get(37).map(|e| e.name.as_str()), Some("White"));
    }
}
