use crate::domain::ColourPair;
use std::fmt;

/// The two `export` lines sourced by the shell prompt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShellExports {
    pub fg: u8,
    pub bg: u8,
}

impl ShellExports {
    /// Red on black for the superuser.
    pub const SUPERUSER: Self = Self { fg: 9, bg: 0 };

    /// White on black when anything goes wrong.
    pub const FALLBACK: Self = Self { fg: 37, bg: 0 };

    /// The prompt always draws on a black background; only the foreground
    /// of the selected pair is exported.
    pub fn from_pair(pair: &ColourPair) -> Self {
        Self {
            fg: pair.fg.id,
            bg: 0,
        }
    }
}

impl fmt::Display for ShellExports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "export SYSTEM_COLOUR_FG={}", self.fg)?;
        writeln!(f, "export SYSTEM_COLOUR_BG={}", self.bg)
    }
}

/// Wraps `text` in 256-colour SGR escapes for the given pair.
pub fn colourise(text: &str, pair: &ColourPair) -> String {
    format!(
        "\x1b[48;5;{bg}m\x1b[38;5;{fg}m{text}\x1b[0m",
        bg = pair.bg.id,
        fg = pair.fg.id
    )
}

/// Short hostname used as the colour seed: drops the domain, a parenthesised
/// suffix (macOS sharing names) and anything after the first `-`.
pub fn short_hostname(hostname: &str) -> &str {
    let name = hostname.split('.').next().unwrap_or_default();
    let name = name.split('(').next().unwrap_or_default();
    name.split('-').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColourEntry, Rgb};

    #[test]
    fn exports_render_as_two_lines() {
        let text = ShellExports { fg: 45, bg: 0 }.to_string();
        assert_eq!(
            text,
            "export SYSTEM_COLOUR_FG=45\nexport SYSTEM_COLOUR_BG=0\n"
        );
    }

    #[test]
    fn exports_keep_black_background() {
        let pair = ColourPair {
            fg: ColourEntry::new(33, "Blue", Rgb::new(0, 0, 255)),
            bg: ColourEntry::new(37, "White", Rgb::new(255, 255, 255)),
        };
        assert_eq!(ShellExports::from_pair(&pair), ShellExports { fg: 33, bg: 0 });
        assert_eq!(
            colourise("atlas", &pair),
            "\x1b[48;5;37m\x1b[38;5;33matlas\x1b[0m"
        );
    }

    #[test]
    fn short_hostname_strips_suffixes() {
        assert_eq!(short_hostname("atlas"), "atlas");
        assert_eq!(short_hostname("atlas.example.com"), "atlas");
        assert_eq!(short_hostname("Naggies-MacBook(2).local"), "Naggies");
        assert_eq!(short_hostname("web(3)"), "web");
        assert_eq!(short_hostname("db-primary-01"), "db");
        assert_eq!(short_hostname(""), "");
    }
}
