use crate::domain::{ColourEntry, Palette};
use thiserror::Error;

/// WCAG AA threshold for normal text.
pub const CONTRAST_THRESHOLD: f64 = 4.5;

#[derive(Debug, Error, PartialEq)]
pub enum ContrastError {
    #[error("{channel} is out of valid range (0.0 - 1.0): {value}")]
    OutOfRange { channel: char, value: f64 },
}

fn linearise(v: f64) -> f64 {
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

pub fn relative_luminance(r: f64, g: f64, b: f64) -> f64 {
    0.2126 * linearise(r) + 0.7152 * linearise(g) + 0.0722 * linearise(b)
}

/// WCAG contrast ratio between two colours given as unit-range channels.
pub fn contrast_ratio(rgb1: [f64; 3], rgb2: [f64; 3]) -> Result<f64, ContrastError> {
    for rgb in [rgb1, rgb2] {
        for (channel, value) in ['r', 'g', 'b'].into_iter().zip(rgb) {
            if !(0.0..=1.0).contains(&value) {
                return Err(ContrastError::OutOfRange { channel, value });
            }
        }
    }

    let l1 = relative_luminance(rgb1[0], rgb1[1], rgb1[2]);
    let l2 = relative_luminance(rgb2[0], rgb2[1], rgb2[2]);
    let (hi, lo) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    Ok((hi + 0.05) / (lo + 0.05))
}

pub fn contrasting_candidates<'a>(
    subject: &ColourEntry,
    palette: &'a Palette,
) -> Result<Vec<&'a ColourEntry>, ContrastError> {
    let mut selected = Vec::new();
    for candidate in palette.entries() {
        if contrast_ratio(subject.rgb.unit(), candidate.rgb.unit())? >= CONTRAST_THRESHOLD {
            selected.push(candidate);
        }
    }
    Ok(selected)
}

/// Palette entry with the highest contrast against `subject`; earliest wins ties.
pub fn best_contrast<'a>(
    subject: &ColourEntry,
    palette: &'a Palette,
) -> Result<Option<&'a ColourEntry>, ContrastError> {
    let mut best: Option<(&ColourEntry, f64)> = None;
    for candidate in palette.entries() {
        let ratio = contrast_ratio(subject.rgb.unit(), candidate.rgb.unit())?;
        if best.is_none_or(|(_, current)| ratio > current) {
            best = Some((candidate, ratio));
        }
    }
    Ok(best.map(|(entry, _)| entry))
}
