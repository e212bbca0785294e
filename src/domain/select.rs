use crate::domain::{
    ColourEntry, ColourPair, ContrastError, Palette, best_contrast, contrasting_candidates,
};
use md5::{Digest, Md5};
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum SelectError {
    #[error("cannot select from an empty candidate list")]
    EmptyInput,
}

#[derive(Debug, Error, PartialEq)]
pub enum GetColoursError {
    #[error(transparent)]
    Contrast(#[from] ContrastError),

    #[error(transparent)]
    Select(#[from] SelectError),
}

/// Picks a candidate by `md5(seed) mod len`, reading the digest as a
/// big-endian integer. Other tools derive the same colour from the same
/// hostname, so the hash and the reduction must not change.
pub fn select_by_seed<'a, T>(candidates: &'a [T], seed: &str) -> Result<&'a T, SelectError> {
    if candidates.is_empty() {
        return Err(SelectError::EmptyInput);
    }

    let digest = Md5::digest(seed.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    let value = u128::from_be_bytes(bytes);
    // len fits in u128 and the remainder is below len.
    let index = (value % candidates.len() as u128) as usize;
    Ok(&candidates[index])
}

fn letters_only(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_alphabetic())
        .collect()
}

pub fn word_matches_colour(seed: &str, colour_name: &str) -> bool {
    let seed = letters_only(seed);
    let colour = letters_only(colour_name);
    colour.contains(&seed) || seed.contains(&colour)
}

pub fn get_colours(
    palette: &Palette,
    seed: &str,
    tiebreaker: &str,
) -> Result<ColourPair, GetColoursError> {
    let matching = palette
        .entries()
        .iter()
        .filter(|entry| word_matches_colour(seed, &entry.name))
        .collect::<Vec<_>>();

    // A hostname naming a colour family would otherwise always land on the
    // same shade.
    let mut seed = seed.to_string();
    if matching.len() > 1 {
        seed.push_str(tiebreaker);
    }

    let fg = if matching.is_empty() {
        select_by_seed(palette.entries(), &seed)?
    } else {
        *select_by_seed(&matching, &seed)?
    };

    let mut bg_candidates = contrasting_candidates(fg, palette)?;
    if bg_candidates.is_empty() {
        tracing::debug!(fg = fg.id, "no colour passes the contrast threshold");
        bg_candidates.extend(best_contrast(fg, palette)?);
    }
    let bg = *select_by_seed(&bg_candidates, &seed)?;

    // The palette is mostly light colours; swap half the time so light
    // foregrounds do not dominate.
    let orders: [(&ColourEntry, &ColourEntry); 2] = [(fg, bg), (bg, fg)];
    let (fg, bg) = *select_by_seed(&orders, &seed)?;
    Ok(ColourPair {
        fg: fg.clone(),
        bg: bg.clone(),
    })
}
