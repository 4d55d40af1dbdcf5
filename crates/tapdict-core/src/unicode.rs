//! Case and accent folding for UTF-16 code units.

use unicode_normalization::UnicodeNormalization;

/// Characters at or above this code point are never folded.
const FOLDED_RANGE_END: u16 = 0x0500;

/// Fold a dictionary character to the form keyboards report for it.
///
/// Accented Latin, Greek and Cyrillic letters collapse to their base letter
/// (`É` → `e`), then the result is lower-cased. Only characters below U+0500
/// fold; every other script is compared as spelled.
pub fn to_lower(c: u16) -> u16 {
    if c < 0x80 {
        return (c as u8).to_ascii_lowercase() as u16;
    }
    if c >= FOLDED_RANGE_END {
        return c;
    }
    let Some(ch) = char::from_u32(c as u32) else {
        return c;
    };
    let base = base_char(ch);
    let mut lower = base.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) if (l as u32) < FOLDED_RANGE_END as u32 => l as u32 as u16,
        _ if (base as u32) < FOLDED_RANGE_END as u32 => base as u32 as u16,
        _ => c,
    }
}

/// First scalar of the canonical decomposition, with combining marks dropped.
fn base_char(ch: char) -> char {
    match std::iter::once(ch).nfd().next() {
        Some(base) if !is_combining_mark(base) => base,
        _ => ch,
    }
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}
