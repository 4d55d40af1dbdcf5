mod bigram;

use std::sync::Arc;

use super::{Engine, InputCodes, Limits, RankedWord, Scoring};
use crate::dict::BinaryDictionary;
use crate::testutil::{sample_dict, typed};

pub(super) const LIMITS: Limits = Limits {
    max_word_length: 48,
    max_words: 18,
};

pub(super) fn engine_for(dict: BinaryDictionary) -> Engine {
    Engine::new(Arc::new(dict), Scoring::default())
}

pub(super) fn sample_engine() -> Engine {
    engine_for(sample_dict())
}

/// One position per character, primary code only.
pub(super) fn input(s: &str) -> InputCodes {
    InputCodes::from_positions(&typed(s), 16).unwrap()
}

/// One position per string; each string's characters are that position's
/// alternates, primary first.
pub(super) fn keys(positions: &[&str]) -> InputCodes {
    let rows: Vec<Vec<u16>> = positions.iter().map(|p| p.encode_utf16().collect()).collect();
    InputCodes::from_positions(&rows, 16).unwrap()
}

pub(super) fn scored(words: &[RankedWord]) -> Vec<(String, u32)> {
    words.iter().map(|w| (w.text(), w.score)).collect()
}

pub(super) fn texts(words: &[RankedWord]) -> Vec<String> {
    words.iter().map(RankedWord::text).collect()
}
