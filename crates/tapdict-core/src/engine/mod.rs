//! Fuzzy word search, ranked collection, and bigram lookup over a
//! [`BinaryDictionary`].
//!
//! An [`Engine`] owns per-call scratch (word buffer, traversal stack) and
//! takes `&mut self` for searches, so one engine serves one caller at a time.
//! The dictionary itself is shared through an `Arc` and may back any number
//! of engines on any number of threads.

mod bigram;
mod collector;
mod input;
mod search;
#[cfg(test)]
mod tests;

pub use collector::{NextLetters, RankedWord, RankedWords};
pub use input::{InputCodes, InputError, CODE_SENTINEL};

use std::sync::Arc;

use crate::dict::{BinaryDictionary, DictError};
use crate::settings::Settings;

/// Score weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    /// Applied once per position matched on its typed (primary) code.
    pub typed_letter_multiplier: u32,
    /// Applied to words whose length equals the typed length, unless a skip
    /// position is being modeled.
    pub full_word_multiplier: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            typed_letter_multiplier: 2,
            full_word_multiplier: 2,
        }
    }
}

/// Dictionary characters the user may leave out of the typed input at no cost.
///
/// Models apostrophe-style letters ("cant" finding "can't"). Such a character
/// is stepped over without consuming input unless the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeInsertion {
    chars: Vec<u16>,
}

impl FreeInsertion {
    pub fn new(chars: impl IntoIterator<Item = u16>) -> Self {
        Self {
            chars: chars.into_iter().collect(),
        }
    }

    /// No free insertions at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn apostrophe() -> Self {
        Self::new([b'\'' as u16])
    }

    #[inline]
    pub fn contains(&self, c: u16) -> bool {
        self.chars.contains(&c)
    }
}

/// Output bounds of a suggestion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Word slot size; returned words have at most `max_word_length - 1` characters.
    pub max_word_length: usize,
    pub max_words: usize,
}

pub struct Engine {
    dict: Arc<BinaryDictionary>,
    scoring: Scoring,
    free_insertion: FreeInsertion,
    include_typed_word: bool,
    word: Vec<u16>,
    stack: Vec<search::Frame>,
}

impl Engine {
    pub fn new(dict: Arc<BinaryDictionary>, scoring: Scoring) -> Self {
        Self {
            dict,
            scoring,
            free_insertion: FreeInsertion::apostrophe(),
            include_typed_word: false,
            word: Vec::new(),
            stack: Vec::new(),
        }
    }

    pub fn from_settings(dict: Arc<BinaryDictionary>, settings: &Settings) -> Self {
        Self::new(dict, settings.scoring())
            .with_free_insertion(settings.free_insertion())
            .with_typed_word(settings.correction.include_typed_word)
    }

    pub fn with_free_insertion(mut self, policy: FreeInsertion) -> Self {
        self.free_insertion = policy;
        self
    }

    /// Whether a full-length match spelled exactly as typed is offered.
    /// Off by default: hosts usually show the typed word themselves.
    pub fn with_typed_word(mut self, include: bool) -> Self {
        self.include_typed_word = include;
        self
    }

    pub fn dictionary(&self) -> &Arc<BinaryDictionary> {
        &self.dict
    }

    pub fn scoring(&self) -> Scoring {
        self.scoring
    }

    pub fn is_valid_word(&self, word: &[u16]) -> Result<bool, DictError> {
        self.dict.is_valid_word(word)
    }
}
