//! Word retrieval policy for a keyboard host.
//!
//! Wraps an [`Engine`] with the configured limits and the missed-character
//! fallback: when a plain search finds too few words, each typed position is
//! in turn treated as a keystroke the dictionary word lacks.

use std::sync::Arc;

use tracing::debug;

use crate::dict::{BinaryDictionary, DictError};
use crate::engine::{Engine, InputCodes, InputError, NextLetters, RankedWord, RankedWords};
use crate::settings::{CorrectionSettings, LimitSettings, Settings};

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Dict(#[from] DictError),
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Key presses of the word being typed, primary code first in each position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPresses {
    positions: Vec<Vec<u16>>,
}

impl KeyPresses {
    pub fn new() -> Self {
        Self::default()
    }

    /// One position per UTF-16 code unit, no alternates.
    pub fn from_typed(typed: &str) -> Self {
        Self {
            positions: typed.encode_utf16().map(|c| vec![c]).collect(),
        }
    }

    pub fn push(&mut self, primary: u16, alternates: &[u16]) {
        let mut codes = Vec::with_capacity(alternates.len() + 1);
        codes.push(primary);
        codes.extend_from_slice(alternates);
        self.positions.push(codes);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec<u16>] {
        &self.positions
    }
}

pub struct Predictor {
    engine: Engine,
    limits: LimitSettings,
    correction: CorrectionSettings,
}

impl Predictor {
    /// Predictor using the global [`settings`](crate::settings::settings).
    pub fn new(dict: Arc<BinaryDictionary>) -> Self {
        Self::with_settings(dict, crate::settings::settings())
    }

    pub fn with_settings(dict: Arc<BinaryDictionary>, settings: &Settings) -> Self {
        Self {
            engine: Engine::from_settings(dict, settings),
            limits: settings.limits.clone(),
            correction: settings.correction.clone(),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Histogram sized for [`words`](Self::words).
    pub fn next_letters(&self) -> NextLetters {
        NextLetters::new(self.limits.next_letters_size)
    }

    /// Ranked words for the typed keys.
    ///
    /// Inputs with no keys, or too long for a word slot, yield nothing.
    pub fn words(
        &mut self,
        keys: &KeyPresses,
        next_letters: Option<&mut NextLetters>,
    ) -> Result<Vec<RankedWord>, PredictError> {
        let max_word_length = self.limits.max_word_length;
        if keys.is_empty() || keys.len() > max_word_length - 1 {
            return Ok(Vec::new());
        }
        let input = InputCodes::from_positions(keys.positions(), self.limits.max_alternatives)?;
        let mut out = RankedWords::new(self.limits.max_words);
        self.engine
            .collect_suggestions(&mut out, &input, max_word_length, None, next_letters)?;

        if self.correction.missed_char_retry && out.len() < self.correction.missed_char_min_results
        {
            for skip in 0..input.len() {
                self.engine
                    .collect_suggestions(&mut out, &input, max_word_length, Some(skip), None)?;
                if !out.is_empty() {
                    debug!(skip, kept = out.len(), "missed-character retry matched");
                    break;
                }
            }
        }
        Ok(out.into_vec())
    }

    /// Ranked successors of `previous`, filtered by the first typed key.
    pub fn bigrams(
        &self,
        keys: &KeyPresses,
        previous: &str,
    ) -> Result<Vec<RankedWord>, PredictError> {
        let Some(first) = keys.positions().first() else {
            return Ok(Vec::new());
        };
        let input = InputCodes::from_positions(
            std::slice::from_ref(first),
            self.limits.max_alternatives,
        )?;
        let previous: Vec<u16> = previous.encode_utf16().collect();
        Ok(self.engine.bigrams(
            &previous,
            &input,
            self.limits.max_word_length,
            self.limits.max_bigrams,
        )?)
    }

    pub fn is_valid_word(&self, word: &str) -> Result<bool, PredictError> {
        let word: Vec<u16> = word.encode_utf16().collect();
        Ok(self.engine.is_valid_word(&word)?)
    }
}
