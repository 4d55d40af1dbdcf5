//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::engine::{FreeInsertion, Scoring};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub scoring: ScoringSettings,
    pub limits: LimitSettings,
    pub correction: CorrectionSettings,
}

impl Settings {
    pub fn scoring(&self) -> Scoring {
        Scoring {
            typed_letter_multiplier: self.scoring.typed_letter_multiplier,
            full_word_multiplier: self.scoring.full_word_multiplier,
        }
    }

    pub fn free_insertion(&self) -> FreeInsertion {
        FreeInsertion::new(self.correction.free_insertion_parsed.iter().copied())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    pub typed_letter_multiplier: u32,
    pub full_word_multiplier: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitSettings {
    pub max_word_length: usize,
    pub max_alternatives: usize,
    pub max_words: usize,
    pub max_bigrams: usize,
    pub next_letters_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorrectionSettings {
    pub missed_char_retry: bool,
    pub missed_char_min_results: usize,
    #[serde(default)]
    pub include_typed_word: bool,
    #[serde(default)]
    free_insertion_chars: Vec<String>,
    /// Parsed `free_insertion_chars`, one UTF-16 code unit each.
    #[serde(skip)]
    free_insertion_parsed: Vec<u16>,
}

impl CorrectionSettings {
    pub fn free_insertion_chars(&self) -> &[u16] {
        &self.free_insertion_parsed
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    s.correction.free_insertion_parsed = parse_free_insertion(&s.correction.free_insertion_chars)?;
    Ok(s)
}

fn parse_free_insertion(raw: &[String]) -> Result<Vec<u16>, SettingsError> {
    raw.iter()
        .map(|s| {
            let mut units = s.encode_utf16();
            match (units.next(), units.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(SettingsError::InvalidValue {
                    field: "correction.free_insertion_chars".to_string(),
                    reason: format!("{s:?} must be a single UTF-16 code unit"),
                }),
            }
        })
        .collect()
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(scoring.typed_letter_multiplier);
    check_positive!(scoring.full_word_multiplier);

    check_positive!(limits.max_alternatives);
    check_positive!(limits.max_words);
    check_positive!(limits.max_bigrams);

    // One slot is reserved for the terminator the host boundary writes.
    if s.limits.max_word_length < 2 {
        return Err(SettingsError::InvalidValue {
            field: "limits.max_word_length".to_string(),
            reason: "must be at least 2".to_string(),
        });
    }

    Ok(())
}
