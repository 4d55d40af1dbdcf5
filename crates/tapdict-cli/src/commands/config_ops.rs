use std::fs;

use super::die;

pub fn settings_export() {
    print!("{}", tapdict_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        tapdict_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: scoring.typed_letter_multiplier={}, limits.max_words={}, limits.max_word_length={}, correction.missed_char_retry={}",
        s.scoring.typed_letter_multiplier,
        s.limits.max_words,
        s.limits.max_word_length,
        s.correction.missed_char_retry
    );
}

/// Install a custom settings file for the rest of this process.
pub fn load_settings(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        tapdict_core::settings::init_custom(content),
        "Error loading settings: {}"
    );
}
