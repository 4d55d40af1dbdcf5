use std::sync::Arc;

use tapdict_core::dict::BinaryDictionary;
use tapdict_core::engine::{Engine, InputCodes, Limits, RankedWord};
use tapdict_core::predictor::{KeyPresses, PredictError, Predictor};
use tapdict_core::settings::settings;

use super::{die, dict_ops, print_words};
use crate::keys::parse_keys;

fn keys_or_die(keys: &[String]) -> KeyPresses {
    die!(parse_keys(keys), "Error: {}")
}

/// Words for the typed keys.
///
/// Without `skip` this is the host retrieval policy (plain pass, then the
/// missed-character retries). With `skip` a single pass runs at that depth.
pub fn run_suggest(
    dict: Arc<BinaryDictionary>,
    keys: &KeyPresses,
    skip: Option<usize>,
) -> Result<(Vec<RankedWord>, Vec<(char, u32)>), PredictError> {
    let Some(skip) = skip else {
        let mut predictor = Predictor::new(dict);
        let mut letters = predictor.next_letters();
        let words = predictor.words(keys, Some(&mut letters))?;
        let hist = letters
            .non_zero()
            .filter_map(|(c, n)| char::from_u32(c as u32).map(|c| (c, n)))
            .collect();
        return Ok((words, hist));
    };
    let s = settings();
    let input = InputCodes::from_positions(keys.positions(), s.limits.max_alternatives)?;
    let mut engine = Engine::from_settings(dict, s);
    let limits = Limits {
        max_word_length: s.limits.max_word_length,
        max_words: s.limits.max_words,
    };
    Ok((engine.suggest(&input, limits, Some(skip), None)?, Vec::new()))
}

pub fn suggest(dict_file: &str, keys: &[String], skip: Option<usize>, json: bool) {
    let keys = keys_or_die(keys);
    let dict = Arc::new(dict_ops::open(dict_file));
    let (words, letters) = die!(run_suggest(dict, &keys, skip), "Error: {}");
    print_words(&words, json);
    if !json && !letters.is_empty() {
        let line: Vec<String> = letters.iter().map(|(c, n)| format!("{c}:{n}")).collect();
        println!("next letters: {}", line.join(" "));
    }
}

pub fn bigrams(dict_file: &str, previous: &str, keys: &[String], json: bool) {
    let keys = keys_or_die(keys);
    let dict = Arc::new(dict_ops::open(dict_file));
    let predictor = Predictor::new(dict);
    let words = die!(predictor.bigrams(&keys, previous), "Error: {}");
    print_words(&words, json);
}
