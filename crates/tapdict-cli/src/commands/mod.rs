pub mod config_ops;
pub mod dict_ops;
pub mod predict_ops;

use serde::Serialize;
use tapdict_core::engine::RankedWord;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}
pub(crate) use die;

/// JSON shape of a ranked word.
#[derive(Debug, Serialize)]
pub struct WordOut {
    pub word: String,
    pub score: u32,
}

impl From<&RankedWord> for WordOut {
    fn from(w: &RankedWord) -> Self {
        Self {
            word: w.text(),
            score: w.score,
        }
    }
}

pub(crate) fn print_words(words: &[RankedWord], json: bool) {
    if json {
        let out: Vec<WordOut> = words.iter().map(WordOut::from).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&out).expect("JSON serialization failed")
        );
        return;
    }
    if words.is_empty() {
        println!("(no words)");
        return;
    }
    for (i, w) in words.iter().enumerate() {
        println!("{:>3}  {:<24} {}", i + 1, w.text(), w.score);
    }
}
