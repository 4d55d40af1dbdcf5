use clap::{Parser, Subcommand};

use tapdict_cli::commands::{config_ops, dict_ops, predict_ops};

#[derive(Parser)]
#[command(name = "dicttool", about = "Keyboard dictionary inspection tool")]
struct Cli {
    /// Custom settings TOML applied before the command runs
    #[arg(long, global = true)]
    settings: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show header, word count and bigram statistics
    Info {
        /// Dictionary file
        dict_file: String,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether words are in the dictionary (exact, case-sensitive)
    Check {
        /// Dictionary file
        dict_file: String,
        /// Words to check
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Rank suggestions for typed keys
    Suggest {
        /// Dictionary file
        dict_file: String,
        /// One argument per key position: typed letter, then alternates
        #[arg(required = true)]
        keys: Vec<String>,
        /// Word depth whose letter the user missed
        #[arg(long)]
        skip: Option<usize>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank successors of a word, filtered by the first typed key
    Bigrams {
        /// Dictionary file
        dict_file: String,
        /// Previous word
        previous: String,
        /// Key positions; only the first filters
        #[arg(required = true)]
        keys: Vec<String>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// List every word with its frequency
    Dump {
        /// Dictionary file
        dict_file: String,
        /// Stop after this many words
        #[arg(short, long)]
        limit: Option<usize>,
        /// Resolve and print each word's bigram successors
        #[arg(long)]
        bigrams: bool,
        /// Print JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Some(file) = cli.settings.as_deref() {
        config_ops::load_settings(file);
    }

    match cli.command {
        Command::Info { dict_file, json } => dict_ops::info(&dict_file, json),
        Command::Check { dict_file, words } => dict_ops::check(&dict_file, &words),
        Command::Suggest {
            dict_file,
            keys,
            skip,
            json,
        } => predict_ops::suggest(&dict_file, &keys, skip, json),
        Command::Bigrams {
            dict_file,
            previous,
            keys,
            json,
        } => predict_ops::bigrams(&dict_file, &previous, &keys, json),
        Command::Dump {
            dict_file,
            limit,
            bigrams,
            json,
        } => dict_ops::dump(&dict_file, limit, bigrams, json),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
