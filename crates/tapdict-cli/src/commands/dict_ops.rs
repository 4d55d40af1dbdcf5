use std::path::Path;

use serde::Serialize;
use tapdict_core::dict::{BinaryDictionary, DictError};

use super::die;

pub fn open(dict_file: &str) -> BinaryDictionary {
    die!(
        BinaryDictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    )
}

/// Whole-blob statistics gathered in one walk.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct DictStats {
    pub words: usize,
    pub max_word_length: usize,
    pub words_with_bigrams: usize,
    pub bigram_links: usize,
    pub dangling_links: usize,
}

pub fn stats(dict: &BinaryDictionary, max_len: usize) -> Result<DictStats, DictError> {
    let mut stats = DictStats::default();
    let mut suffixes = Vec::new();
    dict.for_each_word(max_len, |v| {
        stats.words += 1;
        stats.max_word_length = stats.max_word_length.max(v.word.len());
        if let Some(suffix) = v.bigrams {
            suffixes.push(suffix);
        }
    })?;
    if !dict.header().has_bigrams() {
        return Ok(stats);
    }
    let reader = dict.reader();
    for suffix in suffixes {
        let mut linked = false;
        for link in reader.bigram_list(suffix) {
            let link = link?;
            linked = true;
            stats.bigram_links += 1;
            if dict.word_at(link.address, max_len)?.is_none() {
                stats.dangling_links += 1;
            }
        }
        stats.words_with_bigrams += usize::from(linked);
    }
    Ok(stats)
}

pub fn info(dict_file: &str, json: bool) {
    let dict = open(dict_file);
    let header = dict.header();
    let stats = die!(stats(&dict, 255), "Error walking dictionary: {}");

    if json {
        #[derive(Serialize)]
        struct Info<'a> {
            file: &'a str,
            bytes: usize,
            version: u8,
            bigram_flag: u8,
            latest_format: bool,
            root_offset: usize,
            #[serde(flatten)]
            stats: DictStats,
        }
        let info = Info {
            file: dict_file,
            bytes: dict.len(),
            version: header.version,
            bigram_flag: header.bigram_flag,
            latest_format: header.is_latest(),
            root_offset: dict.root_offset(),
            stats,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&info).expect("JSON serialization failed")
        );
        return;
    }

    println!("Dictionary:   {dict_file}");
    println!("File size:    {:.1} KB", dict.len() as f64 / 1024.0);
    println!(
        "Header:       version={} bigram_flag={} ({})",
        header.version,
        header.bigram_flag,
        if header.is_latest() { "latest" } else { "legacy" }
    );
    println!("Root offset:  {}", dict.root_offset());
    println!("Words:        {}", stats.words);
    println!("Longest word: {}", stats.max_word_length);
    if header.has_bigrams() {
        println!(
            "Bigrams:      {} links from {} words ({} unresolved)",
            stats.bigram_links, stats.words_with_bigrams, stats.dangling_links
        );
    } else {
        println!("Bigrams:      (not supported)");
    }
}

pub fn check(dict_file: &str, words: &[String]) {
    let dict = open(dict_file);
    for word in words {
        let units: Vec<u16> = word.encode_utf16().collect();
        let valid = die!(dict.is_valid_word(&units), "Error reading dictionary: {}");
        println!("{word}\t{}", if valid { "valid" } else { "not found" });
    }
}

#[derive(Debug, Serialize)]
struct DumpEntry {
    word: String,
    frequency: u8,
    offset: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bigrams: Vec<(String, u8)>,
    #[serde(skip)]
    suffix: Option<usize>,
}

pub fn dump(dict_file: &str, limit: Option<usize>, with_bigrams: bool, json: bool) {
    let dict = open(dict_file);
    let mut entries = Vec::new();
    die!(
        dict.for_each_word(255, |v| {
            if limit.map_or(true, |n| entries.len() < n) {
                entries.push(DumpEntry {
                    word: String::from_utf16_lossy(v.word),
                    frequency: v.frequency,
                    offset: v.offset,
                    bigrams: Vec::new(),
                    suffix: v.bigrams,
                });
            }
        }),
        "Error walking dictionary: {}"
    );

    if with_bigrams && dict.header().has_bigrams() {
        let reader = dict.reader();
        for entry in &mut entries {
            let Some(suffix) = entry.suffix else {
                continue;
            };
            for link in reader.bigram_list(suffix) {
                let link = die!(link, "Error reading bigrams: {}");
                let target = die!(
                    dict.word_at(link.address, 255),
                    "Error resolving bigram: {}"
                );
                let name = target.map_or_else(
                    || format!("@{}", link.address),
                    |w| String::from_utf16_lossy(&w),
                );
                entry.bigrams.push((name, link.frequency));
            }
        }
    }

    for entry in &entries {
        if json {
            let line = serde_json::to_string(entry).expect("JSON serialization failed");
            println!("{line}");
            continue;
        }
        print!("{}\t{}", entry.word, entry.frequency);
        for (succ, f) in &entry.bigrams {
            print!("\t{succ}:{f}");
        }
        println!();
    }
}
