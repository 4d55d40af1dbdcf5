use super::{engine_for, input, keys, sample_engine, scored, texts};
use crate::dict::BinaryDictionary;
use crate::engine::RankedWords;
use crate::testutil::{sample_builder, utf16, DictBuilder};

#[test]
fn test_successors_filtered_by_first_key() {
    let engine = sample_engine();
    let words = engine.bigrams(&utf16("an"), &input("a"), 48, 60).unwrap();
    assert_eq!(
        scored(&words),
        vec![("apple".to_string(), 50), ("ant".to_string(), 20)]
    );
}

#[test]
fn test_first_key_alternates() {
    let engine = sample_engine();
    let words = engine.bigrams(&utf16("the"), &input("c"), 48, 60).unwrap();
    assert_eq!(texts(&words), vec!["cat", "car"]);

    let words = engine.bigrams(&utf16("the"), &keys(&["cd"]), 48, 60).unwrap();
    assert_eq!(
        scored(&words),
        vec![
            ("cat".to_string(), 90),
            ("car".to_string(), 90),
            ("dog".to_string(), 70),
        ]
    );
}

#[test]
fn test_only_first_position_filters() {
    let engine = sample_engine();
    let words = engine
        .bigrams(&utf16("the"), &keys(&["d", "x", "y"]), 48, 60)
        .unwrap();
    assert_eq!(texts(&words), vec!["dog"]);
}

#[test]
fn test_no_successors() {
    let engine = sample_engine();
    // A word without links, a prefix that is not a word, an unknown word.
    for previous in ["cat", "th", "zebra", ""] {
        let words = engine.bigrams(&utf16(previous), &input("c"), 48, 60).unwrap();
        assert!(words.is_empty(), "{previous}");
    }
}

#[test]
fn test_examined_links_bounded_by_capacity() {
    let engine = sample_engine();
    let mut out = RankedWords::new(1);
    // The first link ("cat") is examined and filtered; "dog" is never reached.
    let examined = engine
        .collect_bigrams(&mut out, &utf16("the"), &input("d"), 48)
        .unwrap();
    assert_eq!(examined, 1);
    assert!(out.is_empty());

    let mut out = RankedWords::new(60);
    let examined = engine
        .collect_bigrams(&mut out, &utf16("the"), &input("d"), 48)
        .unwrap();
    assert_eq!(examined, 3);
    assert_eq!(texts(out.as_slice()), vec!["dog"]);
}

#[test]
fn test_link_to_inner_entry_skipped() {
    let builder = DictBuilder::new()
        .word("an", 100)
        .word("cat", 100)
        .word("car", 90)
        .bigram("an", "cat", 40)
        .bigram("an", "car", 30);
    let mut blob = builder.build();
    let dict = builder.build_dict();
    let suffix = dict.find_word(&utf16("an")).unwrap().unwrap().bigrams.unwrap();
    // Point the first link at the entry for "ca", which ends no word.
    let ca = builder.entry_offset("ca").unwrap();
    blob[suffix] = 0x80 | ((ca >> 16) as u8 & 0x3F);
    blob[suffix + 1] = (ca >> 8) as u8;
    blob[suffix + 2] = ca as u8;

    let engine = engine_for(BinaryDictionary::from_bytes(blob).unwrap());
    let words = engine.bigrams(&utf16("an"), &input("c"), 48, 60).unwrap();
    assert_eq!(scored(&words), vec![("car".to_string(), 30)]);
}

#[test]
fn test_target_longer_than_word_slot() {
    let engine = sample_engine();
    let words = engine.bigrams(&utf16("an"), &input("a"), 5, 60).unwrap();
    assert_eq!(texts(&words), vec!["ant"]);
}

#[test]
fn test_bigrams_disabled_by_flag() {
    let engine = engine_for(sample_builder().bigram_flag(0).build_dict());
    let words = engine.bigrams(&utf16("an"), &input("a"), 48, 60).unwrap();
    assert!(words.is_empty());
}

#[test]
fn test_legacy_format_has_no_bigrams() {
    let dict = DictBuilder::new()
        .version(3)
        .word("an", 100)
        .word("apple", 100)
        .bigram("an", "apple", 50)
        .build_dict();
    let engine = engine_for(dict);
    let words = engine.bigrams(&utf16("an"), &input("a"), 48, 60).unwrap();
    assert!(words.is_empty());
}

#[test]
fn test_escaped_successor() {
    let dict = DictBuilder::new()
        .word("ab", 10)
        .word("ωx", 20)
        .word("ωy", 30)
        .bigram("ab", "ωy", 40)
        .bigram("ab", "ωx", 60)
        .build_dict();
    let engine = engine_for(dict);
    let words = engine.bigrams(&utf16("ab"), &input("ω"), 48, 60).unwrap();
    assert_eq!(
        scored(&words),
        vec![("ωx".to_string(), 60), ("ωy".to_string(), 40)]
    );
}
