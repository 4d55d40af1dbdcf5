use super::{cat_dict, CAT_BLOB};
use crate::dict::{BinaryDictionary, DictError, DictHeader, NodeReader};
use crate::testutil::{sample_builder, utf16, DictBuilder};

#[test]
fn test_header_latest_with_bigrams() {
    let dict = sample_builder().build_dict();
    let h = dict.header();
    assert_eq!(h.version, 201);
    assert!(h.is_latest());
    assert!(h.has_bigrams());
    assert_eq!(dict.root_offset(), 2);
}

#[test]
fn test_header_latest_without_bigrams() {
    let dict = cat_dict();
    assert!(dict.header().is_latest());
    assert!(!dict.header().has_bigrams());
    assert_eq!(dict.root_offset(), 2);
}

#[test]
fn test_header_legacy() {
    let h = DictHeader {
        version: 150,
        bigram_flag: 1,
    };
    assert!(!h.is_latest());
    assert_eq!(h.root_offset(), 0);

    // A flag outside {0, 1} also means the blob predates the header.
    let h = DictHeader {
        version: 201,
        bigram_flag: 7,
    };
    assert!(!h.is_latest());
    assert!(!h.has_bigrams());
}

#[test]
fn test_builder_matches_hand_layout() {
    let built = DictBuilder::new().bigram_flag(0).word("cat", 200).build();
    assert_eq!(built, CAT_BLOB);
}

#[test]
fn test_read_entries() {
    let dict = cat_dict();
    let reader = dict.reader();
    let root: Vec<_> = reader
        .siblings(dict.root_offset())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(root.len(), 1);
    let c = root[0];
    assert_eq!(c.offset, 3);
    assert_eq!(c.ch, b'c' as u16);
    assert!(!c.terminal);
    assert_eq!(c.children, 7);
    assert_eq!(c.bigrams, None);

    let a = reader.siblings(c.children).unwrap().next().unwrap().unwrap();
    let t = reader.siblings(a.children).unwrap().next().unwrap().unwrap();
    assert_eq!(t.offset, 13);
    assert!(t.terminal);
    assert!(!t.has_children());
    assert_eq!(t.frequency, 200);
    assert_eq!(t.bigrams, Some(16));
    assert_eq!(reader.bigram_list(16).count(), 0);
}

#[test]
fn test_escaped_char() {
    let dict = DictBuilder::new().word("é", 10).word("ω", 20).build_dict();
    let reader = dict.reader();
    let chars: Vec<u16> = reader
        .siblings(dict.root_offset())
        .unwrap()
        .map(|e| e.unwrap().ch)
        .collect();
    // 'é' (0xE9) fits in one byte; 'ω' (0x3C9) is escaped.
    assert_eq!(chars, vec![0xE9, 0x3C9]);
    assert_eq!(dict.data()[dict.root_offset() + 5], 0xFF);
    assert!(dict.is_valid_word(&utf16("ω")).unwrap());
}

#[test]
fn test_bigram_links() {
    let builder = sample_builder();
    let dict = builder.build_dict();
    let the = dict.find_word(&utf16("the")).unwrap().unwrap();
    let links: Vec<_> = dict
        .reader()
        .bigram_list(the.bigrams.unwrap())
        .collect::<Result<_, _>>()
        .unwrap();
    let expected: Vec<_> = [("cat", 90), ("dog", 70), ("car", 90)]
        .iter()
        .map(|&(w, f)| (builder.entry_offset(w).unwrap(), f))
        .collect();
    let got: Vec<_> = links.iter().map(|l| (l.address, l.frequency)).collect();
    assert_eq!(got, expected);
}

#[test]
fn test_skip_bigrams_lands_on_next_sibling() {
    let dict = sample_builder().build_dict();
    let reader = dict.reader();
    // "an" carries two links; the sibling after it must still decode.
    let a = reader
        .siblings(dict.root_offset())
        .unwrap()
        .map(Result::unwrap)
        .find(|e| e.ch == b'a' as u16)
        .unwrap();
    let under_a: Vec<u16> = reader
        .siblings(a.children)
        .unwrap()
        .map(|e| e.unwrap().ch)
        .collect();
    assert_eq!(under_a, utf16("np"));
}

#[test]
fn test_truncated_blob_is_corrupt() {
    let dict = BinaryDictionary::from_bytes(CAT_BLOB[..15].to_vec()).unwrap();
    let err = dict.is_valid_word(&utf16("cat")).unwrap_err();
    assert!(matches!(err, DictError::Corrupt { offset: 15 }));
}

#[test]
fn test_child_address_past_end_is_corrupt() {
    let mut blob = CAT_BLOB.to_vec();
    blob[6] = 0x7F;
    let dict = BinaryDictionary::from_bytes(blob).unwrap();
    let err = dict.is_valid_word(&utf16("cat")).unwrap_err();
    assert!(matches!(err, DictError::Corrupt { offset: 0x7F }));
}

#[test]
fn test_truncated_bigram_link() {
    let data = [0x80, 0x00, 0x05];
    let reader = NodeReader::new(&data, true);
    let mut links = reader.bigram_list(0);
    assert!(matches!(
        links.next(),
        Some(Err(DictError::Corrupt { offset: 3 }))
    ));
    assert!(links.next().is_none());
}

#[test]
fn test_one_byte_blob_is_legacy() {
    let dict = BinaryDictionary::from_bytes(vec![201]).unwrap();
    assert!(!dict.header().is_latest());
    assert_eq!(dict.root_offset(), 0);
    // The lone byte is read as a root count with nothing behind it.
    assert!(matches!(
        dict.is_valid_word(&utf16("a")),
        Err(DictError::Corrupt { offset: 1 })
    ));
}
