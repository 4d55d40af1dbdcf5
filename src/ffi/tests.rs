use super::*;
use std::ffi::{CStr, CString};
use std::io::Write;
use std::ptr;

use tapdict_core::testutil::{sample_builder, utf16, DictBuilder};

const MAX_WORD_LENGTH: i32 = 48;
const MAX_WORDS: i32 = 18;
const MAX_ALTERNATIVES: i32 = 16;

/// Flat code matrix: one row per string, its characters as alternates.
fn flat_codes(positions: &[&str]) -> Vec<i32> {
    let mut codes = vec![-1; positions.len() * MAX_ALTERNATIVES as usize];
    for (row, p) in codes
        .chunks_exact_mut(MAX_ALTERNATIVES as usize)
        .zip(positions)
    {
        for (slot, c) in row.iter_mut().zip(p.encode_utf16()) {
            *slot = c as i32;
        }
    }
    codes
}

struct Output {
    words: Vec<u16>,
    frequencies: Vec<i32>,
}

impl Output {
    fn new(count: i32) -> Self {
        Self {
            words: vec![0xAAAA; (count * MAX_WORD_LENGTH) as usize],
            frequencies: vec![-7; count as usize],
        }
    }

    fn word(&self, i: usize) -> String {
        let slot = &self.words[i * MAX_WORD_LENGTH as usize..][..MAX_WORD_LENGTH as usize];
        let len = slot.iter().position(|&c| c == 0).unwrap();
        String::from_utf16(&slot[..len]).unwrap()
    }

    fn words(&self, count: i32) -> Vec<(String, i32)> {
        (0..count as usize)
            .map(|i| (self.word(i), self.frequencies[i]))
            .collect()
    }
}

fn open(blob: &[u8]) -> *mut TapDictHandle {
    tapdict_open(blob.as_ptr(), blob.len(), 2, 2)
}

fn suggest(
    handle: *mut TapDictHandle,
    positions: &[&str],
    skip_pos: i32,
    letters: Option<&mut [i32]>,
) -> (i32, Output) {
    let codes = flat_codes(positions);
    let mut out = Output::new(MAX_WORDS);
    let (letters_ptr, letters_len) = match letters {
        Some(l) => (l.as_mut_ptr(), l.len() as i32),
        None => (ptr::null_mut(), 0),
    };
    let count = tapdict_suggest(
        handle,
        codes.as_ptr(),
        codes.len(),
        positions.len() as i32,
        MAX_ALTERNATIVES,
        out.words.as_mut_ptr(),
        out.frequencies.as_mut_ptr(),
        MAX_WORD_LENGTH,
        MAX_WORDS,
        skip_pos,
        letters_ptr,
        letters_len,
    );
    (count, out)
}

fn bigrams(handle: *const TapDictHandle, prev: &str, positions: &[&str]) -> (i32, Output) {
    let prev = utf16(prev);
    let codes = flat_codes(positions);
    let mut out = Output::new(60);
    let count = tapdict_bigrams(
        handle,
        prev.as_ptr(),
        prev.len(),
        codes.as_ptr(),
        codes.len(),
        positions.len() as i32,
        MAX_ALTERNATIVES,
        out.words.as_mut_ptr(),
        out.frequencies.as_mut_ptr(),
        MAX_WORD_LENGTH,
        60,
    );
    (count, out)
}

#[test]
fn test_ffi_version() {
    let v = unsafe { CStr::from_ptr(tapdict_version()) };
    assert_eq!(v.to_str().unwrap(), "0.1.0");
}

#[test]
fn test_ffi_open_rejects_bad_arguments() {
    let blob = sample_builder().build();
    assert!(tapdict_open(ptr::null(), 10, 2, 2).is_null());
    assert!(tapdict_open(blob.as_ptr(), 0, 2, 2).is_null());
    assert!(tapdict_open(blob.as_ptr(), blob.len(), 0, 2).is_null());
    assert!(tapdict_open(blob.as_ptr(), blob.len(), 2, -1).is_null());
    tapdict_close(ptr::null_mut());
}

#[test]
fn test_ffi_suggest_roundtrip() {
    let blob = sample_builder().build();
    let handle = open(&blob);
    assert!(!handle.is_null());

    let mut letters = vec![0i32; 1280];
    let (count, out) = suggest(handle, &["t", "h"], -1, Some(&mut letters));
    assert_eq!(
        out.words(count),
        vec![
            ("the".to_string(), 1020),
            ("they".to_string(), 600),
            ("there".to_string(), 560),
            ("then".to_string(), 520),
            ("The".to_string(), 280),
        ]
    );
    // Unused slots are cleared.
    assert!(out.words[count as usize * MAX_WORD_LENGTH as usize..]
        .iter()
        .all(|&c| c == 0));
    assert!(out.frequencies[count as usize..].iter().all(|&f| f == 0));
    assert_eq!(letters[b'e' as usize], 5);

    // The histogram accumulates across calls.
    suggest(handle, &["t", "h"], -1, Some(&mut letters));
    assert_eq!(letters[b'e' as usize], 10);

    tapdict_close(handle);
}

#[test]
fn test_ffi_suggest_skip_position() {
    let blob = sample_builder().build();
    let handle = open(&blob);

    let (count, _) = suggest(handle, &["c", "t"], -1, None);
    assert_eq!(count, 0);

    let (count, out) = suggest(handle, &["c", "t"], 1, None);
    assert_eq!(
        out.words(count),
        vec![("cat".to_string(), 800), ("cats".to_string(), 440)]
    );

    tapdict_close(handle);
}

#[test]
fn test_ffi_suggest_invalid_arguments() {
    let blob = sample_builder().build();
    let handle = open(&blob);
    let codes = flat_codes(&["c", "a"]);
    let mut out = Output::new(MAX_WORDS);

    let call = |handle: *mut TapDictHandle,
                codes_len: usize,
                positions: i32,
                max_word_length: i32,
                max_words: i32,
                out: &mut Output| {
        tapdict_suggest(
            handle,
            codes.as_ptr(),
            codes_len,
            positions,
            MAX_ALTERNATIVES,
            out.words.as_mut_ptr(),
            out.frequencies.as_mut_ptr(),
            max_word_length,
            max_words,
            -1,
            ptr::null_mut(),
            0,
        )
    };
    let invalid = TAPDICT_ERR_INVALID_ARGUMENT;
    assert_eq!(call(ptr::null_mut(), codes.len(), 2, 48, 18, &mut out), invalid);
    assert_eq!(call(handle, codes.len(), 0, 48, 18, &mut out), invalid);
    assert_eq!(call(handle, codes.len() - 1, 2, 48, 18, &mut out), invalid);
    assert_eq!(call(handle, codes.len(), 2, 1, 18, &mut out), invalid);
    assert_eq!(call(handle, codes.len(), 2, 48, 0, &mut out), invalid);
    assert!(call(handle, codes.len(), 2, 48, 18, &mut out) > 0);

    tapdict_close(handle);
}

#[test]
fn test_ffi_bigrams() {
    let blob = sample_builder().build();
    let handle = open(&blob);

    let (count, out) = bigrams(handle, "an", &["a"]);
    assert_eq!(
        out.words(count),
        vec![("apple".to_string(), 50), ("ant".to_string(), 20)]
    );

    let (count, out) = bigrams(handle, "the", &["cd", "x"]);
    assert_eq!(
        out.words(count),
        vec![
            ("cat".to_string(), 90),
            ("car".to_string(), 90),
            ("dog".to_string(), 70),
        ]
    );

    let (count, _) = bigrams(handle, "zebra", &["a"]);
    assert_eq!(count, 0);

    tapdict_close(handle);
}

#[test]
fn test_ffi_bigrams_unsupported_dictionary() {
    let blob = sample_builder().bigram_flag(0).build();
    let handle = open(&blob);
    let (count, _) = bigrams(handle, "an", &["a"]);
    assert_eq!(count, 0);
    tapdict_close(handle);
}

#[test]
fn test_ffi_is_valid_word() {
    let blob = sample_builder().build();
    let handle = open(&blob);
    let check = |w: &str| {
        let w = utf16(w);
        tapdict_is_valid_word(handle, w.as_ptr(), w.len())
    };
    assert_eq!(check("can't"), 1);
    assert_eq!(check("The"), 1);
    assert_eq!(check("ca"), 0);
    assert_eq!(check(""), 0);
    assert_eq!(
        tapdict_is_valid_word(ptr::null(), ptr::null(), 0),
        TAPDICT_ERR_INVALID_ARGUMENT
    );
    assert_eq!(
        tapdict_is_valid_word(handle, ptr::null(), 3),
        TAPDICT_ERR_INVALID_ARGUMENT
    );
    tapdict_close(handle);
}

#[test]
fn test_ffi_corrupt_dictionary() {
    let mut blob = DictBuilder::new().word("cat", 200).build();
    blob.truncate(blob.len() - 2);
    let handle = open(&blob);
    let (count, _) = suggest(handle, &["c", "a"], -1, None);
    assert_eq!(count, TAPDICT_ERR_CORRUPT);

    let w = utf16("cat");
    assert_eq!(
        tapdict_is_valid_word(handle, w.as_ptr(), w.len()),
        TAPDICT_ERR_CORRUPT
    );
    tapdict_close(handle);
}

#[test]
fn test_ffi_open_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&sample_builder().build()).unwrap();
    file.flush().unwrap();
    let path = CString::new(file.path().to_str().unwrap()).unwrap();

    let handle = tapdict_open_file(path.as_ptr());
    assert!(!handle.is_null());
    let (count, out) = suggest(handle, &["d", "o"], -1, None);
    assert_eq!(out.words(count), vec![("dog".to_string(), 640)]);
    tapdict_close(handle);

    let missing = CString::new("/nonexistent/tapdict.dict").unwrap();
    assert!(tapdict_open_file(missing.as_ptr()).is_null());
    assert!(tapdict_open_file(ptr::null()).is_null());
}

#[test]
fn test_ffi_settings_load_errors() {
    assert_eq!(
        tapdict_settings_load_config(ptr::null()),
        TAPDICT_ERR_INVALID_ARGUMENT
    );
    let missing = CString::new("/nonexistent/settings.toml").unwrap();
    assert_eq!(tapdict_settings_load_config(missing.as_ptr()), TAPDICT_ERR_IO);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[scoring]\ntyped_letter_multiplier = 0\n")
        .unwrap();
    file.flush().unwrap();
    let path = CString::new(file.path().to_str().unwrap()).unwrap();
    assert_eq!(
        tapdict_settings_load_config(path.as_ptr()),
        TAPDICT_ERR_SETTINGS
    );
}
