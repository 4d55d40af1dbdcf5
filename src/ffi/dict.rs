use std::ffi::c_char;
use std::path::Path;
use std::ptr;
use std::sync::Arc;

use tapdict_core::dict::BinaryDictionary;
use tapdict_core::engine::{Engine, InputCodes, Limits, NextLetters, RankedWord, Scoring};
use tapdict_core::settings::settings;
use tracing::{debug, debug_span};

use super::{
    ffi_close, ffi_guard, owned_new, positive, to_code, FfiError, TAPDICT_ERR_INVALID_ARGUMENT,
};

// --- Dictionary handle FFI ---

/// An engine over one dictionary. Calls on a handle must not overlap; open
/// one handle per concurrent caller (handles over the same blob are cheap).
pub struct TapDictHandle {
    pub(crate) engine: Engine,
}

fn new_handle(dict: BinaryDictionary, scoring: Scoring) -> *mut TapDictHandle {
    let s = settings();
    let engine = Engine::new(Arc::new(dict), scoring)
        .with_free_insertion(s.free_insertion())
        .with_typed_word(s.correction.include_typed_word);
    owned_new(TapDictHandle { engine })
}

/// Wrap a resident, caller-owned blob. Returns null when the buffer is null
/// or empty, or a multiplier is not positive.
///
/// The blob is borrowed, not copied: it must stay valid and unmodified until
/// [`tapdict_close`] has returned.
#[no_mangle]
#[must_use]
pub extern "C" fn tapdict_open(
    blob: *const u8,
    len: usize,
    typed_letter_multiplier: i32,
    full_word_multiplier: i32,
) -> *mut TapDictHandle {
    let (Ok(typed), Ok(full)) = (
        positive(typed_letter_multiplier, "typed_letter_multiplier"),
        positive(full_word_multiplier, "full_word_multiplier"),
    ) else {
        return ptr::null_mut();
    };
    // SAFETY: the blob outlives the handle per this function's contract.
    let dict = match unsafe { BinaryDictionary::from_raw_parts(blob, len) } {
        Ok(dict) => dict,
        Err(e) => {
            debug!(error = %e, "open rejected");
            return ptr::null_mut();
        }
    };
    let scoring = Scoring {
        typed_letter_multiplier: typed as u32,
        full_word_multiplier: full as u32,
    };
    new_handle(dict, scoring)
}

/// Memory-map the dictionary file at `path`, scoring with the configured
/// multipliers. Returns null when the file cannot be opened or is empty.
#[no_mangle]
#[must_use]
pub extern "C" fn tapdict_open_file(path: *const c_char) -> *mut TapDictHandle {
    ffi_guard!(ptr::null_mut() ; str: path_str = path ,);
    match BinaryDictionary::open(Path::new(path_str)) {
        Ok(dict) => new_handle(dict, settings().scoring()),
        Err(e) => {
            debug!(path = path_str, error = %e, "open_file failed");
            ptr::null_mut()
        }
    }
}

ffi_close!(tapdict_close, TapDictHandle);

/// Copy ranked words into zero-filled host slots of `stride` code units,
/// each word followed by a 0 terminator. Returns the number written.
fn write_words(
    words: &[RankedWord],
    out_words: &mut [u16],
    out_frequencies: &mut [i32],
    stride: usize,
) -> i32 {
    out_words.fill(0);
    out_frequencies.fill(0);
    let mut written = 0;
    for ((word, slot), freq) in words
        .iter()
        .zip(out_words.chunks_exact_mut(stride))
        .zip(out_frequencies.iter_mut())
    {
        let n = word.chars.len().min(stride - 1);
        slot[..n].copy_from_slice(&word.chars[..n]);
        *freq = i32::try_from(word.score).unwrap_or(i32::MAX);
        written += 1;
    }
    written
}

/// Word slot buffer size, `count × max_word_length`, and the per-slot stride.
fn slot_layout(count: i32, max_word_length: i32) -> Result<(usize, usize, usize), FfiError> {
    let count = positive(count, "word count")?;
    let stride = positive(max_word_length, "max_word_length")?;
    if stride < 2 {
        return Err(FfiError::InvalidArgument("max_word_length"));
    }
    let total = count
        .checked_mul(stride)
        .ok_or(FfiError::InvalidArgument("word buffer size"))?;
    Ok((count, stride, total))
}

/// Validated scalar arguments of [`tapdict_suggest`].
struct SuggestRequest {
    positions: i32,
    max_alternatives: i32,
    stride: usize,
    max_words: usize,
    skip: Option<usize>,
    track_letters: bool,
}

fn input_codes(
    codes: &[i32],
    positions: i32,
    max_alternatives: i32,
) -> Result<InputCodes, FfiError> {
    let positions = positive(positions, "positions")?;
    let max_alternatives = positive(max_alternatives, "max_alternatives")?;
    Ok(InputCodes::from_flat(codes, positions, max_alternatives)?)
}

fn suggest_into(
    engine: &mut Engine,
    codes: &[i32],
    req: &SuggestRequest,
    out_words: &mut [u16],
    out_frequencies: &mut [i32],
    host_letters: &mut [i32],
) -> Result<i32, FfiError> {
    let input = input_codes(codes, req.positions, req.max_alternatives)?;
    let limits = Limits {
        max_word_length: req.stride,
        max_words: req.max_words,
    };
    let mut histogram = req.track_letters.then(|| NextLetters::new(host_letters.len()));
    let words = engine.suggest(&input, limits, req.skip, histogram.as_mut())?;

    if let Some(histogram) = &histogram {
        for (code, n) in histogram.non_zero() {
            let slot = &mut host_letters[code as usize];
            *slot = slot.saturating_add(i32::try_from(n).unwrap_or(i32::MAX));
        }
    }
    Ok(write_words(&words, out_words, out_frequencies, req.stride))
}

/// Rank words for `positions` typed keys.
///
/// - `codes`: `positions × max_alternatives` codes, primary first in each
///   row, rows padded with a non-positive sentinel.
/// - `out_words`: `max_words × max_word_length` code units; each word is
///   written at `i × max_word_length` and zero-terminated.
/// - `out_frequencies`: `max_words` scores, best first.
/// - `skip_pos`: word depth whose letter the user missed, or negative for none.
/// - `next_letters`: optional histogram of `next_letters_size` counters,
///   indexed by code unit; counts are added to what the host passes in.
///
/// Returns the number of words written, or a negative error code.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn tapdict_suggest(
    handle: *mut TapDictHandle,
    codes: *const i32,
    codes_len: usize,
    positions: i32,
    max_alternatives: i32,
    out_words: *mut u16,
    out_frequencies: *mut i32,
    max_word_length: i32,
    max_words: i32,
    skip_pos: i32,
    next_letters: *mut i32,
    next_letters_size: i32,
) -> i32 {
    let _span = debug_span!("tapdict_suggest", positions, skip_pos).entered();
    let layout = match slot_layout(max_words, max_word_length) {
        Ok(layout) => layout,
        Err(e) => return to_code("suggest", Err(e)),
    };
    let (words_cap, stride, total) = layout;
    let Ok(histogram_len) = usize::try_from(next_letters_size) else {
        return TAPDICT_ERR_INVALID_ARGUMENT;
    };
    let histogram_len = if next_letters.is_null() { 0 } else { histogram_len };
    ffi_guard!(TAPDICT_ERR_INVALID_ARGUMENT;
        mut: h = handle,
        slice: codes = [codes; codes_len],
        slice_mut: out_words = [out_words; total],
        slice_mut: out_frequencies = [out_frequencies; words_cap],
        slice_mut: host_letters = [next_letters; histogram_len],
    );

    let request = SuggestRequest {
        positions,
        max_alternatives,
        stride,
        max_words: words_cap,
        skip: usize::try_from(skip_pos).ok(),
        track_letters: !next_letters.is_null(),
    };
    let result = suggest_into(
        &mut h.engine,
        codes,
        &request,
        out_words,
        out_frequencies,
        host_letters,
    );
    to_code("suggest", result)
}

/// Rank the bigram successors of `prev_word`, keeping those whose first
/// letter is an alternate of the first typed position.
///
/// Buffers follow [`tapdict_suggest`]. Only `max_bigrams` links of the
/// previous word are examined. Dictionaries without bigram data yield 0.
/// Returns the number of words written, or a negative error code.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn tapdict_bigrams(
    handle: *const TapDictHandle,
    prev_word: *const u16,
    prev_word_len: usize,
    codes: *const i32,
    codes_len: usize,
    positions: i32,
    max_alternatives: i32,
    out_words: *mut u16,
    out_frequencies: *mut i32,
    max_word_length: i32,
    max_bigrams: i32,
) -> i32 {
    let _span = debug_span!("tapdict_bigrams", prev_word_len).entered();
    let layout = match slot_layout(max_bigrams, max_word_length) {
        Ok(layout) => layout,
        Err(e) => return to_code("bigrams", Err(e)),
    };
    let (words_cap, stride, total) = layout;
    ffi_guard!(TAPDICT_ERR_INVALID_ARGUMENT;
        ref: h = handle,
        slice: prev_word = [prev_word; prev_word_len],
        slice: codes = [codes; codes_len],
        slice_mut: out_words = [out_words; total],
        slice_mut: out_frequencies = [out_frequencies; words_cap],
    );

    let result = input_codes(codes, positions, max_alternatives).and_then(|input| {
        let words = h.engine.bigrams(prev_word, &input, stride, words_cap)?;
        Ok(write_words(&words, out_words, out_frequencies, stride))
    });
    to_code("bigrams", result)
}

/// Exact, case-sensitive membership. Returns 1 or 0, or a negative error code.
#[no_mangle]
pub extern "C" fn tapdict_is_valid_word(
    handle: *const TapDictHandle,
    word: *const u16,
    word_len: usize,
) -> i32 {
    ffi_guard!(TAPDICT_ERR_INVALID_ARGUMENT;
        ref: h = handle,
        slice: word = [word; word_len],
    );
    let result = h
        .engine
        .is_valid_word(word)
        .map(i32::from)
        .map_err(FfiError::from);
    to_code("is_valid_word", result)
}
