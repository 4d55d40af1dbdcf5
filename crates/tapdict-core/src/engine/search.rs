//! Depth-first fuzzy traversal driven by typed key positions.
//!
//! Each stack frame walks one sibling list. A non-completion entry that is
//! neither stepped over nor skipped becomes a pending match: its alternates are
//! tried one at a time, and each match pushes the child list before the next
//! alternate is considered. The visiting order, and therefore the order in
//! which equal-ranked words reach the collector, is that of a plain recursive
//! descent, without tying stack usage to the thread's call stack.

use tracing::{debug, debug_span};

use super::collector::{NextLetters, RankedWord, RankedWords};
use super::input::InputCodes;
use super::{Engine, FreeInsertion, Limits, Scoring};
use crate::dict::{DictError, NodeReader};
use crate::unicode::to_lower;

#[derive(Debug, Clone, Copy)]
pub(super) struct Frame {
    pos: usize,
    remaining: usize,
    depth: usize,
    completion: bool,
    multiplier: u32,
    input_index: usize,
    diffs: usize,
    pending: Option<Pending>,
}

/// An entry whose alternates are still being matched.
#[derive(Debug, Clone, Copy)]
struct Pending {
    ch: u16,
    lower: u16,
    terminal: bool,
    children: usize,
    frequency: u32,
    next_alt: usize,
}

/// Per-call constants.
struct Pass<'a> {
    reader: NodeReader<'a>,
    input: &'a InputCodes,
    scoring: Scoring,
    free_insertion: &'a FreeInsertion,
    include_typed_word: bool,
    skip: Option<usize>,
    max_depth: usize,
    max_edit_distance: usize,
    max_word_length: usize,
}

impl Pass<'_> {
    /// Push a frame for the sibling list at `pos` unless the branch is pruned.
    #[allow(clippy::too_many_arguments)]
    fn open(
        &self,
        stack: &mut Vec<Frame>,
        pos: usize,
        depth: usize,
        completion: bool,
        multiplier: u32,
        input_index: usize,
        diffs: usize,
    ) -> Result<(), DictError> {
        if depth > self.max_depth || diffs > self.max_edit_distance {
            return Ok(());
        }
        // Keep room for the word plus its terminator in a host slot.
        if depth + 1 >= self.max_word_length {
            return Ok(());
        }
        let mut pos = pos;
        let remaining = self.reader.read_count(&mut pos)?;
        stack.push(Frame {
            pos,
            remaining,
            depth,
            completion: completion || input_index >= self.input.len(),
            multiplier,
            input_index,
            diffs,
            pending: None,
        });
        Ok(())
    }
}

impl Engine {
    /// Ranked words for `input`, at most `limits.max_words` of them.
    ///
    /// `skip` names a word depth whose letter the user missed: the dictionary
    /// letter there is accepted without consuming a typed position, and only
    /// the first matching alternate is followed elsewhere.
    /// `next_letters` receives the letter after the typed prefix of every
    /// completion (only when `skip` is `None`).
    pub fn suggest(
        &mut self,
        input: &InputCodes,
        limits: Limits,
        skip: Option<usize>,
        next_letters: Option<&mut NextLetters>,
    ) -> Result<Vec<RankedWord>, DictError> {
        let mut out = RankedWords::new(limits.max_words);
        self.collect_suggestions(&mut out, input, limits.max_word_length, skip, next_letters)?;
        Ok(out.into_vec())
    }

    /// Run one search pass, merging its words into `out`.
    pub fn collect_suggestions(
        &mut self,
        out: &mut RankedWords,
        input: &InputCodes,
        max_word_length: usize,
        skip: Option<usize>,
        mut next_letters: Option<&mut NextLetters>,
    ) -> Result<(), DictError> {
        let _span = debug_span!("suggest", input_len = input.len(), ?skip).entered();
        let Self {
            dict,
            scoring,
            free_insertion,
            include_typed_word,
            word,
            stack,
        } = self;

        let input_len = input.len();
        let pass = Pass {
            reader: dict.reader(),
            input,
            scoring: *scoring,
            free_insertion,
            include_typed_word: *include_typed_word,
            skip,
            max_depth: input_len * 3,
            max_edit_distance: if input_len < 5 { 2 } else { input_len / 2 },
            max_word_length,
        };

        word.clear();
        word.resize(max_word_length, 0);
        stack.clear();
        pass.open(stack, dict.root_offset(), 0, false, 1, 0, 0)?;

        while let Some(top) = stack.last_mut() {
            if let Some(pending) = top.pending {
                let frame = *top;
                let row = input.row(frame.input_index);
                let mut j = pending.next_alt;
                let mut matched = None;
                while j < row.len() && row[j] > 0 {
                    let code = row[j];
                    j += 1;
                    if code == pending.lower as i32 || code == pending.ch as i32 {
                        matched = Some(j - 1);
                        break;
                    }
                }
                let Some(alt) = matched else {
                    top.pending = None;
                    continue;
                };
                top.pending = match skip {
                    Some(_) => None,
                    None => Some(Pending {
                        next_alt: j,
                        ..pending
                    }),
                };

                let depth = frame.depth;
                let weight = if alt == 0 {
                    pass.scoring.typed_letter_multiplier
                } else {
                    1
                };
                word[depth] = pending.ch;
                let multiplier = frame.multiplier.saturating_mul(weight);
                let diffs = frame.diffs + usize::from(alt > 0);
                let next_index = frame.input_index + 1;

                if next_index == input_len {
                    let spelled = &word[..=depth];
                    if pending.terminal && (pass.include_typed_word || !input.is_typed(spelled)) {
                        let mut score = pending.frequency.saturating_mul(multiplier);
                        if skip.is_none() {
                            score = score.saturating_mul(pass.scoring.full_word_multiplier);
                        }
                        out.insert(spelled, score);
                    }
                    if pending.children != 0 {
                        pass.open(
                            stack,
                            pending.children,
                            depth + 1,
                            true,
                            multiplier,
                            next_index,
                            diffs,
                        )?;
                    }
                } else if pending.children != 0 {
                    pass.open(
                        stack,
                        pending.children,
                        depth + 1,
                        false,
                        multiplier,
                        next_index,
                        diffs,
                    )?;
                }
                continue;
            }

            if top.remaining == 0 {
                stack.pop();
                continue;
            }
            let mut pos = top.pos;
            let entry = pass.reader.read_entry(&mut pos)?;
            top.pos = pos;
            top.remaining -= 1;
            let frame = *top;
            let depth = frame.depth;
            let frequency = if entry.terminal {
                entry.frequency as u32
            } else {
                1
            };

            if frame.completion {
                word[depth] = entry.ch;
                if entry.terminal {
                    out.insert(&word[..=depth], frequency.saturating_mul(frame.multiplier));
                    if depth >= input_len && skip.is_none() {
                        if let Some(letters) = next_letters.as_deref_mut() {
                            letters.increment(word[input_len]);
                        }
                    }
                }
                if entry.has_children() {
                    pass.open(
                        stack,
                        entry.children,
                        depth + 1,
                        true,
                        frame.multiplier,
                        frame.input_index,
                        frame.diffs,
                    )?;
                }
                continue;
            }

            let primary = input.primary(frame.input_index);
            let stepped_over =
                pass.free_insertion.contains(entry.ch) && primary != entry.ch as i32;
            if stepped_over || skip == Some(depth) {
                word[depth] = entry.ch;
                if entry.has_children() {
                    pass.open(
                        stack,
                        entry.children,
                        depth + 1,
                        false,
                        frame.multiplier,
                        frame.input_index,
                        frame.diffs,
                    )?;
                }
                continue;
            }

            top.pending = Some(Pending {
                ch: entry.ch,
                lower: to_lower(entry.ch),
                terminal: entry.terminal,
                children: entry.children,
                frequency,
                next_alt: 0,
            });
        }

        debug!(kept = out.len(), "suggest pass done");
        Ok(())
    }
}
