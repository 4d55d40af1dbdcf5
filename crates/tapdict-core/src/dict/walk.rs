//! Whole-trie traversal and address-to-spelling resolution.
//!
//! Both rely on the layout produced by the dictionary builder: every child
//! list is written after the entry that points at it, and the child lists of
//! one sibling list appear in the same order as their parents. Child
//! addresses are therefore non-decreasing across a sibling list and each
//! subtree occupies the byte range up to the next sibling's child address.
//! A blob that breaks this is reported as [`DictError::UnsupportedLayout`]
//! where it can be detected; otherwise lookups silently miss.

use tracing::debug;

use super::node::Siblings;
use super::{BinaryDictionary, DictError};

/// A terminal entry reached during [`BinaryDictionary::for_each_word`].
#[derive(Debug, Clone, Copy)]
pub struct WordVisit<'w> {
    pub word: &'w [u16],
    pub frequency: u8,
    /// Entry offset, the value bigram links use to name this word.
    pub offset: usize,
    pub bigrams: Option<usize>,
}

impl BinaryDictionary {
    /// Visit every word up to `max_len` characters in depth-first order.
    pub fn for_each_word<F>(&self, max_len: usize, mut visit: F) -> Result<(), DictError>
    where
        F: FnMut(WordVisit<'_>),
    {
        if max_len == 0 {
            return Ok(());
        }
        let reader = self.reader();
        let mut word: Vec<u16> = Vec::with_capacity(max_len);
        let mut stack: Vec<Siblings<'_>> = vec![reader.siblings(self.root_offset())?];

        while let Some(siblings) = stack.last_mut() {
            let Some(entry) = siblings.next() else {
                stack.pop();
                word.pop();
                continue;
            };
            let entry = entry?;
            let depth = stack.len() - 1;
            word.truncate(depth);
            word.push(entry.ch);
            if entry.terminal {
                visit(WordVisit {
                    word: &word,
                    frequency: entry.frequency,
                    offset: entry.offset,
                    bigrams: entry.bigrams,
                });
            }
            if entry.has_children() && word.len() < max_len {
                if entry.children <= entry.offset {
                    return Err(DictError::UnsupportedLayout {
                        from: entry.offset,
                        address: entry.children,
                    });
                }
                stack.push(reader.siblings(entry.children)?);
            }
        }
        Ok(())
    }

    /// Reconstruct the spelling of the word whose terminal entry sits at `address`.
    ///
    /// Descends from the root, at each level following the child list with the
    /// largest address not beyond `address`, until an entry's own offset
    /// matches. Returns `None` when no such entry exists within `max_len`
    /// characters, or when the entry there ends no word.
    pub fn word_at(&self, address: usize, max_len: usize) -> Result<Option<Vec<u16>>, DictError> {
        let reader = self.reader();
        let mut word = Vec::new();
        let mut list = self.root_offset();

        while word.len() < max_len {
            let mut follow: Option<(usize, u16)> = None;
            for entry in reader.siblings(list)? {
                let entry = entry?;
                if entry.offset == address {
                    if !entry.terminal {
                        debug!(address, "bigram target is not a word");
                        return Ok(None);
                    }
                    word.push(entry.ch);
                    return Ok(Some(word));
                }
                if entry.has_children()
                    && entry.children <= address
                    && follow.map_or(true, |(best, _)| entry.children >= best)
                {
                    follow = Some((entry.children, entry.ch));
                }
            }
            let Some((child, ch)) = follow else {
                debug!(address, list, "no branch covers bigram target");
                return Ok(None);
            };
            if child <= list {
                return Err(DictError::UnsupportedLayout {
                    from: list,
                    address: child,
                });
            }
            word.push(ch);
            list = child;
        }
        Ok(None)
    }
}
