use super::node::{NodeEntry, Siblings};
use super::{BinaryDictionary, DictError};

impl BinaryDictionary {
    /// Exact-match membership: no case folding, no alternates.
    pub fn is_valid_word(&self, word: &[u16]) -> Result<bool, DictError> {
        Ok(self.find_word(word)?.is_some())
    }

    /// Locate the terminal entry spelling exactly `word`.
    ///
    /// A sibling list may hold the same character more than once, so a failed
    /// branch falls back to the remaining siblings.
    pub fn find_word(&self, word: &[u16]) -> Result<Option<NodeEntry>, DictError> {
        let Some(last) = word.len().checked_sub(1) else {
            return Ok(None);
        };
        let reader = self.reader();
        let mut stack: Vec<(Siblings<'_>, usize)> = Vec::with_capacity(word.len());
        stack.push((reader.siblings(self.root_offset())?, 0));

        while let Some((siblings, depth)) = stack.last_mut() {
            let depth = *depth;
            let Some(entry) = siblings.next() else {
                stack.pop();
                continue;
            };
            let entry = entry?;
            if entry.ch != word[depth] {
                continue;
            }
            if depth == last {
                if entry.terminal {
                    return Ok(Some(entry));
                }
            } else if entry.has_children() {
                stack.push((reader.siblings(entry.children)?, depth + 1));
            }
        }
        Ok(None)
    }
}
