use tracing::{debug, debug_span};

use super::collector::{RankedWord, RankedWords};
use super::input::InputCodes;
use super::Engine;
use crate::dict::DictError;

impl Engine {
    /// Ranked successors of `previous`, filtered by the first typed position.
    ///
    /// Empty when the dictionary has no bigram data or `previous` is not a word.
    pub fn bigrams(
        &self,
        previous: &[u16],
        input: &InputCodes,
        max_word_length: usize,
        max_bigrams: usize,
    ) -> Result<Vec<RankedWord>, DictError> {
        let mut out = RankedWords::new(max_bigrams);
        self.collect_bigrams(&mut out, previous, input, max_word_length)?;
        Ok(out.into_vec())
    }

    /// Merge successors of `previous` into `out`.
    ///
    /// At most `out.capacity()` links are examined. Each link's target address
    /// is turned back into a spelling by [`BinaryDictionary::word_at`]; the word
    /// is kept when its first letter is one of the first position's alternates
    /// and scores its raw bigram frequency. Returns the number of links examined.
    ///
    /// [`BinaryDictionary::word_at`]: crate::dict::BinaryDictionary::word_at
    pub fn collect_bigrams(
        &self,
        out: &mut RankedWords,
        previous: &[u16],
        input: &InputCodes,
        max_word_length: usize,
    ) -> Result<usize, DictError> {
        let _span = debug_span!("bigrams", previous_len = previous.len()).entered();
        let dict = &self.dict;
        if !dict.header().has_bigrams() {
            return Ok(0);
        }
        let Some(node) = dict.find_word(previous)? else {
            return Ok(0);
        };
        let Some(suffix) = node.bigrams else {
            return Ok(0);
        };

        let max_len = max_word_length.saturating_sub(1);
        let mut examined = 0;
        for link in dict.reader().bigram_list(suffix).take(out.capacity()) {
            let link = link?;
            examined += 1;
            let Some(word) = dict.word_at(link.address, max_len)? else {
                debug!(address = link.address, "bigram target not found");
                continue;
            };
            if word.first().is_some_and(|&c| input.first_matches(c)) {
                out.insert(&word, link.frequency as u32);
            }
        }
        debug!(examined, kept = out.len(), "bigrams done");
        Ok(examined)
    }
}
