use serde::Serialize;

/// A candidate word and its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedWord {
    pub chars: Vec<u16>,
    pub score: u32,
}

impl RankedWord {
    pub fn text(&self) -> String {
        String::from_utf16_lossy(&self.chars)
    }
}

/// Hosts may pass large capacities; only this much is reserved up front.
const INITIAL_CAPACITY: usize = 64;

/// Fixed-capacity list kept sorted by descending score, shorter word first on ties.
///
/// An entry goes in front of the first existing entry it outranks; equal
/// entries keep insertion order. When full, the lowest-ranked entry falls off.
/// A score of 0 never ranks.
#[derive(Debug, Clone)]
pub struct RankedWords {
    entries: Vec<RankedWord>,
    capacity: usize,
}

impl RankedWords {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.min(INITIAL_CAPACITY)),
            capacity,
        }
    }

    /// Returns whether the word was kept.
    pub fn insert(&mut self, word: &[u16], score: u32) -> bool {
        if score == 0 {
            return false;
        }
        let at = self
            .entries
            .iter()
            .position(|e| score > e.score || (score == e.score && word.len() < e.chars.len()))
            .unwrap_or(self.entries.len());
        if at >= self.capacity {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop();
        }
        self.entries.insert(
            at,
            RankedWord {
                chars: word.to_vec(),
                score,
            },
        );
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[RankedWord] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedWord> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<RankedWord> {
        self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Counts of the letter that follows the typed prefix in completed words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextLetters {
    counts: Vec<u32>,
}

impl NextLetters {
    pub fn new(size: usize) -> Self {
        Self {
            counts: vec![0; size],
        }
    }

    /// Codes at or beyond the histogram size are ignored.
    pub fn increment(&mut self, code: u16) -> bool {
        match self.counts.get_mut(code as usize) {
            Some(n) => {
                *n = n.saturating_add(1);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, code: u16) -> u32 {
        self.counts.get(code as usize).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }

    /// `(code, count)` pairs with a non-zero count.
    pub fn non_zero(&self) -> impl Iterator<Item = (u16, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &n)| n > 0)
            .map(|(code, &n)| (code as u16, n))
    }

    pub fn clear(&mut self) {
        self.counts.fill(0);
    }
}
