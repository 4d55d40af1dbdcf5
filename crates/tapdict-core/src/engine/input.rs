/// Marks the end of a position's alternates.
pub const CODE_SENTINEL: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("input has no key positions")]
    Empty,
    #[error("max_alternatives must be positive")]
    ZeroAlternatives,
    #[error("flat code array holds {actual} codes, need {expected}")]
    Truncated { expected: usize, actual: usize },
}

/// Typed key positions as a `positions × max_alternatives` code matrix.
///
/// Each row lists the typed (primary) code first, then neighboring-key
/// alternates; the row ends at the first non-positive code or at the stride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputCodes {
    codes: Vec<i32>,
    len: usize,
    max_alternatives: usize,
}

impl InputCodes {
    /// Copy `len` rows out of a flat host array with row stride `max_alternatives`.
    pub fn from_flat(codes: &[i32], len: usize, max_alternatives: usize) -> Result<Self, InputError> {
        if len == 0 {
            return Err(InputError::Empty);
        }
        if max_alternatives == 0 {
            return Err(InputError::ZeroAlternatives);
        }
        let expected = len * max_alternatives;
        if codes.len() < expected {
            return Err(InputError::Truncated {
                expected,
                actual: codes.len(),
            });
        }
        Ok(Self {
            codes: codes[..expected].to_vec(),
            len,
            max_alternatives,
        })
    }

    /// Build from per-position alternate lists, each truncated to `max_alternatives`.
    pub fn from_positions<P: AsRef<[u16]>>(
        positions: &[P],
        max_alternatives: usize,
    ) -> Result<Self, InputError> {
        if positions.is_empty() {
            return Err(InputError::Empty);
        }
        if max_alternatives == 0 {
            return Err(InputError::ZeroAlternatives);
        }
        let mut codes = vec![CODE_SENTINEL; positions.len() * max_alternatives];
        for (row, alternates) in codes.chunks_exact_mut(max_alternatives).zip(positions) {
            for (slot, &c) in row.iter_mut().zip(alternates.as_ref()) {
                *slot = c as i32;
            }
        }
        Ok(Self {
            codes,
            len: positions.len(),
            max_alternatives,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_alternatives(&self) -> usize {
        self.max_alternatives
    }

    /// Full row for position `index`, sentinel padding included.
    pub fn row(&self, index: usize) -> &[i32] {
        let start = index * self.max_alternatives;
        &self.codes[start..start + self.max_alternatives]
    }

    /// Alternates of position `index`, up to the sentinel.
    pub fn alternates(&self, index: usize) -> impl Iterator<Item = i32> + '_ {
        self.row(index).iter().copied().take_while(|&c| c > 0)
    }

    pub fn primary(&self, index: usize) -> i32 {
        self.row(index)[0]
    }

    /// Whether `word` is exactly the typed primaries.
    pub fn is_typed(&self, word: &[u16]) -> bool {
        word.len() == self.len
            && word
                .iter()
                .enumerate()
                .all(|(i, &c)| self.primary(i) == c as i32)
    }

    /// Whether `c` is one of the first position's alternates.
    pub fn first_matches(&self, c: u16) -> bool {
        self.alternates(0).any(|code| code == c as i32)
    }
}
