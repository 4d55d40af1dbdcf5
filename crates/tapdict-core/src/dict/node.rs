//! Byte-level decoding of trie entries.
//!
//! Entry layout inside a sibling list (`count` entries, count is one byte):
//!
//! | field        | bytes | notes |
//! |--------------|-------|-------|
//! | char         | 1 / 3 | `0xFF` escapes a big-endian u16 in the next two bytes |
//! | flag+address | 1 / 3 | bit7 terminal, bit6 has-children; with bit6 the low 6 bits plus two more bytes form a 22-bit child address |
//! | frequency    | 1     | terminal entries only |
//! | bigram suffix| 1+    | terminal entries of latest-format blobs only |
//!
//! Bigram suffix: if the top bit of the first byte is clear the suffix is that
//! single byte. Otherwise it is a run of 4-byte links: a 22-bit target address
//! (6 bits of byte0, then byte1, byte2) followed by a byte whose top bit means
//! "another link follows" and whose low 7 bits are the bigram frequency.
//!
//! All reads are bounds-checked; nothing here allocates.

use super::DictError;

pub const FLAG_TERMINAL: u8 = 0x80;
pub const FLAG_HAS_CHILDREN: u8 = 0x40;
const ADDRESS_HIGH_MASK: u8 = 0x3F;
const CHAR_ESCAPE: u8 = 0xFF;
const FLAG_BIGRAM_PRESENT: u8 = 0x80;
const FLAG_BIGRAM_CONTINUED: u8 = 0x80;
const BIGRAM_FREQ_MASK: u8 = 0x7F;

/// One decoded trie entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeEntry {
    /// Offset of the entry's first char byte. Bigram links point here.
    pub offset: usize,
    pub ch: u16,
    pub terminal: bool,
    /// Offset of the child sibling list, 0 when there are none.
    pub children: usize,
    /// Raw frequency; 0 for non-terminal entries.
    pub frequency: u8,
    /// Offset of the bigram suffix (terminal entries of latest-format blobs).
    pub bigrams: Option<usize>,
}

impl NodeEntry {
    pub fn has_children(&self) -> bool {
        self.children != 0
    }
}

/// A single bigram successor link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigramLink {
    /// Entry offset of the successor word's terminal node.
    pub address: usize,
    /// 0..=127.
    pub frequency: u8,
}

/// Stateless decoder over a blob.
#[derive(Debug, Clone, Copy)]
pub struct NodeReader<'a> {
    data: &'a [u8],
    latest: bool,
}

impl<'a> NodeReader<'a> {
    pub fn new(data: &'a [u8], latest: bool) -> Self {
        Self { data, latest }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    fn byte(&self, pos: usize) -> Result<u8, DictError> {
        self.data
            .get(pos)
            .copied()
            .ok_or(DictError::Corrupt { offset: pos })
    }

    /// Sibling count at `pos`.
    #[inline]
    pub fn read_count(&self, pos: &mut usize) -> Result<usize, DictError> {
        let count = self.byte(*pos)?;
        *pos += 1;
        Ok(count as usize)
    }

    #[inline]
    pub fn read_char(&self, pos: &mut usize) -> Result<u16, DictError> {
        let first = self.byte(*pos)?;
        if first != CHAR_ESCAPE {
            *pos += 1;
            return Ok(first as u16);
        }
        let hi = self.byte(*pos + 1)?;
        let lo = self.byte(*pos + 2)?;
        *pos += 3;
        Ok(u16::from_be_bytes([hi, lo]))
    }

    /// Flag byte plus optional child address. Returns `(terminal, children)`.
    #[inline]
    pub fn read_flags_and_address(&self, pos: &mut usize) -> Result<(bool, usize), DictError> {
        let flags = self.byte(*pos)?;
        let terminal = flags & FLAG_TERMINAL != 0;
        if flags & FLAG_HAS_CHILDREN == 0 {
            *pos += 1;
            return Ok((terminal, 0));
        }
        let address = self.read_address22(*pos)?;
        *pos += 3;
        Ok((terminal, address))
    }

    /// 22-bit address from the low 6 bits of `pos` and the next two bytes.
    #[inline]
    fn read_address22(&self, pos: usize) -> Result<usize, DictError> {
        let b0 = self.byte(pos)? & ADDRESS_HIGH_MASK;
        let b1 = self.byte(pos + 1)?;
        let b2 = self.byte(pos + 2)?;
        Ok(((b0 as usize) << 16) | ((b1 as usize) << 8) | b2 as usize)
    }

    #[inline]
    pub fn read_frequency(&self, pos: &mut usize) -> Result<u8, DictError> {
        let freq = self.byte(*pos)?;
        *pos += 1;
        Ok(freq)
    }

    /// Advance past a bigram suffix starting at `pos`.
    pub fn skip_bigrams(&self, pos: &mut usize) -> Result<(), DictError> {
        if self.byte(*pos)? & FLAG_BIGRAM_PRESENT == 0 {
            *pos += 1;
            return Ok(());
        }
        loop {
            *pos += 3;
            let more = self.byte(*pos)? & FLAG_BIGRAM_CONTINUED != 0;
            *pos += 1;
            if !more {
                return Ok(());
            }
        }
    }

    /// Decode a full entry at `pos` and advance past it.
    pub fn read_entry(&self, pos: &mut usize) -> Result<NodeEntry, DictError> {
        let offset = *pos;
        let ch = self.read_char(pos)?;
        let (terminal, children) = self.read_flags_and_address(pos)?;
        let mut frequency = 0;
        let mut bigrams = None;
        if terminal {
            frequency = self.read_frequency(pos)?;
            if self.latest {
                bigrams = Some(*pos);
                self.skip_bigrams(pos)?;
            }
        }
        Ok(NodeEntry {
            offset,
            ch,
            terminal,
            children,
            frequency,
            bigrams,
        })
    }

    /// Iterate the sibling list at `offset`.
    pub fn siblings(&self, offset: usize) -> Result<Siblings<'a>, DictError> {
        let mut pos = offset;
        let remaining = self.read_count(&mut pos)?;
        Ok(Siblings {
            reader: *self,
            pos,
            remaining,
        })
    }

    /// Links of the bigram suffix at `offset`.
    pub fn bigram_list(&self, offset: usize) -> BigramList<'a> {
        BigramList {
            reader: *self,
            pos: offset,
            state: ListState::Start,
        }
    }
}

/// Iterator over one sibling list.
pub struct Siblings<'a> {
    reader: NodeReader<'a>,
    pos: usize,
    remaining: usize,
}

impl Siblings<'_> {
    /// Offset of the next entry to be read.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for Siblings<'_> {
    type Item = Result<NodeEntry, DictError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let entry = self.reader.read_entry(&mut self.pos);
        if entry.is_err() {
            self.remaining = 0;
        }
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    Start,
    More,
    Done,
}

/// Iterator over a bigram suffix.
pub struct BigramList<'a> {
    reader: NodeReader<'a>,
    pos: usize,
    state: ListState,
}

impl Iterator for BigramList<'_> {
    type Item = Result<BigramLink, DictError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            ListState::Done => return None,
            ListState::Start => match self.reader.byte(self.pos) {
                Ok(b) if b & FLAG_BIGRAM_PRESENT == 0 => {
                    self.state = ListState::Done;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.state = ListState::Done;
                    return Some(Err(e));
                }
            },
            ListState::More => {}
        }
        let link = self.reader.read_address22(self.pos).and_then(|address| {
            let tail = self.reader.byte(self.pos + 3)?;
            Ok((address, tail))
        });
        match link {
            Ok((address, tail)) => {
                self.pos += 4;
                self.state = if tail & FLAG_BIGRAM_CONTINUED != 0 {
                    ListState::More
                } else {
                    ListState::Done
                };
                Some(Ok(BigramLink {
                    address,
                    frequency: tail & BIGRAM_FREQ_MASK,
                }))
            }
            Err(e) => {
                self.state = ListState::Done;
                Some(Err(e))
            }
        }
    }
}
