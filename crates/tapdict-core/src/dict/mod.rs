//! Binary dictionary storage and trie decoding.
//!
//! A dictionary blob is a two-byte header followed by nested sibling lists.
//! Each list starts with a one-byte entry count; each entry carries a
//! character, a flag byte (terminal / has-children), an optional 22-bit child
//! address, and for terminal entries a frequency byte plus, in the latest
//! format, a bigram suffix. See [`node`] for the byte-level layout.
//!
//! The blob is never mutated after load, so a single `BinaryDictionary` can be
//! shared (via `Arc`) by any number of engines.

mod io;
pub mod node;
#[cfg(test)]
mod tests;
mod validity;
mod walk;

pub use node::{BigramLink, BigramList, NodeEntry, NodeReader};
pub use walk::WordVisit;

use std::io as std_io;

use memmap2::Mmap;

/// Lowest header version whose blobs carry bigram suffixes and a two-byte header.
pub const DICTIONARY_VERSION_MIN: u8 = 200;
/// Size of the latest-format header: version(1) + bigram flag(1).
pub const DICTIONARY_HEADER_SIZE: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] std_io::Error),

    #[error("dictionary buffer is null or empty")]
    InvalidBuffer,

    #[error("corrupt dictionary: read past end of blob at offset {offset}")]
    Corrupt { offset: usize },

    #[error("corrupt dictionary: child address {address} does not advance past {from}")]
    UnsupportedLayout { from: usize, address: usize },
}

/// Parsed header bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictHeader {
    pub version: u8,
    pub bigram_flag: u8,
}

impl DictHeader {
    /// A blob too short for a header reads as legacy.
    fn parse(data: &[u8]) -> Self {
        Self {
            version: data.first().copied().unwrap_or(0),
            bigram_flag: data.get(1).copied().unwrap_or(u8::MAX),
        }
    }

    /// Latest format: two-byte header and a bigram suffix after every frequency.
    pub fn is_latest(&self) -> bool {
        self.version >= DICTIONARY_VERSION_MIN && (self.bigram_flag == 0 || self.bigram_flag == 1)
    }

    /// Whether bigram queries are answered at all.
    pub fn has_bigrams(&self) -> bool {
        self.is_latest() && self.bigram_flag == 1
    }

    /// Offset of the root sibling list.
    pub fn root_offset(&self) -> usize {
        if self.is_latest() {
            DICTIONARY_HEADER_SIZE
        } else {
            0
        }
    }
}

/// Backing storage for the blob.
pub(crate) enum BlobStorage {
    Owned(Vec<u8>),
    Mapped(Mmap),
    Static(&'static [u8]),
}

impl BlobStorage {
    fn as_slice(&self) -> &[u8] {
        match self {
            BlobStorage::Owned(v) => v,
            BlobStorage::Mapped(m) => m,
            BlobStorage::Static(s) => s,
        }
    }
}

/// An immutable, fully-resident dictionary blob.
pub struct BinaryDictionary {
    pub(crate) storage: BlobStorage,
    pub(crate) header: DictHeader,
}

impl BinaryDictionary {
    pub(crate) fn with_storage(storage: BlobStorage) -> Result<Self, DictError> {
        let data = storage.as_slice();
        if data.is_empty() {
            return Err(DictError::InvalidBuffer);
        }
        let header = DictHeader::parse(data);
        Ok(Self { storage, header })
    }

    pub fn data(&self) -> &[u8] {
        self.storage.as_slice()
    }

    pub fn len(&self) -> usize {
        self.data().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    pub fn header(&self) -> DictHeader {
        self.header
    }

    pub fn root_offset(&self) -> usize {
        self.header.root_offset()
    }

    /// Decoder bound to this blob.
    pub fn reader(&self) -> NodeReader<'_> {
        NodeReader::new(self.data(), self.header.is_latest())
    }
}

impl std::fmt::Debug for BinaryDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.storage {
            BlobStorage::Owned(_) => "owned",
            BlobStorage::Mapped(_) => "mapped",
            BlobStorage::Static(_) => "static",
        };
        f.debug_struct("BinaryDictionary")
            .field("storage", &kind)
            .field("len", &self.len())
            .field("header", &self.header)
            .finish()
    }
}
