use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use super::{BinaryDictionary, BlobStorage, DictError};

impl BinaryDictionary {
    /// Take ownership of an in-memory blob.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, DictError> {
        Self::with_storage(BlobStorage::Owned(data))
    }

    /// Wrap a blob that lives for the whole program (e.g. `include_bytes!`).
    pub fn from_static(data: &'static [u8]) -> Result<Self, DictError> {
        Self::with_storage(BlobStorage::Static(data))
    }

    /// Wrap a caller-owned buffer without copying it.
    ///
    /// # Safety
    /// `ptr` must point to `len` readable bytes that stay valid and unmodified
    /// until the returned dictionary (and every `Arc` clone of it) is dropped.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Result<Self, DictError> {
        if ptr.is_null() || len == 0 {
            return Err(DictError::InvalidBuffer);
        }
        let data: &'static [u8] = std::slice::from_raw_parts(ptr, len);
        Self::with_storage(BlobStorage::Static(data))
    }

    /// Open a dictionary file using a read-only memory map.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap is owned by the dictionary, so the bytes stay mapped for its
        // whole lifetime. The file should not be modified while it is in use.
        let mmap = unsafe { Mmap::map(&file)? };
        let dict = Self::with_storage(BlobStorage::Mapped(mmap))?;
        debug!(
            path = %path.display(),
            len = dict.len(),
            version = dict.header.version,
            bigrams = dict.header.has_bigrams(),
            "dictionary mapped"
        );
        Ok(dict)
    }
}
