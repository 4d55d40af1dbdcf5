//! FFI layer: the C API over [`tapdict_core`].
//!
//! Shared helpers live here (macros, error codes, pointer helpers); the
//! dictionary handle and its operations live in [`dict`].
//!
//! Return-code convention: non-negative values are results (counts or
//! booleans), negative values are one of the `TAPDICT_ERR_*` codes.

use std::ffi::{c_char, CStr};
use std::path::Path;

use tapdict_core::dict::DictError;
use tapdict_core::engine::InputError;
use tapdict_core::settings::SettingsError;

pub mod dict;

#[cfg(test)]
mod tests;

pub use dict::*;

/// A pointer, length, count or capacity argument is invalid.
pub const TAPDICT_ERR_INVALID_ARGUMENT: i32 = -1;
/// The dictionary blob is truncated or malformed.
pub const TAPDICT_ERR_CORRUPT: i32 = -2;
/// A file could not be read.
pub const TAPDICT_ERR_IO: i32 = -3;
/// Settings TOML is invalid, or settings were already in use.
pub const TAPDICT_ERR_SETTINGS: i32 = -4;

#[derive(Debug, thiserror::Error)]
pub(crate) enum FfiError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error(transparent)]
    Dict(#[from] DictError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl FfiError {
    pub(crate) fn code(&self) -> i32 {
        match self {
            FfiError::InvalidArgument(_) | FfiError::Input(_) => TAPDICT_ERR_INVALID_ARGUMENT,
            FfiError::Dict(DictError::InvalidBuffer) => TAPDICT_ERR_INVALID_ARGUMENT,
            FfiError::Dict(DictError::Io(_)) | FfiError::Io { .. } => TAPDICT_ERR_IO,
            FfiError::Dict(DictError::Corrupt { .. } | DictError::UnsupportedLayout { .. }) => {
                TAPDICT_ERR_CORRUPT
            }
            FfiError::Settings(_) => TAPDICT_ERR_SETTINGS,
        }
    }
}

/// Collapse an FFI result into the return-code convention.
pub(crate) fn to_code(op: &'static str, result: Result<i32, FfiError>) -> i32 {
    result.unwrap_or_else(|e| {
        tracing::debug!(op, error = %e, "ffi call failed");
        e.code()
    })
}

/// A host count that must be at least 1.
pub(crate) fn positive(value: i32, what: &'static str) -> Result<usize, FfiError> {
    match usize::try_from(value) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(FfiError::InvalidArgument(what)),
    }
}

// --- Generic owned-pointer helpers for FFI resource management ---

/// Allocate a value on the heap and return a raw pointer suitable for FFI.
/// The caller is responsible for eventually passing the pointer to [`owned_drop`].
pub(crate) fn owned_new<T>(value: T) -> *mut T {
    Box::into_raw(Box::new(value))
}

/// Free a heap-allocated value previously created by [`owned_new`].
/// No-op if `ptr` is null.
///
/// # Safety
/// `ptr` must have been produced by [`owned_new`] (i.e. `Box::into_raw`)
/// and must not have been freed already.
pub(crate) unsafe fn owned_drop<T>(ptr: *mut T) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Safely convert a C string pointer to a `&str`.
/// Returns `None` if the pointer is null or contains invalid UTF-8.
pub(crate) unsafe fn cptr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Borrow `len` elements at `ptr`. A null pointer is accepted only for `len == 0`.
///
/// # Safety
/// A non-null `ptr` must point to `len` initialized elements that stay valid
/// and unaliased by writers for `'a`.
pub(crate) unsafe fn cptr_to_slice<'a, T>(ptr: *const T, len: usize) -> Option<&'a [T]> {
    match (ptr.is_null(), len) {
        (true, 0) => Some(&[]),
        (true, _) => None,
        (false, _) => Some(std::slice::from_raw_parts(ptr, len)),
    }
}

/// Mutable counterpart of [`cptr_to_slice`].
///
/// # Safety
/// A non-null `ptr` must point to `len` initialized elements that nothing
/// else accesses for `'a`.
pub(crate) unsafe fn cptr_to_slice_mut<'a, T>(ptr: *mut T, len: usize) -> Option<&'a mut [T]> {
    match (ptr.is_null(), len) {
        (true, 0) => Some(&mut []),
        (true, _) => None,
        (false, _) => Some(std::slice::from_raw_parts_mut(ptr, len)),
    }
}

// ---------------------------------------------------------------------------
// FFI boilerplate-reduction macros (crate-internal)
// ---------------------------------------------------------------------------

/// Validate one or more FFI arguments and bind them as safe Rust values,
/// returning `$on_err` from the **calling** function if any check fails.
///
/// # Supported argument forms
///
/// | Syntax | What it does |
/// |--------|--------------|
/// | `str: $name = $ptr` | Null-check `$ptr: *const c_char`, convert via [`cptr_to_str`] to `&str`, bind as `$name`. |
/// | `ref: $name = $ptr` | Null-check `$ptr: *const T`, dereference to `&T`, bind as `$name`. |
/// | `mut: $name = $ptr` | Null-check `$ptr: *mut T`, dereference to `&mut T`, bind as `$name`. |
/// | `slice: $name = [$ptr; $len]` | Borrow `$len` elements via [`cptr_to_slice`], bind as `&[T]`. |
/// | `slice_mut: $name = [$ptr; $len]` | Borrow via [`cptr_to_slice_mut`], bind as `&mut [T]`. |
///
/// # Examples
///
/// ```ignore
/// ffi_guard!(TAPDICT_ERR_INVALID_ARGUMENT;
///     ref:   handle = handle_ptr,
///     slice: word   = [word_ptr; word_len],
/// );
/// ```
macro_rules! ffi_guard {
    ($on_err:expr ; ) => {};

    ($on_err:expr ; str: $name:ident = $ptr:expr , $($rest:tt)*) => {
        let Some($name) = (unsafe { $crate::ffi::cptr_to_str($ptr) }) else {
            return $on_err;
        };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };

    ($on_err:expr ; ref: $name:ident = $ptr:expr , $($rest:tt)*) => {
        if $ptr.is_null() {
            return $on_err;
        }
        let $name = unsafe { &*$ptr };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };

    ($on_err:expr ; mut: $name:ident = $ptr:expr , $($rest:tt)*) => {
        if $ptr.is_null() {
            return $on_err;
        }
        let $name = unsafe { &mut *$ptr };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };

    ($on_err:expr ; slice: $name:ident = [$ptr:expr ; $len:expr] , $($rest:tt)*) => {
        let Some($name) = (unsafe { $crate::ffi::cptr_to_slice($ptr, $len) }) else {
            return $on_err;
        };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };

    ($on_err:expr ; slice_mut: $name:ident = [$ptr:expr ; $len:expr] , $($rest:tt)*) => {
        let Some($name) = (unsafe { $crate::ffi::cptr_to_slice_mut($ptr, $len) }) else {
            return $on_err;
        };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };
}

/// Define an `extern "C"` function that closes (frees) a heap-allocated resource.
macro_rules! ffi_close {
    ($fn_name:ident, $T:ty) => {
        #[no_mangle]
        pub extern "C" fn $fn_name(ptr: *mut $T) {
            unsafe { $crate::ffi::owned_drop(ptr) };
        }
    };
}

// Make macros available to sub-modules.
pub(crate) use ffi_close;
pub(crate) use ffi_guard;

// --- Top-level FFI functions ---

#[no_mangle]
pub extern "C" fn tapdict_version() -> *const c_char {
    c"0.1.0".as_ptr()
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn tapdict_trace_init(log_dir: *const c_char) {
    ffi_guard!(();
        str: dir_str = log_dir,
    );
    crate::trace_init::init_tracing(Path::new(dir_str));
}

/// Replace the embedded default settings with the TOML file at `path`.
///
/// Must run before the first handle is opened. Returns 0 on success.
#[no_mangle]
pub extern "C" fn tapdict_settings_load_config(path: *const c_char) -> i32 {
    ffi_guard!(TAPDICT_ERR_INVALID_ARGUMENT;
        str: path_str = path,
    );
    to_code("settings_load_config", load_settings(path_str))
}

fn load_settings(path: &str) -> Result<i32, FfiError> {
    let content = std::fs::read_to_string(path).map_err(|source| FfiError::Io {
        path: path.to_string(),
        source,
    })?;
    tapdict_core::settings::init_custom(content)?;
    Ok(0)
}
