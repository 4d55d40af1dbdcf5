//! C ABI for the tapdict predictive-text engine.
//!
//! The dictionary decoder, search engine and bigram lookup live in
//! [`tapdict_core`]; this crate packages them as a static or dynamic library
//! for keyboard hosts. All data crosses the boundary as flat, fixed-stride
//! arrays with explicit lengths.

// FFI functions perform null checks before dereferencing raw pointers.
// Clippy cannot verify this statically, so we allow it at crate level.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

pub mod ffi;
mod trace_init;

pub use ffi::*;
pub use tapdict_core::{dict, engine, predictor, settings};
