//! Predictive-text dictionary engine for on-screen keyboards.
//!
//! Words live in a compact, read-only binary trie ([`dict::BinaryDictionary`]).
//! The [`engine::Engine`] runs fuzzy searches over it driven by typed key
//! positions and their neighboring-key alternates, and resolves bigram
//! successors. [`predictor::Predictor`] layers the host-side retrieval policy
//! (missed-character retries, size limits) on top.

pub mod dict;
pub mod engine;
pub mod predictor;
pub mod settings;
#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
pub mod unicode;
