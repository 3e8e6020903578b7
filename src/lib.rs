// src/lib.rs

//! Naive Bayes classification over caller-tokenized input.
//!
//! The classifier accumulates per-category token frequencies through
//! [`Classifier::train`], supports withdrawing them again through
//! [`Classifier::untrain`], and estimates a normalized per-category
//! likelihood for an unseen token set through [`Classifier::classify`].
//! State lives in a pluggable key-value store ([`storage::KeyValueStore`]);
//! the bundled [`storage::MemoryStore`] persists to disk via
//! [`persistence`].
//!
//! The core is synchronous and single-threaded: operations are unguarded
//! read-then-write sequences against the shared store, and the store
//! handle is reference-counted without locks, so serializing writers is
//! the caller's job when a store is shared more widely.
//!
//! One sharp edge is kept on purpose for compatibility with the shipped
//! behavior: untraining a token in one category removes it from the
//! **global** vocabulary even when other categories still count it. The
//! remaining categories keep their frequencies, but the vocabulary size
//! used for smoothing shrinks.

pub mod core;
pub mod error;
pub mod persistence;
pub mod storage;

pub use crate::core::classifier::{Classifier, ClassifierOptions};
pub use crate::core::result::ProbabilityResult;
pub use crate::core::types::{Category, CategoryRecord, Token};
pub use crate::core::vocabulary::Vocabulary;
pub use crate::error::{ClassifierError, Result};
pub use crate::storage::{KeyValueStore, MemoryStore, Snapshot};
