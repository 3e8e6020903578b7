//! The contract the statistical core requires of its backing key-value
//! store, plus the in-memory implementation shipped with the crate.

pub mod memory;

pub use memory::MemoryStore;

use crate::core::types::{Category, CategoryRecord, Token};

/// Aggregate read used by inference to avoid re-walking the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub category_count: usize,
    pub vocabulary_size: usize,
    pub total_examples: u64,
}

/// Exactly the surface the classifier needs from a key-value store.
///
/// Calls are synchronous and individually consistent, but sequences of
/// calls are not atomic with respect to other holders of the same backing
/// store; see the crate-level notes on concurrency.
pub trait KeyValueStore {
    // token-set half

    fn contains_token(&self, token: &str) -> bool;

    /// Number of distinct tokens ever trained and not since removed.
    fn token_cardinality(&self) -> usize;

    /// All tokens, owned, in stable enumeration order. Callers may mutate
    /// the store while walking the result.
    fn tokens(&self) -> Vec<Token>;

    /// Bump the per-(token, category) observation counter by one. Feeds
    /// vocabulary analytics only, never inference.
    fn record_seen(&mut self, token: &str, category: &str);

    /// Drop the token from the token set, whatever its category counts say.
    fn delete_token(&mut self, token: &str);

    // category-record half

    /// Read-only lookup; never materializes the category.
    fn get(&self, category: &str) -> Option<CategoryRecord>;

    /// Returns the record, materializing an empty one when absent.
    fn get_or_create(&mut self, category: &str) -> CategoryRecord;

    fn categories(&self) -> Vec<Category>;

    /// One trained token occurrence, applied as a single write: +1 token
    /// count, +1 total, +1 examples, and the token enters the shared token
    /// set as a side effect of the same write.
    fn upsert(&mut self, category: &str, token: &str);

    /// -1 on the token count and the total. Counts never go below zero.
    fn decrement(&mut self, category: &str, token: &str);

    /// Drop the token entry from the category record.
    fn delete_token_from_category(&mut self, category: &str, token: &str);

    fn delete_category(&mut self, category: &str);

    /// Count of `token` in `category`; zero when either is absent.
    fn token_frequency(&self, token: &str, category: &str) -> u64;

    fn snapshot(&self) -> Snapshot;

    /// Remove `token` from every category counting it at or under
    /// `threshold`. True when the token is left in no category at all,
    /// signalling the caller to drop it from the vocabulary too.
    fn purge_below(&mut self, token: &str, threshold: u64) -> bool;
}
