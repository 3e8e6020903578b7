// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A discrete feature observed in training input. Callers tokenize;
/// the classifier never splits or normalizes text itself.
pub type Token = String;

/// A classification label.
pub type Category = String;

/// Frequency counters for a single category.
/// This is the "value" in the learned model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// token -> occurrence count. An absent token counts as zero; entries
    /// that reach zero are deleted rather than kept around.
    pub tokens: BTreeMap<Token, u64>,
    /// Sum of all counts in `tokens`.
    pub total_tokens: u64,
    /// Trained token occurrences credited to this category. Note this is
    /// bumped once per token occurrence, not once per training call.
    pub examples: u64,
}

impl CategoryRecord {
    /// Count for a token, zero when the token has never been trained here.
    pub fn token_count(&self, token: &str) -> u64 {
        self.tokens.get(token).copied().unwrap_or(0)
    }
}
