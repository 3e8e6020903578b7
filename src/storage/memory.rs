// src/storage/memory.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{KeyValueStore, Snapshot};
use crate::core::types::{Category, CategoryRecord, Token};

/// In-memory key-value store. BTreeMaps keep enumeration order stable
/// (sorted by key), which the stats report and tie-breaking rely on, and
/// the whole structure serializes for persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    /// token -> per-category observation counts. The key set is the
    /// vocabulary; the per-category values are analytics only.
    tokens: BTreeMap<Token, BTreeMap<Category, u64>>,
    records: BTreeMap<Category, CategoryRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn contains_token(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }

    fn token_cardinality(&self) -> usize {
        self.tokens.len()
    }

    fn tokens(&self) -> Vec<Token> {
        self.tokens.keys().cloned().collect()
    }

    fn record_seen(&mut self, token: &str, category: &str) {
        *self
            .tokens
            .entry(token.to_string())
            .or_default()
            .entry(category.to_string())
            .or_insert(0) += 1;
    }

    fn delete_token(&mut self, token: &str) {
        self.tokens.remove(token);
    }

    fn get(&self, category: &str) -> Option<CategoryRecord> {
        self.records.get(category).cloned()
    }

    fn get_or_create(&mut self, category: &str) -> CategoryRecord {
        self.records.entry(category.to_string()).or_default().clone()
    }

    fn categories(&self) -> Vec<Category> {
        self.records.keys().cloned().collect()
    }

    fn upsert(&mut self, category: &str, token: &str) {
        let record = self.records.entry(category.to_string()).or_default();
        *record.tokens.entry(token.to_string()).or_insert(0) += 1;
        record.total_tokens += 1;
        record.examples += 1;
        // the token set learns about the token here, not in the classifier:
        // vocabulary growth is a side effect of the category write
        self.record_seen(token, category);
    }

    fn decrement(&mut self, category: &str, token: &str) {
        if let Some(record) = self.records.get_mut(category) {
            if let Some(count) = record.tokens.get_mut(token) {
                *count = count.saturating_sub(1);
                record.total_tokens = record.total_tokens.saturating_sub(1);
            }
        }
    }

    fn delete_token_from_category(&mut self, category: &str, token: &str) {
        if let Some(record) = self.records.get_mut(category) {
            record.tokens.remove(token);
        }
    }

    fn delete_category(&mut self, category: &str) {
        self.records.remove(category);
    }

    fn token_frequency(&self, token: &str, category: &str) -> u64 {
        self.records
            .get(category)
            .map(|record| record.token_count(token))
            .unwrap_or(0)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            category_count: self.records.len(),
            vocabulary_size: self.tokens.len(),
            total_examples: self.records.values().map(|record| record.examples).sum(),
        }
    }

    fn purge_below(&mut self, token: &str, threshold: u64) -> bool {
        let mut emptied = Vec::new();
        for (category, record) in self.records.iter_mut() {
            let count = record.token_count(token);
            if count > 0 && count <= threshold {
                record.tokens.remove(token);
                record.total_tokens = record.total_tokens.saturating_sub(count);
                if record.total_tokens < 1 {
                    emptied.push(category.clone());
                }
            }
        }
        for category in emptied {
            self.records.remove(&category);
        }
        self.records
            .values()
            .all(|record| !record.tokens.contains_key(token))
    }
}
