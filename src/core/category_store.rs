// src/core/category_store.rs
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::types::{Category, CategoryRecord};
use crate::storage::{KeyValueStore, Snapshot};

/// Per-category counters layered over the shared store: token counts,
/// totals and example counts, with lazy materialization and cascading
/// deletes when a category runs dry.
pub struct CategoryStore<S> {
    store: Rc<RefCell<S>>,
}

impl<S: KeyValueStore> CategoryStore<S> {
    pub fn new(store: Rc<RefCell<S>>) -> Self {
        Self { store }
    }

    pub fn categories(&self) -> Vec<Category> {
        self.store.borrow().categories()
    }

    /// Read-only lookup; never materializes the category. Use this to
    /// peek, and `get_or_create` when materialization is intended.
    pub fn get(&self, category: &str) -> Option<CategoryRecord> {
        self.store.borrow().get(category)
    }

    /// Reading through here materializes an empty record when the category
    /// is unknown. The count accessors below share this behavior, so
    /// probing an unknown category leaves a phantom zero-count record
    /// behind. That is the documented contract, not an accident.
    pub fn get_or_create(&mut self, category: &str) -> CategoryRecord {
        self.store.borrow_mut().get_or_create(category)
    }

    pub fn token_trained(&self, token: &str, category: &str) -> bool {
        self.get(category)
            .map(|record| record.tokens.contains_key(token))
            .unwrap_or(false)
    }

    pub fn token_frequency(&self, token: &str, category: &str) -> u64 {
        self.store.borrow().token_frequency(token, category)
    }

    /// One trained token occurrence. The store applies the counter bumps
    /// as a single write and feeds the vocabulary itself.
    pub fn add_token_to_category(&mut self, category: &str, token: &str) {
        self.store.borrow_mut().upsert(category, token);
    }

    /// Decrement, then cascade: a token entry that drops under 1 is
    /// deleted, and a category whose total drops under 1 is deleted whole.
    pub fn remove_token_from_category(&mut self, category: &str, token: &str) {
        let mut store = self.store.borrow_mut();
        store.decrement(category, token);
        let record = store.get_or_create(category);
        if record.token_count(token) < 1 {
            store.delete_token_from_category(category, token);
        }
        if record.total_tokens < 1 {
            store.delete_category(category);
        }
    }

    /// Get-or-create semantics, like `get_or_create`.
    pub fn example_count(&mut self, category: &str) -> u64 {
        self.store.borrow_mut().get_or_create(category).examples
    }

    /// Get-or-create semantics, like `get_or_create`.
    pub fn token_count(&mut self, category: &str) -> u64 {
        self.store.borrow_mut().get_or_create(category).total_tokens
    }

    pub fn total_examples(&mut self) -> u64 {
        self.categories()
            .iter()
            .map(|category| self.example_count(category))
            .sum()
    }

    pub fn delete_category(&mut self, category: &str) {
        self.store.borrow_mut().delete_category(category);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.borrow().snapshot()
    }

    pub fn purge_below(&mut self, token: &str, threshold: u64) -> bool {
        self.store.borrow_mut().purge_below(token, threshold)
    }

    /// One line per category, in enumeration order:
    /// `For category <C>, <E> examples (<P>% of the total) and <T> total_tokens`
    pub fn category_stats(&mut self) -> String {
        let total_examples = self.total_examples();
        let mut lines = Vec::new();
        for category in self.categories() {
            let examples = self.example_count(&category);
            let tokens = self.token_count(&category);
            let share = 100.0 * examples as f64 / total_examples as f64;
            lines.push(format!(
                "For category {category}, {examples} examples ({share:.2}% of the total) and {tokens} total_tokens"
            ));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> CategoryStore<MemoryStore> {
        CategoryStore::new(Rc::new(RefCell::new(MemoryStore::new())))
    }

    fn sum_of_counts(record: &CategoryRecord) -> u64 {
        record.tokens.values().sum()
    }

    #[test]
    fn totals_stay_sum_consistent() {
        let mut data = store();
        for token in ["buy", "now", "buy", "cheap"] {
            data.add_token_to_category("spam", token);
        }
        data.remove_token_from_category("spam", "now");
        let record = data.get("spam").unwrap();
        assert_eq!(record.total_tokens, sum_of_counts(&record));
        assert_eq!(record.total_tokens, 3);
    }

    #[test]
    fn token_entry_dropping_under_one_is_deleted() {
        let mut data = store();
        data.add_token_to_category("spam", "buy");
        data.add_token_to_category("spam", "now");
        data.remove_token_from_category("spam", "buy");
        let record = data.get("spam").unwrap();
        assert!(!record.tokens.contains_key("buy"));
        assert_eq!(record.total_tokens, 1);
    }

    #[test]
    fn category_dropping_under_one_total_is_deleted() {
        let mut data = store();
        data.add_token_to_category("spam", "buy");
        data.remove_token_from_category("spam", "buy");
        assert!(data.get("spam").is_none());
        assert!(!data.categories().contains(&"spam".to_string()));
    }

    #[test]
    fn accessors_materialize_phantom_categories() {
        let mut data = store();
        assert_eq!(data.example_count("ghost"), 0);
        // the probe above left an empty record behind; documented contract
        assert_eq!(data.categories(), vec!["ghost".to_string()]);
        assert!(data.get("other").is_none());
        assert_eq!(data.categories().len(), 1);
    }

    #[test]
    fn total_examples_sums_all_categories() {
        let mut data = store();
        data.add_token_to_category("spam", "buy");
        data.add_token_to_category("spam", "now");
        data.add_token_to_category("ham", "meeting");
        assert_eq!(data.total_examples(), 3);
    }

    #[test]
    fn stats_lines_total_one_hundred_percent() {
        let mut data = store();
        for token in ["buy", "now", "cheap"] {
            data.add_token_to_category("spam", token);
        }
        data.add_token_to_category("ham", "meeting");
        let stats = data.category_stats();
        assert_eq!(
            stats,
            "For category ham, 1 examples (25.00% of the total) and 1 total_tokens\n\
             For category spam, 3 examples (75.00% of the total) and 3 total_tokens"
        );
    }
}
