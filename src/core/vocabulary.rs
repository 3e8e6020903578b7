// src/core/vocabulary.rs
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::types::Token;
use crate::storage::KeyValueStore;

/// View over the store's token set: the distinct tokens the model has ever
/// observed. Entries are added by training activity (through the store's
/// own side effects) and leave only through untraining or pruning.
pub struct Vocabulary<S> {
    store: Rc<RefCell<S>>,
    log_size: bool,
}

impl<S: KeyValueStore> Vocabulary<S> {
    pub fn new(store: Rc<RefCell<S>>, log_size: bool) -> Self {
        Self { store, log_size }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.store.borrow().contains_token(token)
    }

    /// Cardinality of the token set, or its natural log when the
    /// classifier was built with `log_vocab`. The log form is a stable
    /// growth metric for very large vocabularies; inference always reads
    /// the raw size from the snapshot.
    pub fn size(&self) -> f64 {
        let count = self.store.borrow().token_cardinality() as f64;
        if self.log_size {
            count.ln()
        } else {
            count
        }
    }

    /// Bump the per-(token, category) observation counter. Analytics only;
    /// the inference path never reads these counts.
    pub fn seen_token(&mut self, token: &str, category: &str) {
        self.store.borrow_mut().record_seen(token, category);
    }

    /// Drops the token unconditionally, even when some category still
    /// counts it. Untraining relies on exactly this behavior; see the
    /// crate docs for why it is a sharp edge.
    pub fn remove(&mut self, token: &str) {
        self.store.borrow_mut().delete_token(token);
    }

    /// All tokens in stable enumeration order, owned so callers may mutate
    /// the vocabulary while walking the result.
    pub fn tokens(&self) -> Vec<Token> {
        self.store.borrow().tokens()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn vocabulary(log_size: bool) -> Vocabulary<MemoryStore> {
        Vocabulary::new(Rc::new(RefCell::new(MemoryStore::new())), log_size)
    }

    #[test]
    fn size_counts_distinct_tokens() {
        let mut vocab = vocabulary(false);
        vocab.seen_token("buy", "spam");
        vocab.seen_token("buy", "ham");
        vocab.seen_token("now", "spam");
        assert_eq!(vocab.size(), 2.0);
        assert!(vocab.contains("buy"));
        assert!(!vocab.contains("meeting"));
    }

    #[test]
    fn log_scaled_size() {
        let mut vocab = vocabulary(true);
        for token in ["a", "b", "c", "d"] {
            vocab.seen_token(token, "spam");
        }
        assert!((vocab.size() - 4.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn remove_is_unconditional() {
        let mut vocab = vocabulary(false);
        vocab.seen_token("buy", "spam");
        vocab.remove("buy");
        assert!(!vocab.contains("buy"));
        assert_eq!(vocab.size(), 0.0);
    }

    #[test]
    fn traversal_is_restartable() {
        let mut vocab = vocabulary(false);
        vocab.seen_token("now", "spam");
        vocab.seen_token("buy", "spam");
        let first = vocab.tokens();
        let second = vocab.tokens();
        assert_eq!(first, second);
        assert_eq!(first, vec!["buy".to_string(), "now".to_string()]);
    }
}
