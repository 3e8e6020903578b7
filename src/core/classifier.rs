// src/core/classifier.rs
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::rc::Rc;

use tracing::debug;

use crate::core::category_store::CategoryStore;
use crate::core::result::{normalize, ProbabilityResult};
use crate::core::types::Category;
use crate::core::vocabulary::Vocabulary;
use crate::error::{ClassifierError, Result};
use crate::persistence::{load_from_disk, save_to_disk};
use crate::storage::{KeyValueStore, MemoryStore};

/// Tuning fixed at construction time.
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    /// Count each token at most once per call (Bernoulli-style presence)
    /// instead of every occurrence (multinomial).
    pub binarized: bool,
    /// Ignore empirical category frequencies; every known category is
    /// equally likely a priori.
    pub assume_uniform_priors: bool,
    /// Additive (Laplace) smoothing constant.
    pub smoothing_k: f64,
    /// Report the vocabulary size as ln(cardinality).
    pub log_vocab: bool,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            binarized: false,
            assume_uniform_priors: false,
            smoothing_k: 1.0,
            log_vocab: false,
        }
    }
}

/// Naive Bayes classifier over caller-tokenized input, composed of a
/// vocabulary and a category store sharing one backing key-value store.
pub struct Classifier<S: KeyValueStore = MemoryStore> {
    store: Rc<RefCell<S>>,
    vocab: Vocabulary<S>,
    data: CategoryStore<S>,
    options: ClassifierOptions,
    model_path: Option<PathBuf>,
}

impl Classifier<MemoryStore> {
    pub fn new(options: ClassifierOptions) -> Self {
        Self::with_store(MemoryStore::new(), options)
    }

    /// Load a previously saved model, falling back to an empty one when
    /// the file is missing or unreadable. The path is remembered so
    /// `save_model` knows where to write.
    pub fn from_file_or_new(path: impl Into<PathBuf>, options: ClassifierOptions) -> Self {
        let path = path.into();
        let store = load_from_disk(&path).unwrap_or_else(|_| MemoryStore::new());
        let mut classifier = Self::with_store(store, options);
        classifier.model_path = Some(path);
        classifier
    }

    pub fn save_model(&self) -> Result<()> {
        match &self.model_path {
            Some(path) => save_to_disk(&self.store.borrow(), path),
            // nothing to do without a configured path
            None => Ok(()),
        }
    }
}

impl<S: KeyValueStore> Classifier<S> {
    /// Wire the components onto one shared store handle. Category writes
    /// feed the vocabulary through the store itself, so the two views stay
    /// consistent without the classifier relaying updates.
    pub fn with_store(store: S, options: ClassifierOptions) -> Self {
        let store = Rc::new(RefCell::new(store));
        let vocab = Vocabulary::new(Rc::clone(&store), options.log_vocab);
        let data = CategoryStore::new(Rc::clone(&store));
        Self {
            store,
            vocab,
            data,
            options,
            model_path: None,
        }
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    pub fn vocabulary(&self) -> &Vocabulary<S> {
        &self.vocab
    }

    pub fn categories(&self) -> Vec<Category> {
        self.data.categories()
    }

    /// Credit each token occurrence to the category.
    pub fn train<T: AsRef<str>>(&mut self, tokens: &[T], category: &str) {
        let tokens = self.effective_tokens(tokens);
        for token in &tokens {
            self.data.add_token_to_category(category, token);
        }
        debug!(category, count = tokens.len(), "trained tokens");
    }

    /// Withdraw previously trained tokens from the category. A token that
    /// was never trained there is skipped silently. A token that was
    /// trained there leaves the **global** vocabulary even when other
    /// categories still count it; preserved deliberately, see crate docs.
    pub fn untrain<T: AsRef<str>>(&mut self, tokens: &[T], category: &str) {
        let tokens = self.effective_tokens(tokens);
        for token in &tokens {
            if self.data.token_trained(token, category) {
                self.vocab.remove(token);
                self.data.remove_token_from_category(category, token);
            }
        }
        debug!(category, count = tokens.len(), "untrained tokens");
    }

    /// Relative likelihood per known category for an unseen token set.
    /// Unseen tokens contribute smoothing-only mass, never an error.
    pub fn classify<T: AsRef<str>>(&self, tokens: &[T]) -> Result<ProbabilityResult> {
        let tokens = self.effective_tokens(tokens);
        let snapshot = self.data.snapshot();
        if snapshot.category_count == 0 || snapshot.total_examples == 0 {
            return Err(ClassifierError::InsufficientTrainingData);
        }
        let vocab_size = snapshot.vocabulary_size as f64;
        let total_examples = snapshot.total_examples as f64;
        let uniform_prior = (1.0 / snapshot.category_count as f64).ln();

        let mut raw = BTreeMap::new();
        for category in self.data.categories() {
            let record = self.data.get(&category).unwrap_or_default();
            let log_prior = if self.options.assume_uniform_priors {
                uniform_prior
            } else {
                (record.examples as f64 / total_examples).ln()
            };
            let denominator = record.total_tokens as f64 + self.options.smoothing_k * vocab_size;
            let mut log_likelihood = 0.0;
            for token in &tokens {
                let count = record.token_count(token) as f64;
                log_likelihood += ((count + self.options.smoothing_k) / denominator).ln();
            }
            raw.insert(category, log_likelihood + log_prior);
        }
        normalize(raw)
    }

    /// Drop every token whose count is at or under `threshold` in all the
    /// categories holding it. Two-phase (collect, then delete) so the
    /// vocabulary is not mutated while being walked.
    pub fn prune_below(&mut self, threshold: i64) -> Result<()> {
        if threshold < 0 {
            return Err(ClassifierError::InvalidThreshold(threshold));
        }
        let threshold = threshold as u64;
        let mut orphaned = Vec::new();
        for token in self.vocab.tokens() {
            if self.data.purge_below(&token, threshold) {
                orphaned.push(token);
            }
        }
        for token in &orphaned {
            self.vocab.remove(token);
        }
        debug!(removed = orphaned.len(), "pruned vocabulary");
        Ok(())
    }

    pub fn delete_category(&mut self, category: &str) {
        self.data.delete_category(category);
    }

    /// The literal per-category stats report; see `CategoryStore`.
    pub fn category_stats(&mut self) -> String {
        self.data.category_stats()
    }

    /// Deduplicates per call when binarized, keeping first occurrences in
    /// input order.
    fn effective_tokens<T: AsRef<str>>(&self, tokens: &[T]) -> Vec<String> {
        if self.options.binarized {
            let mut seen = HashSet::new();
            tokens
                .iter()
                .map(|token| token.as_ref().to_string())
                .filter(|token| seen.insert(token.clone()))
                .collect()
        } else {
            tokens
                .iter()
                .map(|token| token.as_ref().to_string())
                .collect()
        }
    }
}
