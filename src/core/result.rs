// src/core/result.rs
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::types::Category;
use crate::error::{ClassifierError, Result};

/// Per-category scores for one inference call. A wrapper struct rather
/// than a bare map so the argmax policy lives next to the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityResult {
    probabilities: BTreeMap<Category, f64>,
}

impl ProbabilityResult {
    pub(crate) fn new(probabilities: BTreeMap<Category, f64>) -> Self {
        Self { probabilities }
    }

    /// Score for a category, `None` when the category was unknown at
    /// inference time.
    pub fn probability(&self, category: &str) -> Option<f64> {
        self.probabilities.get(category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.probabilities
            .iter()
            .map(|(category, &score)| (category.as_str(), score))
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Category with the highest score. Ties go to the lexicographically
    /// smallest name so repeated runs agree.
    pub fn best_category(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (category, &score) in &self.probabilities {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((category, score)),
            }
        }
        best.map(|(category, _)| category)
    }

    pub fn into_inner(self) -> BTreeMap<Category, f64> {
        self.probabilities
    }
}

/// Ratio normalization from raw per-category scores (log-likelihood sums
/// plus log-prior, so generally negative). This is the shipped behavior,
/// kept exactly: divide the score sum by each score, then rescale those
/// ratios to sum to one. It is not a softmax and must not become one
/// without a compatibility decision; swapping it only touches this
/// function. A raw score of exactly zero is rejected before any division.
pub(crate) fn normalize(raw: BTreeMap<Category, f64>) -> Result<ProbabilityResult> {
    let normalizer: f64 = raw.values().sum();
    let mut intermediate = BTreeMap::new();
    let mut renormalizer = 0.0;
    for (category, score) in raw {
        if score == 0.0 {
            return Err(ClassifierError::DegenerateNormalization { category });
        }
        let ratio = normalizer / score;
        renormalizer += ratio;
        intermediate.insert(category, ratio);
    }
    let finals = intermediate
        .into_iter()
        .map(|(category, ratio)| (category, ratio / renormalizer))
        .collect();
    Ok(ProbabilityResult::new(finals))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_of(pairs: &[(&str, f64)]) -> ProbabilityResult {
        ProbabilityResult::new(
            pairs
                .iter()
                .map(|(category, score)| (category.to_string(), *score))
                .collect(),
        )
    }

    #[test]
    fn normalized_scores_sum_to_one() {
        let mut raw = BTreeMap::new();
        raw.insert("spam".to_string(), -1.8);
        raw.insert("ham".to_string(), -2.5);
        let result = normalize(raw).unwrap();
        let sum: f64 = result.iter().map(|(_, score)| score).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        // a less negative raw score must come out ahead
        assert!(result.probability("spam").unwrap() > result.probability("ham").unwrap());
    }

    #[test]
    fn equal_raw_scores_normalize_equally() {
        let mut raw = BTreeMap::new();
        raw.insert("spam".to_string(), 0.5_f64.ln());
        raw.insert("ham".to_string(), 0.5_f64.ln());
        let result = normalize(raw).unwrap();
        assert_eq!(
            result.probability("spam").unwrap(),
            result.probability("ham").unwrap()
        );
    }

    #[test]
    fn zero_raw_score_is_degenerate() {
        let mut raw = BTreeMap::new();
        raw.insert("only".to_string(), 0.0);
        match normalize(raw) {
            Err(ClassifierError::DegenerateNormalization { category }) => {
                assert_eq!(category, "only");
            }
            other => panic!("expected degenerate normalization, got {other:?}"),
        }
    }

    #[test]
    fn best_category_takes_the_maximum() {
        let result = result_of(&[("ham", 0.3), ("spam", 0.7)]);
        assert_eq!(result.best_category(), Some("spam"));
    }

    #[test]
    fn best_category_tie_breaks_lexicographically() {
        let result = result_of(&[("b", 0.5), ("a", 0.5)]);
        assert_eq!(result.best_category(), Some("a"));
    }

    #[test]
    fn best_category_of_empty_result_is_none() {
        let result = result_of(&[]);
        assert_eq!(result.best_category(), None);
    }
}
