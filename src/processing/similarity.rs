//! TF-IDF cosine similarity between two documents
//!
//! The corpus is exactly the two documents being compared. Terms are
//! lower-cased word tokens of two or more characters with English stop words
//! removed. Weights are raw counts times smoothed IDF,
//! `ln((1 + n) / (1 + df)) + 1`, and each vector is L2 normalised.

use crate::processing::nlp::NlpResources;
use std::collections::{BTreeMap, BTreeSet};

type TermCounts = BTreeMap<String, f64>;

pub struct TfIdfSimilarity<'a> {
    nlp: &'a NlpResources,
}

impl<'a> TfIdfSimilarity<'a> {
    pub fn new(nlp: &'a NlpResources) -> Self {
        Self { nlp }
    }

    /// Similarity in `[0, 1]`. Documents without usable terms score 0.
    pub fn similarity(&self, first: &str, second: &str) -> f64 {
        let first = self.term_counts(first);
        let second = self.term_counts(second);
        if first.is_empty() || second.is_empty() {
            return 0.0;
        }

        let corpus = [&first, &second];
        let vocabulary: BTreeSet<&String> = first.keys().chain(second.keys()).collect();
        let n_docs = corpus.len() as f64;

        let idf: BTreeMap<&String, f64> = vocabulary
            .iter()
            .map(|term| {
                let df = corpus.iter().filter(|doc| doc.contains_key(*term)).count() as f64;
                (*term, ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0)
            })
            .collect();

        let first = weigh(&first, &idf);
        let second = weigh(&second, &idf);

        let dot: f64 = first
            .iter()
            .filter_map(|(term, weight)| second.get(term).map(|other| weight * other))
            .sum();

        // Both vectors are unit length, so the dot product is the cosine.
        dot.clamp(0.0, 1.0)
    }

    fn term_counts(&self, text: &str) -> TermCounts {
        let lower = text.to_lowercase();
        let mut counts = TermCounts::new();

        for token in self.nlp.tfidf_token.find_iter(&lower) {
            let token = token.as_str();
            if self.nlp.tfidf_stopwords.contains(token) {
                continue;
            }
            *counts.entry(token.to_string()).or_insert(0.0) += 1.0;
        }

        counts
    }
}

fn weigh<'t>(counts: &'t TermCounts, idf: &BTreeMap<&String, f64>) -> BTreeMap<&'t String, f64> {
    let mut weights: BTreeMap<&String, f64> = counts
        .iter()
        .map(|(term, tf)| (term, tf * idf.get(term).copied().unwrap_or(1.0)))
        .collect();

    let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        weights.values_mut().for_each(|w| *w /= norm);
    }

    weights
}
