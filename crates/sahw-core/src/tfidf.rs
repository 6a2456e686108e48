//! TF-IDF vectors and cosine similarity for the matcher's fallback path.
//!
//! The corpus side (vocabulary and per-term document frequencies of the
//! descriptions) is fitted once by [`TfIdfModel::fit`]. Scoring a query
//! folds the query in as one extra document, exactly as if the vectorizer
//! had been refitted over `descriptions + [query]`, without mutating the
//! model.
//!
//! # Weighting
//!
//! - Tokens: maximal runs of ASCII alphanumerics, at least two characters.
//! - Term frequency: raw counts.
//! - IDF (smoothed): `ln((1 + n) / (1 + df)) + 1`, where `n` counts the
//!   query document.
//! - Every vector is L2-normalized before the cosine is taken.

use std::collections::{BTreeMap, HashMap};

/// Tokenize text for vectorization.
///
/// Single-character tokens carry no weight here, mirroring the usual
/// `\b\w\w+\b` token pattern.
pub fn analyze(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| t.len() >= 2)
        .collect()
}

/// Document frequencies of a fixed set of documents.
#[derive(Debug, Clone, Default)]
pub struct TfIdfModel {
    /// Number of fitted documents.
    n_documents: usize,
    /// term -> number of fitted documents containing it.
    document_frequency: HashMap<String, usize>,
    /// Raw term counts of each fitted document, in fit order.
    term_counts: Vec<BTreeMap<String, usize>>,
}

impl TfIdfModel {
    /// Fit on already-normalized documents.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut term_counts = Vec::with_capacity(documents.len());

        for doc in documents {
            let counts = count_terms(doc.as_ref());
            for term in counts.keys() {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            term_counts.push(counts);
        }

        Self {
            n_documents: documents.len(),
            document_frequency,
            term_counts,
        }
    }

    /// Number of distinct terms across the fitted documents.
    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }

    /// Cosine similarity of `query` against every fitted document, in fit order.
    ///
    /// Terms that only occur in the query still count toward the query's
    /// norm, so a query full of unknown words scores low everywhere.
    pub fn similarities(&self, query: &str) -> Vec<f64> {
        let query_counts = count_terms(query);
        let n = (self.n_documents + 1) as f64;

        let idf = |term: &str| -> f64 {
            let mut df = self.document_frequency.get(term).copied().unwrap_or(0);
            if query_counts.contains_key(term) {
                df += 1;
            }
            ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0
        };

        let query_vec = weigh(&query_counts, &idf);

        self.term_counts
            .iter()
            .map(|counts| cosine_similarity(&query_vec, &weigh(counts, &idf)))
            .collect()
    }
}

fn count_terms(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in analyze(text) {
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Build an L2-normalized sparse tf-idf vector.
///
/// Sorted maps keep every floating-point sum in the same order from call to
/// call, so identical inputs give bit-identical scores.
fn weigh(counts: &BTreeMap<String, usize>, idf: &impl Fn(&str) -> f64) -> BTreeMap<String, f64> {
    let mut vec: BTreeMap<String, f64> = counts
        .iter()
        .map(|(term, &tf)| (term.clone(), tf as f64 * idf(term.as_str())))
        .collect();

    let norm = vec.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for w in vec.values_mut() {
            *w /= norm;
        }
    }
    vec
}

/// Compute cosine similarity between two sparse vectors.
///
/// Returns `0.0` when either vector is empty or has zero magnitude. For
/// non-negative weights the result lies in `[0.0, 1.0]`.
pub fn cosine_similarity(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, x)| large.get(term).map(|y| x * y))
        .sum();

    let norm_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.values().map(|x| x * x).sum::<f64>().sqrt();
    let denom = norm_a * norm_b;
    if denom < f64::EPSILON {
        return 0.0;
    }

    dot / denom
}
