//! The knowledge base: correction entries, keyword index, and categories.
//!
//! A [`KnowledgeBase`] is built once from a [`Corpus`] and never changes
//! afterwards. Everything the matcher needs per call is precomputed here:
//!
//! 1. Entries are consolidated: a repeated description overrides the earlier
//!    correction but keeps the earlier position.
//! 2. Each description is normalized and split on whitespace; every token
//!    not yet indexed maps to that entry (first writer wins).
//! 3. The normalized descriptions are fitted into a [`TfIdfModel`].
//!
//! ```rust
//! use sahw_core::knowledge::KnowledgeBase;
//! use sahw_core::models::{default_categories, CorrectionEntry, Corpus};
//!
//! let kb = KnowledgeBase::build(Corpus {
//!     entries: vec![CorrectionEntry::new("missed sujud", "Sit and prostrate.")],
//!     categories: default_categories(),
//! })
//! .unwrap();
//!
//! assert_eq!(kb.lookup_by_keyword("sujud").unwrap().description, "missed sujud");
//! assert_eq!(kb.categories_present_in("i forgot my sajda"), vec!["sujud"]);
//! ```

use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::models::{CorrectionEntry, Corpus, KeywordCategory};
use crate::normalize::{normalize, tokens};
use crate::tfidf::TfIdfModel;

/// Immutable, indexed correction corpus.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<CorrectionEntry>,
    /// normalized token -> position in `entries`.
    keyword_index: HashMap<String, usize>,
    categories: Vec<KeywordCategory>,
    tfidf: TfIdfModel,
    /// Descriptions that appeared more than once in the corpus.
    overridden: Vec<String>,
}

impl KnowledgeBase {
    /// Validate and index a corpus.
    ///
    /// Fails on an empty corpus, blank descriptions or corrections, and
    /// categories without a label or synonyms. These are load-time faults;
    /// nothing after construction can fail.
    pub fn build(corpus: Corpus) -> Result<Self> {
        if corpus.entries.is_empty() {
            bail!("corpus has no correction entries");
        }

        let mut entries: Vec<CorrectionEntry> = Vec::with_capacity(corpus.entries.len());
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut overridden = Vec::new();

        for (i, entry) in corpus.entries.into_iter().enumerate() {
            if entry.description.trim().is_empty() {
                bail!("entry {} has an empty description", i);
            }
            if entry.correction.trim().is_empty() {
                bail!("entry '{}' has an empty correction", entry.description);
            }

            match positions.get(&entry.description).copied() {
                Some(pos) => {
                    overridden.push(entry.description.clone());
                    entries[pos].correction = entry.correction;
                }
                None => {
                    positions.insert(entry.description.clone(), entries.len());
                    entries.push(entry);
                }
            }
        }

        let mut categories = Vec::with_capacity(corpus.categories.len());
        for category in corpus.categories {
            let label = normalize(&category.label);
            if label.trim().is_empty() {
                bail!("category '{}' has an empty label", category.label);
            }
            let synonyms: Vec<String> = category
                .synonyms
                .iter()
                .map(|s| normalize(s))
                .filter(|s| !s.trim().is_empty())
                .collect();
            if synonyms.is_empty() {
                bail!("category '{}' has no synonyms", category.label);
            }
            categories.push(KeywordCategory { label, synonyms });
        }

        let normalized: Vec<String> = entries.iter().map(|e| normalize(&e.description)).collect();

        let mut keyword_index: HashMap<String, usize> = HashMap::new();
        for (pos, description) in normalized.iter().enumerate() {
            for token in tokens(description) {
                keyword_index.entry(token.to_string()).or_insert(pos);
            }
        }

        let tfidf = TfIdfModel::fit(&normalized);

        Ok(Self {
            entries,
            keyword_index,
            categories,
            tfidf,
            overridden,
        })
    }

    /// Exact lookup of a single normalized token.
    pub fn lookup_by_keyword(&self, word: &str) -> Option<&CorrectionEntry> {
        self.keyword_index.get(word).map(|&pos| &self.entries[pos])
    }

    /// All entries in corpus order.
    pub fn entries(&self) -> &[CorrectionEntry] {
        &self.entries
    }

    pub fn categories(&self) -> &[KeywordCategory] {
        &self.categories
    }

    /// Labels of every category with at least one synonym occurring as a
    /// substring of `normalized_text`, in category definition order.
    ///
    /// Containment, not whole-word: `"sujudi"` signals `sujud`.
    pub fn categories_present_in(&self, normalized_text: &str) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| c.synonyms.iter().any(|s| normalized_text.contains(s.as_str())))
            .map(|c| c.label.as_str())
            .collect()
    }

    /// Descriptions whose correction was replaced by a later duplicate.
    pub fn overridden(&self) -> &[String] {
        &self.overridden
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn tfidf(&self) -> &TfIdfModel {
        &self.tfidf
    }
}
