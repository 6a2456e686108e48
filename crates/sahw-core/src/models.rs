//! Core data models used throughout Sahw Helper.
//!
//! These types represent the correction entries and topic categories that a
//! [`KnowledgeBase`](crate::knowledge::KnowledgeBase) is built from, in the
//! serialized shape the corpus loader reads them in.

use serde::{Deserialize, Serialize};

/// A single `(mistake description → correction)` pair.
///
/// The description is the identity of the entry: it is what the keyword
/// index points at and what is shown back to the user on a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionEntry {
    /// Short phrase naming the mistake, e.g. `"missed sujud"`.
    pub description: String,
    /// The prescribed remedial action.
    pub correction: String,
}

impl CorrectionEntry {
    pub fn new(description: impl Into<String>, correction: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            correction: correction.into(),
        }
    }
}

/// A coarse topic label and the surface tokens that signal it.
///
/// Categories only detect the *presence* of a topic in the input; they never
/// select an entry on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCategory {
    /// Category label, also used as the representative token for the
    /// keyword index lookup.
    pub label: String,
    /// Substrings whose presence in normalized input signals this category.
    pub synonyms: Vec<String>,
}

impl KeywordCategory {
    pub fn new(label: impl Into<String>, synonyms: &[&str]) -> Self {
        Self {
            label: label.into(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Raw corpus as supplied by a loader, before indexing.
///
/// Order matters: entry order decides keyword-index precedence and
/// similarity tie-breaking, category order decides which detected category
/// is tried first on the exact path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub entries: Vec<CorrectionEntry>,
    #[serde(default)]
    pub categories: Vec<KeywordCategory>,
}

/// The category table every built-in corpus ships with.
pub fn default_categories() -> Vec<KeywordCategory> {
    vec![
        KeywordCategory::new("sujud", &["sujud", "sajda"]),
        KeywordCategory::new("ruku", &["ruku"]),
        KeywordCategory::new("rakaah", &["rakaah", "rakah", "rakats"]),
        KeywordCategory::new("qabliyya", &["qabliyya"]),
        KeywordCategory::new("baadiyya", &["baadiyya"]),
    ]
}
