//! # Sahw Helper Core
//!
//! Pure matching logic for Sahw Helper: data models, text normalization,
//! the indexed knowledge base, TF-IDF similarity, and the mistake matcher.
//!
//! This crate performs no I/O and holds no global state. Callers build a
//! [`KnowledgeBase`](knowledge::KnowledgeBase) once from a
//! [`Corpus`](models::Corpus), wrap it in a [`Matcher`](matcher::Matcher),
//! and share that instance freely across threads.
//!
//! ```rust
//! use sahw_core::knowledge::KnowledgeBase;
//! use sahw_core::matcher::{MatchOutcome, Matcher};
//! use sahw_core::models::{default_categories, CorrectionEntry, Corpus};
//!
//! let kb = KnowledgeBase::build(Corpus {
//!     entries: vec![CorrectionEntry::new(
//!         "missed ruku",
//!         "Stand up, perform ruku, then do Sujud Ba'Adiyya.",
//!     )],
//!     categories: default_categories(),
//! })
//! .unwrap();
//! let matcher = Matcher::new(kb);
//!
//! assert!(matches!(matcher.resolve("I forgot rukū‘"), MatchOutcome::Matched { .. }));
//! assert_eq!(matcher.resolve(""), MatchOutcome::InvalidInput);
//! ```

pub mod knowledge;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod tfidf;
