//! Corpus loading and matcher construction.
//!
//! The canonical corpus is embedded in the binary from `assets/corpus.toml`.
//! `[corpus].path` in the config replaces it with a file of the same shape.
//! Either way the corpus is parsed and indexed exactly once, at startup; a
//! malformed corpus aborts the process before any request is served.

use anyhow::{Context, Result};
use std::path::Path;

use sahw_core::knowledge::KnowledgeBase;
use sahw_core::matcher::{Matcher, MatcherOptions};
use sahw_core::models::Corpus;

use crate::config::Config;

/// The embedded canonical corpus.
pub const BUILTIN_CORPUS: &str = include_str!("../assets/corpus.toml");

/// Parse a corpus from TOML text.
pub fn parse_corpus(content: &str) -> Result<Corpus> {
    toml::from_str(content).with_context(|| "Failed to parse corpus")
}

/// Read a corpus file from disk.
pub fn read_corpus(path: &Path) -> Result<Corpus> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;
    parse_corpus(&content).with_context(|| format!("in {}", path.display()))
}

/// Build the knowledge base selected by the config.
pub fn load_knowledge_base(config: &Config) -> Result<KnowledgeBase> {
    let corpus = match &config.corpus.path {
        Some(path) => read_corpus(path)?,
        None => parse_corpus(BUILTIN_CORPUS)?,
    };

    let kb = KnowledgeBase::build(corpus).with_context(|| "Invalid corpus")?;

    for description in kb.overridden() {
        tracing::warn!(
            description = %description,
            "duplicate corpus description; later correction wins"
        );
    }

    tracing::info!(
        entries = kb.len(),
        categories = kb.categories().len(),
        "knowledge base built"
    );

    Ok(kb)
}

/// Build the one matcher instance the process uses.
pub fn build_matcher(config: &Config) -> Result<Matcher> {
    let kb = load_knowledge_base(config)?;
    Matcher::with_options(
        kb,
        MatcherOptions {
            threshold: config.matcher.threshold,
        },
    )
}
