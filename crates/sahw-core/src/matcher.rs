//! Mistake matcher: maps free-form input to one knowledge-base entry.
//!
//! The matcher holds only an immutable [`KnowledgeBase`] and its options, so
//! a single instance can be shared by every caller without locking.
//!
//! # Resolution Algorithm
//!
//! 1. Empty (after trimming) input → [`MatchOutcome::InvalidInput`].
//! 2. Normalize (see [`normalize`](crate::normalize::normalize)).
//! 3. Detect categories by synonym substring; none → [`MatchOutcome::NoKeywords`].
//! 4. Exact path: for each detected category in definition order, look up
//!    its label in the keyword index. First hit wins.
//! 5. Similarity fallback: TF-IDF cosine of the input against every
//!    description. The first maximum wins if it is strictly greater than
//!    the threshold; otherwise [`MatchOutcome::NoMatch`].

use std::fmt;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::knowledge::KnowledgeBase;
use crate::normalize::normalize;

/// Default similarity acceptance threshold (strict `>`).
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Matcher tuning, decoupled from application config.
#[derive(Debug, Clone, Copy)]
pub struct MatcherOptions {
    /// Best cosine score must be strictly greater than this to match.
    pub threshold: f64,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Result of resolving one input. Every variant is an expected value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Input was empty or whitespace only.
    InvalidInput,
    /// No category synonym occurs in the input.
    NoKeywords,
    /// An entry was found by keyword or accepted by similarity.
    Matched {
        description: String,
        correction: String,
    },
    /// Categories were present but nothing matched confidently.
    NoMatch,
}

impl MatchOutcome {
    /// Machine-readable tag used by the HTTP response and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            MatchOutcome::InvalidInput => "invalid_input",
            MatchOutcome::NoKeywords => "no_keywords",
            MatchOutcome::Matched { .. } => "matched",
            MatchOutcome::NoMatch => "no_match",
        }
    }

    /// User-facing message for this outcome.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::InvalidInput => {
                write!(f, "Invalid input. Please enter a prayer mistake.")
            }
            MatchOutcome::NoKeywords => write!(f, "No relevant keywords found in your input."),
            MatchOutcome::Matched {
                description,
                correction,
            } => write!(f, "Mistake: {}\nCorrection: {}", description, correction),
            MatchOutcome::NoMatch => {
                write!(f, "No specific correction found for this mistake type.")
            }
        }
    }
}

/// How a match was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchPath {
    /// The category label hit the keyword index.
    Keyword { token: String },
    /// The similarity fallback accepted the best-scoring entry.
    Similarity { score: f64 },
}

/// Outcome plus the intermediate steps that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub outcome: MatchOutcome,
    /// Normalized input (empty for [`MatchOutcome::InvalidInput`]).
    pub normalized: String,
    /// Detected category labels, in definition order.
    pub categories: Vec<String>,
    /// Set when the outcome is [`MatchOutcome::Matched`].
    pub path: Option<MatchPath>,
    /// Best similarity score, set whenever the fallback ran.
    pub best_score: Option<f64>,
}

/// Resolves mistake descriptions against a knowledge base.
#[derive(Debug, Clone)]
pub struct Matcher {
    kb: KnowledgeBase,
    options: MatcherOptions,
}

impl Matcher {
    /// Build a matcher with the default threshold.
    pub fn new(kb: KnowledgeBase) -> Self {
        Self {
            kb,
            options: MatcherOptions::default(),
        }
    }

    /// Build a matcher with explicit options.
    ///
    /// Fails if the threshold is not a number in `[0.0, 1.0]`.
    pub fn with_options(kb: KnowledgeBase, options: MatcherOptions) -> Result<Self> {
        if !(0.0..=1.0).contains(&options.threshold) {
            bail!(
                "matcher threshold must be in [0.0, 1.0], got {}",
                options.threshold
            );
        }
        Ok(Self { kb, options })
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    /// Resolve raw input to an outcome.
    pub fn resolve(&self, raw_input: &str) -> MatchOutcome {
        self.explain(raw_input).outcome
    }

    /// Resolve raw input and report how the outcome was reached.
    pub fn explain(&self, raw_input: &str) -> Resolution {
        if raw_input.trim().is_empty() {
            return Resolution {
                outcome: MatchOutcome::InvalidInput,
                normalized: String::new(),
                categories: Vec::new(),
                path: None,
                best_score: None,
            };
        }

        let normalized = normalize(raw_input);
        let categories: Vec<String> = self
            .kb
            .categories_present_in(&normalized)
            .into_iter()
            .map(str::to_string)
            .collect();

        if categories.is_empty() {
            return Resolution {
                outcome: MatchOutcome::NoKeywords,
                normalized,
                categories,
                path: None,
                best_score: None,
            };
        }

        for label in &categories {
            if let Some(entry) = self.kb.lookup_by_keyword(label) {
                let token = label.clone();
                return Resolution {
                    outcome: MatchOutcome::Matched {
                        description: entry.description.clone(),
                        correction: entry.correction.clone(),
                    },
                    normalized,
                    categories,
                    path: Some(MatchPath::Keyword { token }),
                    best_score: None,
                };
            }
        }

        let scores = self.kb.tfidf().similarities(&normalized);
        let best = best_match(&scores);
        let best_score = best.map(|(_, s)| s).unwrap_or(0.0);

        let (outcome, path) = match best {
            Some((idx, score)) if score > self.options.threshold => {
                let entry = &self.kb.entries()[idx];
                (
                    MatchOutcome::Matched {
                        description: entry.description.clone(),
                        correction: entry.correction.clone(),
                    },
                    Some(MatchPath::Similarity { score }),
                )
            }
            _ => (MatchOutcome::NoMatch, None),
        };

        Resolution {
            outcome,
            normalized,
            categories,
            path,
            best_score: Some(best_score),
        }
    }
}

/// Index and score of the strictly highest positive score; earliest wins ties.
fn best_match(scores: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        let current = best.map(|(_, s)| s).unwrap_or(0.0);
        if score > current {
            best = Some((idx, score));
        }
    }
    best
}
