//! Mistake search, shared by `sahw search` and `POST /search`.
//!
//! Both frontends go through [`resolve_logged`], which times the call and
//! records the outcome. Logging never changes what the matcher returns.

use anyhow::Result;
use std::time::Instant;

use sahw_core::matcher::{MatchOutcome, MatchPath, Matcher, Resolution};

/// Resolve `input` and log the outcome with its latency.
pub fn resolve_logged(matcher: &Matcher, input: &str) -> Resolution {
    let started = Instant::now();
    let resolution = matcher.explain(input);
    let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    match &resolution.outcome {
        MatchOutcome::Matched { description, .. } => tracing::info!(
            input,
            outcome = resolution.outcome.tag(),
            description = %description,
            elapsed_us,
            "search resolved"
        ),
        other => tracing::info!(
            input,
            outcome = other.tag(),
            elapsed_us,
            "search unresolved"
        ),
    }

    resolution
}

/// Run `sahw search`: print the rendered outcome, plus the resolution
/// steps when `explain` is set.
pub fn run_search(matcher: &Matcher, input: &str, explain: bool) -> Result<()> {
    let resolution = resolve_logged(matcher, input);

    println!("{}", resolution.outcome);

    if explain {
        println!();
        println!("normalized: {}", resolution.normalized);
        println!(
            "categories: {}",
            if resolution.categories.is_empty() {
                "(none)".to_string()
            } else {
                resolution.categories.join(", ")
            }
        );
        match &resolution.path {
            Some(MatchPath::Keyword { token }) => println!("path: keyword ({})", token),
            Some(MatchPath::Similarity { score }) => println!("path: similarity ({:.4})", score),
            None => println!("path: none"),
        }
        if let Some(score) = resolution.best_score {
            println!(
                "best score: {:.4} (threshold {})",
                score,
                matcher.options().threshold
            );
        }
    }

    Ok(())
}

/// Run `sahw entries`: print every correction in corpus order.
pub fn run_entries(matcher: &Matcher) -> Result<()> {
    for entry in matcher.knowledge_base().entries() {
        println!(
            "Mistake: {}\nCorrection: {}\n",
            entry.description, entry.correction
        );
    }
    Ok(())
}
