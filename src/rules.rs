//! The static rule book of Sujood As-Sahw.
//!
//! The book is an ordered list of sections; a section holds bullet items,
//! titled subsections, or both. It is display content only and plays no
//! part in matching. Used by `sahw rules` and `GET /rules`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::config::Config;

/// The embedded rule book.
pub const BUILTIN_RULES: &str = include_str!("../assets/rules.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleBook {
    pub sections: Vec<RuleSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSection {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub subsections: Vec<RuleSubsection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSubsection {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl RuleBook {
    /// Parse and validate a rule book from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let book: RuleBook = toml::from_str(content).with_context(|| "Failed to parse rule book")?;

        if book.sections.is_empty() {
            bail!("rule book has no sections");
        }
        for section in &book.sections {
            if section.items.is_empty() && section.subsections.is_empty() {
                bail!("rule book section '{}' is empty", section.title);
            }
        }

        Ok(book)
    }

    /// Render as indented plain text for the terminal.
    pub fn render(&self) -> String {
        let mut out = String::from("Rules of Sujood As-Sahw\n");
        for section in &self.sections {
            let _ = writeln!(out, "\n{}:", section.title);
            for item in &section.items {
                let _ = writeln!(out, "  - {}", item);
            }
            for sub in &section.subsections {
                let _ = writeln!(out, "\n  {}:", sub.title);
                for item in &sub.items {
                    let _ = writeln!(out, "    - {}", item);
                }
            }
        }
        out
    }
}

/// Load the rule book selected by the config.
pub fn load_rules(config: &Config) -> Result<RuleBook> {
    match &config.corpus.rules_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read rule book: {}", path.display()))?;
            RuleBook::parse(&content)
        }
        None => RuleBook::parse(BUILTIN_RULES),
    }
}

/// Print the rule book (`sahw rules`).
pub fn run_rules(config: &Config) -> Result<()> {
    let book = load_rules(config)?;
    print!("{}", book.render());
    Ok(())
}
