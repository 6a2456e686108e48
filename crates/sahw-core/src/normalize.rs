//! Text normalization shared by the knowledge base and the matcher.
//!
//! Both sides of every comparison go through [`normalize`], so descriptions
//! and user input live in the same token space.
//!
//! # Pipeline
//!
//! 1. Lowercase.
//! 2. Unicode NFKD decomposition; every non-ASCII code point (combining
//!    marks, curly quotes, ...) is dropped.
//! 3. Everything except ASCII letters, digits, and spaces is removed.
//!
//! ```rust
//! use sahw_core::normalize::normalize;
//!
//! assert_eq!(normalize("Rukū‘!"), "ruku");
//! assert_eq!(normalize("Ba'Adiyya"), "baadiyya");
//! ```

use unicode_normalization::UnicodeNormalization;

/// Normalize free text into lowercase ASCII letters, digits, and spaces.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Split normalized text on whitespace.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}
