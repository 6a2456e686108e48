//! # Sahw Helper
//!
//! Look up the correction for a mistake made during prayer.
//!
//! Free-text descriptions ("I forgot my sujud") are matched against a fixed
//! corpus of canonical mistakes by the engine in [`sahw_core`], then served
//! through a CLI (`sahw`) and a small HTTP server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────┐
//! │ corpus.toml  │──▶│ KnowledgeBase  │──▶│ Matcher  │
//! │ (embedded)   │   │ index + tf-idf │   │ (shared) │
//! └──────────────┘   └────────────────┘   └────┬─────┘
//!                                              │
//!                          ┌───────────────────┤
//!                          ▼                   ▼
//!                     ┌──────────┐       ┌──────────┐
//!                     │   CLI    │       │   HTTP   │
//!                     │  (sahw)  │       │  (axum)  │
//!                     └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! sahw search "I forgot my sujud"
//! sahw search "owing both qabliyya" --explain
//! sahw rules
//! sahw serve
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`corpus`] | Corpus loading and matcher construction |
//! | [`rules`] | The static rule book |
//! | [`search`] | Logged resolution and CLI output |
//! | [`server`] | HTTP server |
//! | [`logging`] | Log file and stderr setup |

pub mod config;
pub mod corpus;
pub mod logging;
pub mod rules;
pub mod search;
pub mod server;
