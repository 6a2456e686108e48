use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use sahw_core::matcher::DEFAULT_THRESHOLD;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatcherConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Optional replacements for the embedded data assets.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorpusConfig {
    /// Corpus TOML replacing `assets/corpus.toml`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Rule book TOML replacing `assets/rules.toml`.
    #[serde(default)]
    pub rules_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Directory receiving `success.log` and `error.log`.
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            level: default_level(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}
fn default_level() -> String {
    "info".to_string()
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }
}

/// Load and validate a config file.
///
/// A missing file is not an error: the built-in defaults apply. A file that
/// exists but fails to parse or validate is.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::minimal());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if !(0.0..=1.0).contains(&config.matcher.threshold) {
        anyhow::bail!("matcher.threshold must be in [0.0, 1.0]");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    if let Some(path) = &config.corpus.path {
        if !path.exists() {
            anyhow::bail!("corpus.path does not exist: {}", path.display());
        }
    }

    if let Some(path) = &config.corpus.rules_path {
        if !path.exists() {
            anyhow::bail!("corpus.rules_path does not exist: {}", path.display());
        }
    }

    Ok(())
}
