//! Navigator configuration stored in `stepnav.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::navigator::NavigatorKind;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "stepnav.toml";

/// How CLI commands print their outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Navigator configuration (TOML).
///
/// This file is intended to be edited by humans. Missing fields default to
/// the strategy-based navigator with plain-text output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Navigator variant built for every command.
    pub navigator: NavigatorKind,

    pub output: OutputFormat,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            navigator: NavigatorKind::default(),
            output: OutputFormat::default(),
            log_filter: "warn".to_string(),
        }
    }
}

impl NavigatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(anyhow!("log_filter must be non-empty"));
        }
        EnvFilter::try_new(&self.log_filter)
            .map_err(|err| anyhow!("invalid log_filter '{}': {}", self.log_filter, err))?;
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `NavigatorConfig::default()`.
pub fn load_config(path: &Path) -> Result<NavigatorConfig> {
    if !path.exists() {
        let cfg = NavigatorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: NavigatorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &NavigatorConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}
