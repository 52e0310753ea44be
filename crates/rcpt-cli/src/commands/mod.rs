//! CLI subcommands.

pub mod batch;
pub mod classify;
pub mod config;
pub mod parse;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use rcpt_core::models::config::RcptConfig;
use rcpt_core::tokens_from_json;

/// Default configuration file under the user config directory.
pub fn default_config_path() -> PathBuf {
    RcptConfig::path_in(&dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")))
}

/// Load the configuration from `--config`, then the default location, then defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RcptConfig> {
    if let Some(path) = config_path {
        return Ok(RcptConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(RcptConfig::from_file(&default_path)?)
    } else {
        Ok(RcptConfig::default())
    }
}

/// Read OCR tokens from a file or stdin (`-`).
///
/// JSON responses are decoded with [`tokens_from_json`]; with `lines` every
/// non-blank line is one token.
pub fn read_tokens(input: &str, lines: bool) -> anyhow::Result<Vec<String>> {
    let content = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        let path = Path::new(input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        fs::read_to_string(path)?
    };

    if lines {
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    } else {
        Ok(tokens_from_json(&content)?)
    }
}
