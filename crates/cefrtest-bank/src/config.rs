//! cefrtest configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level cefrtest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CefrtestConfig {
    /// Directory searched for TOML bank files.
    #[serde(default = "default_bank_dir")]
    pub bank_dir: PathBuf,
    /// Bank administered when none is specified.
    #[serde(default = "default_bank")]
    pub default_bank: String,
    /// How many questions to select for a sitting.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Output directory for results and reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_bank_dir() -> PathBuf {
    PathBuf::from("./banks")
}
fn default_bank() -> String {
    "builtin".to_string()
}
fn default_question_count() -> usize {
    20
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./cefrtest-results")
}

impl Default for CefrtestConfig {
    fn default() -> Self {
        Self {
            bank_dir: default_bank_dir(),
            default_bank: default_bank(),
            question_count: default_question_count(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `cefrtest.toml` in the current directory
/// 2. `~/.config/cefrtest/config.toml`
pub fn load_config() -> Result<CefrtestConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CefrtestConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("cefrtest.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CefrtestConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CefrtestConfig::default(),
    };

    config.bank_dir = resolve_path(&config.bank_dir);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("cefrtest"))
}
