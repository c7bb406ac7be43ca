//! Application configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::QuestionBank;
use crate::parser::parse_question_bank;

/// Top-level aptitude configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AptitudeConfig {
    /// Question bank file; the built-in bank is used when unset.
    #[serde(default)]
    pub question_bank: Option<PathBuf>,
    /// Output directory for results and certificates.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Rescale category scores onto the certificate's 0-5 range.
    #[serde(default = "default_true")]
    pub scale_scores: bool,
    /// Certificate wording.
    #[serde(default)]
    pub certificate: CertificateConfig,
}

/// Certificate text that may be customised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./aptitude-results")
}
fn default_true() -> bool {
    true
}
fn default_title() -> String {
    "Certificate of Assessment".to_string()
}
fn default_attribution() -> String {
    "Tested with Aptitude".to_string()
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            attribution: default_attribution(),
        }
    }
}

impl Default for AptitudeConfig {
    fn default() -> Self {
        Self {
            question_bank: None,
            output_dir: default_output_dir(),
            scale_scores: true,
            certificate: CertificateConfig::default(),
        }
    }
}

impl AptitudeConfig {
    /// Load the configured question bank, or the built-in one.
    pub fn load_bank(&self) -> Result<QuestionBank> {
        match &self.question_bank {
            Some(path) => parse_question_bank(path),
            None => Ok(QuestionBank::builtin()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Expand `${VAR}` in a path. Paths that are not valid UTF-8 are left alone.
fn resolve_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(resolve_env_vars(s)),
        None => path.to_path_buf(),
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `aptitude.toml` in the current directory
/// 2. `~/.config/aptitude/config.toml`
///
/// Environment variable overrides: `APTITUDE_OUTPUT_DIR`, `APTITUDE_QUESTION_BANK`.
pub fn load_config() -> Result<AptitudeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AptitudeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("aptitude.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AptitudeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AptitudeConfig::default(),
    };

    // Apply env var overrides
    if let Ok(dir) = std::env::var("APTITUDE_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Ok(bank) = std::env::var("APTITUDE_QUESTION_BANK") {
        config.question_bank = Some(PathBuf::from(bank));
    }

    config.output_dir = resolve_path(&config.output_dir);
    config.question_bank = config.question_bank.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("aptitude"))
}
