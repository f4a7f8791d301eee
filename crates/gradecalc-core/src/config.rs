//! gradecalc configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::lexicon::Locale;
use crate::statistics::CreditPolicy;

/// Top-level gradecalc configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradecalcConfig {
    /// Transcript locale used when `--lang` is not given.
    #[serde(default)]
    pub locale: Locale,
    /// Credits required for the degree.
    #[serde(default = "default_ects_required")]
    pub ects_required: u32,
    /// Credits earned in modules without a grade.
    #[serde(default = "default_ects_without_grade")]
    pub ects_without_grade: u32,
    /// Snapshot file read by `--csv` and written by every run.
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: PathBuf,
    /// File-name prefix of the transcript document.
    #[serde(default = "default_document_prefix")]
    pub document_prefix: String,
    /// File extension of the transcript document, without the dot.
    #[serde(default = "default_document_extension")]
    pub document_extension: String,
}

fn default_ects_required() -> u32 {
    CreditPolicy::default().required
}
fn default_ects_without_grade() -> u32 {
    CreditPolicy::default().without_grade
}
fn default_snapshot_file() -> PathBuf {
    PathBuf::from("grades.csv")
}
fn default_document_prefix() -> String {
    "abschluss".to_string()
}
fn default_document_extension() -> String {
    "pdf".to_string()
}

impl Default for GradecalcConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            ects_required: default_ects_required(),
            ects_without_grade: default_ects_without_grade(),
            snapshot_file: default_snapshot_file(),
            document_prefix: default_document_prefix(),
            document_extension: default_document_extension(),
        }
    }
}

impl GradecalcConfig {
    /// The credit targets this configuration describes.
    pub fn policy(&self) -> CreditPolicy {
        CreditPolicy {
            required: self.ects_required,
            without_grade: self.ects_without_grade,
        }
    }
}

/// Load config from an explicit path, or search the well-known locations.
///
/// Search order without an explicit path:
/// 1. `gradecalc.toml` in the current directory
/// 2. `~/.config/gradecalc/config.toml`
///
/// Environment variable overrides: `GRADECALC_ECTS_REQUIRED`,
/// `GRADECALC_ECTS_WITHOUT_GRADE`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradecalcConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradecalc.toml");
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
            tracing::debug!("reading config {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GradecalcConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradecalcConfig::default(),
    };

    if let Some(value) = env_u32("GRADECALC_ECTS_REQUIRED")? {
        config.ects_required = value;
    }
    if let Some(value) = env_u32("GRADECALC_ECTS_WITHOUT_GRADE")? {
        config.ects_without_grade = value;
    }

    Ok(config)
}

fn env_u32(name: &str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a whole number, got '{raw}'")),
        Err(_) => Ok(None),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradecalc"))
}
