use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Settings shared by the extractor, the scorer and the robots.txt check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerSettings {
    /// Lower-case tokens whose presence in the title or meta description
    /// sets `hasKeywords`. Plain substring match.
    #[serde(default = "default_keyword_tokens")]
    pub keyword_tokens: Vec<String>,

    /// An image wider or taller than this (px) counts as large.
    #[serde(default = "default_large_image_threshold")]
    pub large_image_threshold: u32,

    /// Word count at which the content category earns full points.
    #[serde(default = "default_word_count_target")]
    pub word_count_target: usize,

    /// Whether to fetch `/robots.txt` after analysis.
    #[serde(default)]
    pub check_robots_txt: bool,

    /// Timeout for the robots.txt request, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_keyword_tokens() -> Vec<String> {
    vec!["seo".to_string(), "référencement".to_string()]
}

fn default_large_image_threshold() -> u32 {
    2000
}

fn default_word_count_target() -> usize {
    300
}

fn default_http_timeout_secs() -> u64 {
    30
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            keyword_tokens: default_keyword_tokens(),
            large_image_threshold: default_large_image_threshold(),
            word_count_target: default_word_count_target(),
            check_robots_txt: false,
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl AnalyzerSettings {
    /// Load settings from a JSON file. Missing keys fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {}", path.display(), e)))?;
        let settings: Self = serde_json::from_str(&raw)
            .map_err(|e| AppError::config(format!("cannot parse {}: {}", path.display(), e)))?;
        settings.validate()?;
        log::debug!("[CONFIG] Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.word_count_target == 0 {
            return Err(AppError::config("wordCountTarget must be positive"));
        }
        if self.large_image_threshold == 0 {
            return Err(AppError::config("largeImageThreshold must be positive"));
        }
        Ok(())
    }
}
