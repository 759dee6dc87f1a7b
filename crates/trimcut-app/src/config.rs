//! Application configuration.
//!
//! Read from `--config <path>` when given, otherwise from
//! `<config dir>/trimcut/config.json` if that file exists.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use trimcut_media::{EncodeSettings, FfmpegService};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// How extracted segments are encoded.
    pub encode: EncodeSettings,
    /// Parent for the intermediate work directory (system temp dir if unset).
    pub work_dir: Option<PathBuf>,
    /// Leave intermediate clips on disk after the run.
    pub keep_work_dir: bool,
}

impl AppConfig {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trimcut").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn build_service(&self) -> Result<FfmpegService> {
        let root = self.work_dir.clone().unwrap_or_else(std::env::temp_dir);
        let service = FfmpegService::with_work_root(self.encode.clone(), &root, self.keep_work_dir)?;
        Ok(service)
    }
}
