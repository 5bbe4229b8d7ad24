//! Project directory layout and its optional config file.
//!
//! # Responsibility
//! - Describe where pages, templates, assets and outputs live.
//! - Load overrides from `<root>/folio.toml`.
//!
//! # Invariants
//! - All paths are relative to the project root.
//! - Unknown config keys are rejected instead of silently ignored.

use super::{SiteError, SiteResult};
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "folio.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteLayout {
    /// Markdown page tree.
    pub pages_dir: PathBuf,
    /// Intermediate per-page JSON data.
    pub json_dir: PathBuf,
    /// `<layout>.html` templates.
    pub templates_dir: PathBuf,
    /// Rendered site.
    pub output_dir: PathBuf,
    /// Directories copied verbatim into `output_dir`.
    pub asset_dirs: Vec<PathBuf>,
    /// Default log directory for the CLI.
    pub log_dir: PathBuf,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("_data/pages"),
            json_dir: PathBuf::from("_data/working/page_json"),
            templates_dir: PathBuf::from("_data/assets/templates"),
            output_dir: PathBuf::from("docs"),
            asset_dirs: vec![
                PathBuf::from("_data/assets/css"),
                PathBuf::from("_data/assets/scripts"),
                PathBuf::from("_data/pages/images"),
            ],
            log_dir: PathBuf::from("_data/working/logs"),
        }
    }
}

impl SiteLayout {
    /// Loads `<root>/folio.toml`, falling back to defaults when absent.
    ///
    /// # Errors
    /// - `SiteError::Config` when the file exists but cannot be decoded.
    pub fn load(root: &Path) -> SiteResult<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|err| SiteError::Config {
            path: path.clone(),
            message: err.to_string(),
        })?;
        let layout = Self::from_toml_str(&raw).map_err(|message| SiteError::Config {
            path: path.clone(),
            message,
        })?;
        info!(
            "event=config_load module=site status=ok path={}",
            path.display()
        );
        Ok(layout)
    }

    /// Decodes a layout from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|err| err.to_string())
    }
}
