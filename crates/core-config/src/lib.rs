//! Configuration loading for the edit window.
//!
//! Reads `edit-window.toml` (or an override path supplied by the binary):
//!
//! ```toml
//! [view]
//! tab_size = 8            # clamped to 1..=16
//! wrap = false
//! tab_spaces = false
//! auto_indent = true
//! indent_aware_home = true
//!
//! [edit]
//! overwrite = false
//! ```
//!
//! Every key is optional. Unknown keys are ignored so older binaries accept
//! newer files. A missing file, an unreadable file or a parse error all fall
//! back to defaults in [`load_from`]; [`read`] is the strict variant.

use core_model::{InsertMode, ViewParameters, WrapMode};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "edit-window.toml";
const CONFIG_DIR_NAME: &str = "edit-window";
pub const TAB_SIZE_MAX: usize = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    #[serde(default = "ViewConfig::default_tab_size")]
    pub tab_size: usize,
    #[serde(default)]
    pub wrap: bool,
    #[serde(default)]
    pub tab_spaces: bool,
    #[serde(default = "ViewConfig::enabled")]
    pub auto_indent: bool,
    #[serde(default = "ViewConfig::enabled")]
    pub indent_aware_home: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tab_size: Self::default_tab_size(),
            wrap: false,
            tab_spaces: false,
            auto_indent: true,
            indent_aware_home: true,
        }
    }
}

impl ViewConfig {
    const fn default_tab_size() -> usize {
        8
    }
    const fn enabled() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct EditConfig {
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub edit: EditConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File the values came from, `None` for built-in defaults.
    pub source: Option<PathBuf>,
    pub raw: Option<String>,
    pub file: ConfigFile,
}

/// Local `edit-window.toml` first, then the platform config directory.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
    }
    local
}

/// Strict load: any I/O or parse problem is an error.
pub fn read(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file = toml::from_str::<ConfigFile>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Config {
        source: Some(path.to_path_buf()),
        raw: Some(content),
        file,
    })
}

/// Load `path` (or the discovered file), falling back to defaults.
pub fn load_from(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = path.unwrap_or_else(discover);
    if !path.exists() {
        debug!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    }
    match read(&path) {
        Ok(config) => {
            debug!(target: "config", path = %path.display(), "config_loaded");
            Ok(config)
        }
        Err(err) => {
            warn!(target: "config", error = %err, "config_unusable_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Configured tab size clamped to `1..=TAB_SIZE_MAX`.
    pub fn effective_tab_size(&self) -> usize {
        let raw = self.file.view.tab_size;
        let clamped = raw.clamp(1, TAB_SIZE_MAX);
        if clamped != raw {
            info!(target: "config", raw, clamped, max = TAB_SIZE_MAX, "tab_size_clamped");
        }
        clamped
    }

    pub fn wrap_mode(&self) -> WrapMode {
        if self.file.view.wrap {
            WrapMode::Soft
        } else {
            WrapMode::None
        }
    }

    /// Parameters for a fresh window built from the loaded values.
    pub fn view_parameters(&self) -> ViewParameters {
        let view = &self.file.view;
        ViewParameters {
            tab_spaces: view.tab_spaces,
            auto_indent: view.auto_indent,
            indent_aware_home: view.indent_aware_home,
            insert_mode: if self.file.edit.overwrite {
                InsertMode::Overwrite
            } else {
                InsertMode::Insert
            },
            ..ViewParameters::new(self.effective_tab_size(), self.wrap_mode())
        }
    }
}
