//! Parameter file loading.
//!
//! Both JSON and YAML documents are first parsed into a `serde_json::Value`
//! so the "top level must be a mapping" check is format independent, then
//! converted into the typed model.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::EaConfig;
use crate::error::ConfigLoadError;

const INLINE_SOURCE: &str = "<inline>";

/// Serialization format of a parameter file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything but `.yaml`/`.yml` is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse parameter file content held in memory.
///
/// # Errors
///
/// Returns [`ConfigLoadError::Parse`] for malformed content or mistyped fields
/// and [`ConfigLoadError::NotAMapping`] when the document is not a mapping.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<EaConfig, ConfigLoadError> {
    let path = PathBuf::from(INLINE_SOURCE);
    let value: Value = match format {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| ConfigLoadError::Parse {
            path: path.clone(),
            message: format!("JSON parse error: {e}"),
        })?,
        ConfigFormat::Yaml => {
            serde_saphyr::from_str(content).map_err(|e| ConfigLoadError::Parse {
                path: path.clone(),
                message: format!("YAML parse error: {e}"),
            })?
        }
    };

    if !value.is_object() {
        return Err(ConfigLoadError::NotAMapping { path });
    }

    serde_json::from_value(value).map_err(|e| ConfigLoadError::Parse {
        path,
        message: e.to_string(),
    })
}

/// Read and parse a parameter file from disk.
///
/// # Errors
///
/// Returns [`ConfigLoadError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_config`] tagged with `path`.
pub fn load_config(path: &Path) -> Result<EaConfig, ConfigLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, ConfigFormat::from_path(path)).map_err(|e| e.with_path(path.to_path_buf()))
}
