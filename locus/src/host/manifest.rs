use std::fs;
use std::path::Path;

use super::symbols::Compilation;
use crate::error::{LocusError, Result};

impl Compilation {
    /// Load a compilation manifest, picking the format from the extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LocusError::read(path, e))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content).map_err(|source| LocusError::Json {
                path: path.to_path_buf(),
                source,
            }),
            Some("toml") => Self::from_toml(&content).map_err(|source| LocusError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            other => Err(LocusError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.unwrap_or_default().to_string(),
            }),
        }
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Whether a path looks like a compilation manifest
pub fn is_manifest(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name.ends_with(".locus.json") || name.ends_with(".locus.toml")
}
