//! Crate-wide error type
//!
//! `LocusError` covers everything that can stop a generation run from
//! starting or finishing: unreadable manifests, malformed config, output that
//! cannot be written. Problems with the *annotated code* are never
//! `LocusError`s; those are collected as [`crate::diagnostics::Error`]
//! records on the container aggregate and reported as diagnostics.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LocusError>;

/// Locus-wide error type
///
/// # Example
///
/// ```rust,ignore
/// use locus::{Compilation, LocusError};
///
/// fn load() -> Result<Compilation, LocusError> {
///     let compilation = Compilation::from_path("compilation.json")?;
///     Ok(compilation)
/// }
/// ```
#[derive(Debug, Error)]
pub enum LocusError {
    /// A manifest or config file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// The file that failed to load
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Generated output could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        /// The file that failed to write
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A JSON compilation manifest did not parse
    #[error("Invalid JSON manifest {path}: {source}")]
    Json {
        /// The manifest path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A TOML compilation manifest or config file did not parse
    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        /// The file path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: toml::de::Error,
    },

    /// The manifest extension is neither `.json` nor `.toml`
    #[error("Unsupported manifest format '{extension}' for {path} (expected .json or .toml)")]
    UnsupportedFormat {
        /// The manifest path
        path: PathBuf,
        /// The offending extension
        extension: String,
    },

    /// A manifest refers to a type that it does not declare
    #[error("Type '{name}' is referenced but not declared in the compilation")]
    UnknownType {
        /// The unresolved type name
        name: String,
    },

    /// Generated sources diverge from what is on disk (`check` mode)
    #[error("{count} generated source(s) are out of date")]
    Stale {
        /// Number of mismatching files
        count: usize,
    },
}

impl LocusError {
    /// Create a Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create an UnknownType error
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    /// Process exit code the CLI uses for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Read { .. } | Self::Write { .. } => 74,
            Self::Json { .. } | Self::Toml { .. } | Self::UnsupportedFormat { .. } => 65,
            Self::UnknownType { .. } => 65,
            Self::Stale { .. } => 1,
        }
    }
}
