use serde::Deserialize;
use std::path::Path;

use crate::config::env::env;
use crate::error::{LocusError, Result};

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct GeneratorConfig {
    /// Namespace the attribute classes are declared in
    pub attribute_namespace: String,
    /// Symbol used in `[Conditional(...)]` on the attribute classes
    pub conditional_symbol: String,
    /// Emit the attribute definitions source unit
    pub emit_attributes: bool,
    /// Appended to hint names when sources are written to disk
    pub file_extension: String,
}

impl GeneratorConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        Self {
            attribute_namespace: env("LOCUS_ATTRIBUTE_NAMESPACE", "Swick.Features".to_string()),
            conditional_symbol: env("LOCUS_CONDITIONAL_SYMBOL", "SWICK_FEATURES".to_string()),
            emit_attributes: env("LOCUS_EMIT_ATTRIBUTES", true),
            file_extension: env("LOCUS_FILE_EXTENSION", ".g.cs".to_string()),
        }
    }

    /// Create a builder for customizing config
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Apply values from a `locus.toml` file on top of this config
    pub fn merge_file(self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LocusError::read(path, e))?;
        let file: ConfigFile = toml::from_str(&content).map_err(|source| LocusError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(file.generator.apply(self))
    }

    /// Metadata name of one of the generator's attribute classes
    pub fn attribute_class(&self, simple_name: &str) -> String {
        if self.attribute_namespace.is_empty() {
            simple_name.to_string()
        } else {
            format!("{}.{}", self.attribute_namespace, simple_name)
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    generator: GeneratorConfigBuilder,
}

/// Builder for GeneratorConfig
#[derive(Debug, Default, Deserialize)]
pub struct GeneratorConfigBuilder {
    attribute_namespace: Option<String>,
    conditional_symbol: Option<String>,
    emit_attributes: Option<bool>,
    file_extension: Option<String>,
}

impl GeneratorConfigBuilder {
    /// Set the attribute namespace
    pub fn attribute_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.attribute_namespace = Some(namespace.into());
        self
    }

    /// Set the conditional compilation symbol
    pub fn conditional_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.conditional_symbol = Some(symbol.into());
        self
    }

    /// Toggle the attribute definitions source
    pub fn emit_attributes(mut self, emit: bool) -> Self {
        self.emit_attributes = Some(emit);
        self
    }

    /// Set the output file extension
    pub fn file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = Some(extension.into());
        self
    }

    /// Build the GeneratorConfig
    pub fn build(self) -> GeneratorConfig {
        self.apply(GeneratorConfig::from_env())
    }

    fn apply(self, base: GeneratorConfig) -> GeneratorConfig {
        GeneratorConfig {
            attribute_namespace: self.attribute_namespace.unwrap_or(base.attribute_namespace),
            conditional_symbol: self.conditional_symbol.unwrap_or(base.conditional_symbol),
            emit_attributes: self.emit_attributes.unwrap_or(base.emit_attributes),
            file_extension: self.file_extension.unwrap_or(base.file_extension),
        }
    }
}
