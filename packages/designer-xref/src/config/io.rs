//! Configuration I/O (YAML loading and export)

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;

/// Configuration schema versions this crate reads
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Index configuration (YAML schema v1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct XrefConfig {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Separator between screen, element and sub-item names in target full names
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Default for `load()`: run the structural schema check before decoding
    #[serde(default = "default_true")]
    pub validate_on_load: bool,

    /// Keep category sections the registry does not know and write them back on save
    #[serde(default)]
    pub preserve_unknown_categories: bool,

    /// Pretty-print persisted documents
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Maximum nesting of virtual targets below one real element
    #[serde(default = "default_max_resolve_depth")]
    pub max_resolve_depth: usize,
}

fn default_separator() -> String {
    ".".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_resolve_depth() -> usize {
    16
}

impl Default for XrefConfig {
    fn default() -> Self {
        Self {
            version: 1,
            separator: default_separator(),
            validate_on_load: true,
            preserve_unknown_categories: false,
            pretty: true,
            max_resolve_depth: default_max_resolve_depth(),
        }
    }
}

impl XrefConfig {
    /// Load and validate a configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a configuration document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;

        let version = raw.get("version").ok_or(ConfigError::MissingVersion)?;
        if let Some(found) = version.as_u64() {
            let found = u32::try_from(found).unwrap_or(u32::MAX);
            if !SUPPORTED_VERSIONS.contains(&found) {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                });
            }
        }

        let config: Self = serde_yaml::from_value(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Export as YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_preserve_unknown_categories(mut self, preserve: bool) -> Self {
        self.preserve_unknown_categories = preserve;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_max_resolve_depth(mut self, depth: usize) -> Self {
        self.max_resolve_depth = depth;
        self
    }
}
