//! Configuration validation

use super::error::{ConfigError, ConfigResult};
use super::io::XrefConfig;

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

const MAX_RESOLVE_DEPTH: usize = 64;

impl Validatable for XrefConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.separator.is_empty() || self.separator.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidSeparator(self.separator.clone()));
        }

        if !(1..=MAX_RESOLVE_DEPTH).contains(&self.max_resolve_depth) {
            return Err(ConfigError::range_with_hint(
                "max_resolve_depth",
                self.max_resolve_depth,
                1,
                MAX_RESOLVE_DEPTH,
                "Virtual targets need at least one level of nesting",
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "XrefConfig"
    }
}
