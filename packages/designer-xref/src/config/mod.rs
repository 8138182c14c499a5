//! Index configuration
//!
//! A single versioned YAML document controls how references are named,
//! persisted and reloaded.
//!
//! # Examples
//!
//! ```rust
//! use designer_xref::config::XrefConfig;
//!
//! let config = XrefConfig::from_yaml_str("version: 1\nseparator: \"/\"\n").unwrap();
//! assert_eq!(config.separator, "/");
//! assert!(config.validate_on_load);
//! ```

pub mod error;
pub mod io;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use io::{XrefConfig, SUPPORTED_VERSIONS};
pub use validation::Validatable;
