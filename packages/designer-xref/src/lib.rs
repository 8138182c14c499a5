//! Designer cross-reference index
//!
//! Discovers every reference a design element holds to another named entity
//! (data tag, font, symbol, screen, recipe field, text resource, script,
//! expression), groups them by category and persists the index so that
//! "find all usages" and "impact of renaming X" queries never need a rescan.
//!
//! ## Architecture
//!
//! ```text
//! api/             CategorizedStorage (build, query, save, load)
//! application/     ProviderRegistry, IndexBuilder (depth-first traversal)
//! domain/          reference items, element model, port traits
//! infrastructure/  built-in providers & resolvers, JSON codec, element sources
//! config/          XrefConfig (versioned YAML)
//! ```
//!
//! ## Core Principles
//!
//! 1. **Explicit registration**: providers and resolvers are handed to a
//!    `ProviderRegistry` value; nothing is discovered at runtime
//! 2. **Observable order**: container order is traversal order, then provider
//!    registration order within one element
//! 3. **All or nothing**: a failed build or load leaves the storage untouched
//! 4. **Deterministic persistence**: save → load → save is byte-identical
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use designer_xref::{
//!     actions, builtin_registry, CategorizedStorage, DesignElement, ElementNode, FontCatalog,
//!     MemorySource, PropertyValue,
//! };
//!
//! let fonts = Arc::new(FontCatalog::new(["arial.ttf"]));
//! let mut storage = CategorizedStorage::new(
//!     MemorySource::new("Screen1"),
//!     Arc::new(builtin_registry(fonts)),
//! );
//!
//! let button = ElementNode::new("Button1", "Button").with_action(
//!     "Click",
//!     actions::LOAD_RECIPE,
//!     vec![PropertyValue::Recipe("Recipe2.Field23".into())],
//! );
//! storage.find_all_references(&[&button as &dyn DesignElement])?;
//! let saved = storage.save()?;
//!
//! storage.clear_all_references();
//! storage.reload()?;
//! assert_eq!(storage.to_bytes()?, saved);
//! assert!(storage["Recipe"][0].is_action());
//! # Ok::<(), designer_xref::XrefError>(())
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, XrefError};

pub use api::{CategorizedStorage, StorageState};
pub use application::{BuildReport, ProviderMetadata, ProviderRegistry};
pub use config::XrefConfig;
pub use domain::{
    actions, categories, ActionReferenceItem, DesignElement, ElementNode, ElementSource,
    ReferenceContainer, ReferenceEntry, ReferenceItem, PropertyValue,
};
pub use infrastructure::{builtin_registry, FileSource, FontCatalog, MemorySource};
