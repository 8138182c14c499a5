//! Infrastructure layer - adapters behind the domain ports
//!
//! - `providers`: built-in reference providers (one per built-in category)
//! - `resolvers`: sub-item and interval detailed target resolvers
//! - `font_catalog`: font family → font file lookup
//! - `codec`: JSON persistence of categorized references
//! - `memory_source` / `file_source`: element sources

pub mod codec;
pub mod file_source;
pub mod font_catalog;
pub mod memory_source;
pub mod providers;
pub mod resolvers;

pub use codec::{CategorySection, EntryRecord, ReferenceCodec, SCHEMA_NAME, SCHEMA_VERSION};
pub use file_source::FileSource;
pub use font_catalog::FontCatalog;
pub use memory_source::MemorySource;
pub use providers::{builtin_providers, builtin_registry, FontReferenceProvider, TypedReferenceProvider};
pub use resolvers::{IntervalResolver, SubItemResolver};
