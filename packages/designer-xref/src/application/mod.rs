//! Application layer: provider registry and index construction

pub mod index_builder;
pub mod registry;

pub use index_builder::{empty_containers, BuildOutcome, BuildReport, IndexBuilder};
pub use registry::{BoundFinder, ProviderMetadata, ProviderRegistry};
