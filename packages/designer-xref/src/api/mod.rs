//! Public API consumed by designer tooling
//!
//! `CategorizedStorage` is the one entry point: build, query, save and load
//! the reference index of one element source.

pub mod categorized_storage;

pub use categorized_storage::{CategorizedStorage, StorageState};
