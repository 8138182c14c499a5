//! Common test utilities for designer-xref
//!
//! Shared fixtures (element graphs, storages, misbehaving plugins) and
//! assertion helpers for the integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;
