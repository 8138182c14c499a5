//! Domain layer for the cross-reference index
//!
//! # Domain Models
//!
//! - `ReferenceItem` / `ActionReferenceItem`: one discovered edge
//! - `ReferenceEntry`: closed sum of the two item variants
//! - `ReferenceContainer`: insertion-ordered entries of one category
//! - `DesignElement` / `ElementNode`: the element graph being indexed
//!
//! # Port Traits
//!
//! - `ReferenceProvider` / `ReferenceFinder`: detect references of a category
//! - `DetailedTargetResolver`: expand traversal to virtual sub-targets
//! - `ElementSource`: name + scoped read/write streams
//! - `FontResolver`: font family → font file lookup service

pub mod categories;
pub mod element;
pub mod models;
pub mod ports;

pub use element::{
    actions, ActionBinding, DesignElement, ElementNode, IntervalEntry, Property, PropertyValue,
    ScanTarget, SubTarget, TargetElement, TargetPath, ValueKind,
};
pub use models::{
    ActionReferenceItem, EntryKind, ReferenceContainer, ReferenceEntry, ReferenceItem,
};
pub use ports::{
    DetailedTargetResolver, ElementPredicate, ElementSource, FindIter, FontResolution,
    FontResolver, FoundReference, ReferenceFinder, ReferenceProvider, SourceContext,
};
