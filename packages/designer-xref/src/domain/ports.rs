//! Ports (trait interfaces)
//!
//! Extension points of the index:
//! - `ReferenceProvider` → `ReferenceFinder`: detection of one reference kind
//! - `DetailedTargetResolver`: traversal expansion to virtual sub-targets
//! - `ElementSource`: the document being indexed (name + streams)
//! - `FontResolver`: font lookup service consumed by the font provider

use std::io::{Read, Write};

use super::element::{DesignElement, ScanTarget, SubTarget, TargetPath};
use super::models::ReferenceEntry;
use crate::Result;

/// Predicate deciding whether an element (and its subtree) participates
pub type ElementPredicate<'a> = dyn Fn(&dyn DesignElement) -> bool + 'a;

/// Lazy, finite sequence of finder results
pub type FindIter<'a> = Box<dyn Iterator<Item = Result<FoundReference>> + 'a>;

/// Entry emitted by a finder together with the category it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundReference {
    pub category: String,
    pub entry: ReferenceEntry,
}

impl FoundReference {
    pub fn new(category: impl Into<String>, entry: impl Into<ReferenceEntry>) -> Self {
        Self {
            category: category.into(),
            entry: entry.into(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Element Source
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Document being indexed
///
/// Streams are acquired per `save`/`load` call and dropped before it returns.
pub trait ElementSource {
    /// Prefix of every target full name (usually the screen name)
    fn name(&self) -> &str;

    fn open_read_stream(&self) -> std::io::Result<Box<dyn Read + '_>>;

    fn open_write_stream(&self) -> std::io::Result<Box<dyn Write + '_>>;
}

/// Source binding handed to providers when creating finders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub source_name: String,
    pub separator: String,
}

impl SourceContext {
    pub fn new(source: &dyn ElementSource, separator: impl Into<String>) -> Self {
        Self {
            source_name: source.name().to_string(),
            separator: separator.into(),
        }
    }

    /// `<source><sep><element>[<sep><suffix>…]`
    pub fn target_full_name(&self, path: &TargetPath) -> String {
        let mut full_name = self.source_name.clone();
        for segment in path.segments() {
            if !full_name.is_empty() {
                full_name.push_str(&self.separator);
            }
            full_name.push_str(segment);
        }
        full_name
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Providers & Finders
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Stateless detector factory for one (or a few) reference categories
pub trait ReferenceProvider {
    /// Stable provider name used in logs and metadata filters
    fn name(&self) -> &str;

    /// Categories this provider emits into
    fn categories(&self) -> Vec<String>;

    /// Bind to one element source
    fn create_finder<'p>(&'p self, context: SourceContext) -> Box<dyn ReferenceFinder + 'p>;
}

/// Detector bound to one element source
///
/// Must not mutate elements. Each call re-scans the target. Placeholder and
/// invalid values produce nothing; errors are reserved for real failures.
pub trait ReferenceFinder {
    fn find<'a>(&'a self, target: ScanTarget<'a>, include: &'a ElementPredicate<'a>)
        -> FindIter<'a>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Detailed Target Resolvers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Expands traversal to addressable objects that are not tree children
pub trait DetailedTargetResolver {
    /// Identity used by the loop guard
    fn name(&self) -> &str;

    fn resolve_sub_targets<'a>(&self, element: &'a dyn DesignElement) -> Vec<SubTarget<'a>>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Font Lookup
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Outcome of resolving a font family to a font file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontResolution {
    Unique(String),
    /// Several files match and none is an exact stem match
    Ambiguous(Vec<String>),
    Unresolved,
}

pub trait FontResolver {
    fn resolve(&self, family: &str) -> FontResolution;
}
