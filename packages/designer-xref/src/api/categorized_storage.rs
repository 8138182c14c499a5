//! CategorizedStorage - queryable reference index of one element source
//!
//! Lifecycle:
//!
//! ```text
//! Uninitialized ──find_references──► Built ◄──┐
//!       │                              │       │ find_references / load
//!       └──────────load──────────► Loaded ◄───┤
//!                                      │       │
//!                        clear_all_references  │
//!                                      ▼       │
//!                                    Empty ────┘
//! ```
//!
//! Every registered category has a container at all times; a build or load
//! replaces the whole set only after it has fully succeeded.

use std::io::{Read, Write};
use std::ops::Index;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::application::{empty_containers, BuildReport, IndexBuilder, ProviderRegistry};
use crate::config::{Validatable, XrefConfig};
use crate::domain::{
    DesignElement, ElementPredicate, ElementSource, ReferenceContainer, ReferenceEntry,
};
use crate::infrastructure::codec::{partition_sections, CategorySection, ReferenceCodec};
use crate::{Result, XrefError};

/// Storage lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageState {
    Uninitialized,
    Built,
    Loaded,
    Empty,
}

impl StorageState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageState::Uninitialized => "uninitialized",
            StorageState::Built => "built",
            StorageState::Loaded => "loaded",
            StorageState::Empty => "empty",
        }
    }

    /// Whether the contents may be persisted
    pub fn can_save(&self) -> bool {
        !matches!(self, StorageState::Uninitialized)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CategorizedStorage
// ═══════════════════════════════════════════════════════════════════════════

/// Category → container map bound to one element source and one registry
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use designer_xref::{
///     builtin_registry, CategorizedStorage, DesignElement, ElementNode, FontCatalog,
///     MemorySource, PropertyValue,
/// };
///
/// let fonts = Arc::new(FontCatalog::new(["arial.ttf", "tahoma.ttf"]));
/// let registry = Arc::new(builtin_registry(fonts));
/// let mut storage = CategorizedStorage::new(MemorySource::new("Screen1"), registry);
///
/// let text_box = ElementNode::new("TextBox1", "TextBox")
///     .with_property("FontFamily", PropertyValue::Font("Arial".into()));
/// storage.find_all_references(&[&text_box as &dyn DesignElement])?;
///
/// let font = &storage["Font"][0];
/// assert_eq!(font.target_full_name(), "Screen1.TextBox1");
/// assert_eq!(font.source_full_name(), Some("arial.ttf"));
/// # Ok::<(), designer_xref::XrefError>(())
/// ```
pub struct CategorizedStorage<S: ElementSource> {
    source: S,
    registry: Arc<ProviderRegistry>,
    config: XrefConfig,
    codec: ReferenceCodec,
    /// Every registered category, in registry order
    containers: IndexMap<String, ReferenceContainer>,
    /// Sections of unregistered categories kept for lossless round trips
    unknown_sections: Vec<CategorySection>,
    state: StorageState,
}

impl<S: ElementSource> CategorizedStorage<S> {
    /// Storage with the default configuration
    pub fn new(source: S, registry: Arc<ProviderRegistry>) -> Self {
        Self::from_parts(source, registry, XrefConfig::default())
    }

    /// Storage with a caller-supplied configuration (validated first)
    pub fn with_config(
        source: S,
        registry: Arc<ProviderRegistry>,
        config: XrefConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(source, registry, config))
    }

    fn from_parts(source: S, registry: Arc<ProviderRegistry>, config: XrefConfig) -> Self {
        let containers = empty_containers(&registry);
        Self {
            source,
            codec: ReferenceCodec::from_config(&config),
            registry,
            config,
            containers,
            unknown_sections: Vec::new(),
            state: StorageState::Uninitialized,
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Accessors
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn config(&self) -> &XrefConfig {
        &self.config
    }

    pub fn state(&self) -> StorageState {
        self.state
    }

    /// Registered category names, in registry order
    pub fn category_names(&self) -> Vec<&str> {
        self.registry.category_names(None)
    }

    /// Container of `category`; unregistered names are a caller error
    pub fn container(&self, category: &str) -> Result<&ReferenceContainer> {
        self.containers
            .get(category)
            .ok_or_else(|| XrefError::unknown_category(category))
    }

    pub fn container_mut(&mut self, category: &str) -> Result<&mut ReferenceContainer> {
        self.containers
            .get_mut(category)
            .ok_or_else(|| XrefError::unknown_category(category))
    }

    /// Containers in registry order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReferenceContainer)> {
        self.containers
            .iter()
            .map(|(category, container)| (category.as_str(), container))
    }

    /// Preserved sections of categories the registry does not know
    pub fn unknown_sections(&self) -> &[CategorySection] {
        &self.unknown_sections
    }

    pub fn total_references(&self) -> usize {
        self.containers.values().map(ReferenceContainer::len).sum()
    }

    /// Empty every container; the category set is kept
    pub fn clear_all_references(&mut self) {
        for container in self.containers.values_mut() {
            container.clear();
        }
        self.unknown_sections.clear();
        self.state = StorageState::Empty;
        debug!("Cleared all references of '{}'", self.source.name());
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Build
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Rebuild every container from `roots`
    ///
    /// Prior contents (including preserved unknown sections) are discarded,
    /// but only once the build has succeeded; a failing finder leaves the
    /// storage exactly as it was.
    pub fn find_references(
        &mut self,
        roots: &[&dyn DesignElement],
        root_filter: Option<&ElementPredicate<'_>>,
        predicate: &ElementPredicate<'_>,
    ) -> Result<BuildReport> {
        let outcome = IndexBuilder::new(&self.registry, &self.config).build(
            &self.source,
            roots,
            root_filter,
            predicate,
        )?;

        self.containers = outcome.containers;
        self.unknown_sections.clear();
        self.state = StorageState::Built;
        Ok(outcome.report)
    }

    /// `find_references` over every root and element
    pub fn find_all_references(&mut self, roots: &[&dyn DesignElement]) -> Result<BuildReport> {
        self.find_references(roots, None, &|_: &dyn DesignElement| true)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Persistence
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Encoded document without touching the element source
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if !self.state.can_save() {
            return Err(XrefError::invalid_state(
                "nothing to save: references were never built or loaded",
            ));
        }

        let sections: Vec<CategorySection> = self
            .containers
            .values()
            .map(CategorySection::from_container)
            .chain(self.unknown_sections.iter().cloned())
            .collect();
        self.codec.encode(&sections)
    }

    /// Write the encoded document to the source's write stream
    ///
    /// Returns the bytes written.
    pub fn save(&self) -> Result<Vec<u8>> {
        let bytes = self.to_bytes()?;
        {
            let mut stream = self.source.open_write_stream()?;
            stream.write_all(&bytes)?;
            stream.flush()?;
        }

        debug!(
            "Saved {} references of '{}' ({} bytes)",
            self.total_references(),
            self.source.name(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Replace the contents with the document in the source's read stream
    pub fn load(&mut self, validate: bool) -> Result<()> {
        let mut bytes = Vec::new();
        {
            let mut stream = self.source.open_read_stream()?;
            stream.read_to_end(&mut bytes)?;
        }
        self.load_from_slice(&bytes, validate)
    }

    /// `load` with the configured `validate_on_load`
    pub fn reload(&mut self) -> Result<()> {
        self.load(self.config.validate_on_load)
    }

    /// Replace the contents with an already-read document
    pub fn load_from_slice(&mut self, bytes: &[u8], validate: bool) -> Result<()> {
        let sections = self.codec.decode(bytes, validate)?;
        let parts = partition_sections(
            sections,
            &self.registry.category_names(None),
            self.config.preserve_unknown_categories,
        )?;

        self.containers = parts.known;
        self.unknown_sections = parts.unknown;
        self.state = StorageState::Loaded;

        debug!(
            "Loaded {} references of '{}' ({} unknown sections kept)",
            self.total_references(),
            self.source.name(),
            self.unknown_sections.len()
        );
        Ok(())
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Queries
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Entries of `category` whose source is exactly `source` (case-insensitive)
    pub fn find_usages(&self, category: &str, source: &str) -> Result<Vec<&ReferenceEntry>> {
        Ok(self.container(category)?.find_by_source(source))
    }

    /// Entries affected by renaming `old_name`: the name itself and everything below it
    pub fn rename_impact(&self, category: &str, old_name: &str) -> Result<Vec<&ReferenceEntry>> {
        let prefix = format!("{}{}", old_name, self.config.separator).to_lowercase();
        Ok(self
            .container(category)?
            .iter()
            .filter(|entry| {
                entry.item().source_is(old_name)
                    || entry
                        .source_full_name()
                        .map(|source| source.to_lowercase().starts_with(&prefix))
                        .unwrap_or(false)
            })
            .collect())
    }

    /// Drop every entry held by `target_full_name` or one of its sub-targets
    ///
    /// Returns the number of removed entries.
    pub fn remove_target(&mut self, target_full_name: &str) -> usize {
        let prefix = format!("{}{}", target_full_name, self.config.separator);
        let mut removed = 0;
        for container in self.containers.values_mut() {
            let before = container.len();
            container.retain(|entry| {
                let target = entry.target_full_name();
                target != target_full_name && !target.starts_with(&prefix)
            });
            removed += before - container.len();
        }

        debug!("Removed {} references held by '{}'", removed, target_full_name);
        removed
    }
}

impl<S: ElementSource> Index<&str> for CategorizedStorage<S> {
    type Output = ReferenceContainer;

    /// # Panics
    ///
    /// Panics if `category` is not registered; use `container` to handle that case.
    fn index(&self, category: &str) -> &Self::Output {
        match self.containers.get(category) {
            Some(container) => container,
            None => panic!("Unknown category: {}", category),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
