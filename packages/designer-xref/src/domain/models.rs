//! Reference item model
//!
//! One discovered edge is either a plain property reference or a reference
//! found inside an attached action list. Both variants live in the closed
//! `ReferenceEntry` sum so matching and persistence stay exhaustive.

use std::fmt;
use std::ops::Index;

// ═══════════════════════════════════════════════════════════════════════════
// Reference Items
// ═══════════════════════════════════════════════════════════════════════════

/// Directed edge from a named entity to the element property that uses it
///
/// # Examples
///
/// ```rust
/// use designer_xref::domain::ReferenceItem;
///
/// let item = ReferenceItem::new("Controller1.D0", "Screen1.NumericField1", "Value");
/// assert_eq!(item.source_full_name.as_deref(), Some("Controller1.D0"));
/// assert!(item.source_contains("d0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceItem {
    /// Fully-qualified referenced entity; `None` when the identity is implicit
    pub source_full_name: Option<String>,
    /// `<Screen><sep><Element>[<sep><SubItem>…]`
    pub target_full_name: String,
    /// Property holding the reference; empty for structural references
    pub target_property_name: String,
}

impl ReferenceItem {
    pub fn new(
        source_full_name: impl Into<String>,
        target_full_name: impl Into<String>,
        target_property_name: impl Into<String>,
    ) -> Self {
        Self {
            source_full_name: Some(source_full_name.into()),
            target_full_name: target_full_name.into(),
            target_property_name: target_property_name.into(),
        }
    }

    /// Reference whose source is implied by the target property
    pub fn implicit(
        target_full_name: impl Into<String>,
        target_property_name: impl Into<String>,
    ) -> Self {
        Self {
            source_full_name: None,
            target_full_name: target_full_name.into(),
            target_property_name: target_property_name.into(),
        }
    }

    /// Case-insensitive substring match on the source name
    pub fn source_contains(&self, needle: &str) -> bool {
        self.source_full_name
            .as_deref()
            .map(|source| source.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false)
    }

    /// Case-insensitive exact match on the source name
    pub fn source_is(&self, name: &str) -> bool {
        self.source_full_name
            .as_deref()
            .map(|source| source.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    }

    pub fn is_structural(&self) -> bool {
        self.target_property_name.is_empty()
    }
}

/// Reference discovered inside an attached action list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionReferenceItem {
    pub item: ReferenceItem,
    /// Action identifier (e.g. `LoadRecipe`)
    pub action_name: String,
    /// Triggering event (e.g. `Click`)
    pub event_name: String,
}

impl ActionReferenceItem {
    pub fn new(
        item: ReferenceItem,
        action_name: impl Into<String>,
        event_name: impl Into<String>,
    ) -> Self {
        Self {
            item,
            action_name: action_name.into(),
            event_name: event_name.into(),
        }
    }
}

/// Variant discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Plain,
    Action,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Plain => "plain",
            EntryKind::Action => "action",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a reference container
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceEntry {
    Plain(ReferenceItem),
    Action(ActionReferenceItem),
}

impl ReferenceEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            ReferenceEntry::Plain(_) => EntryKind::Plain,
            ReferenceEntry::Action(_) => EntryKind::Action,
        }
    }

    /// Base identity fields shared by both variants
    pub fn item(&self) -> &ReferenceItem {
        match self {
            ReferenceEntry::Plain(item) => item,
            ReferenceEntry::Action(action) => &action.item,
        }
    }

    pub fn as_action(&self) -> Option<&ActionReferenceItem> {
        match self {
            ReferenceEntry::Plain(_) => None,
            ReferenceEntry::Action(action) => Some(action),
        }
    }

    pub fn is_action(&self) -> bool {
        matches!(self, ReferenceEntry::Action(_))
    }

    pub fn source_full_name(&self) -> Option<&str> {
        self.item().source_full_name.as_deref()
    }

    pub fn target_full_name(&self) -> &str {
        &self.item().target_full_name
    }

    pub fn target_property_name(&self) -> &str {
        &self.item().target_property_name
    }
}

impl From<ReferenceItem> for ReferenceEntry {
    fn from(item: ReferenceItem) -> Self {
        ReferenceEntry::Plain(item)
    }
}

impl From<ActionReferenceItem> for ReferenceEntry {
    fn from(action: ActionReferenceItem) -> Self {
        ReferenceEntry::Action(action)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Reference Container
// ═══════════════════════════════════════════════════════════════════════════

/// Insertion-ordered references of one category
///
/// Order is discovery order (traversal order, then provider order within an
/// element) and is preserved through persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceContainer {
    category: String,
    entries: Vec<ReferenceEntry>,
}

impl ReferenceContainer {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entries(category: impl Into<String>, entries: Vec<ReferenceEntry>) -> Self {
        Self {
            category: category.into(),
            entries,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn push(&mut self, entry: impl Into<ReferenceEntry>) {
        self.entries.push(entry.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReferenceEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ReferenceEntry> {
        self.entries.get(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keep only entries matching `keep`; order of the survivors is unchanged
    pub fn retain(&mut self, keep: impl FnMut(&ReferenceEntry) -> bool) {
        self.entries.retain(keep);
    }

    /// Entries whose source equals `source` (case-insensitive)
    pub fn find_by_source(&self, source: &str) -> Vec<&ReferenceEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.item().source_is(source))
            .collect()
    }

    /// Entries held by exactly this target
    pub fn find_by_target(&self, target_full_name: &str) -> Vec<&ReferenceEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.target_full_name() == target_full_name)
            .collect()
    }
}

impl Index<usize> for ReferenceContainer {
    type Output = ReferenceEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a ReferenceContainer {
    type Item = &'a ReferenceEntry;
    type IntoIter = std::slice::Iter<'a, ReferenceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
