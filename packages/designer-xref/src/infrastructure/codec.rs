//! Reference document codec (JSON)
//!
//! ```text
//! {
//!   "schema": "designer-xref",
//!   "version": 1,
//!   "checksum": "sha256:<hex of compact categories JSON>",
//!   "categories": [
//!     { "name": "Font", "items": [
//!         { "kind": "plain", "source": "arial.ttf", "target": "Screen1.TextBox1", "property": "FontFamily" },
//!         { "kind": "action", "source": "Recipe2.Field23", "target": "Screen1.Button1",
//!           "property": "Click", "action": "LoadRecipe", "event": "Click" } ] } ]
//! }
//! ```
//!
//! Output is byte-deterministic: sections, items and fields are written in a
//! fixed order and nothing run-dependent is stored. The checksum is derived
//! from the sections themselves.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::XrefConfig;
use crate::domain::{ActionReferenceItem, ReferenceContainer, ReferenceEntry, ReferenceItem};
use crate::{Result, XrefError};

/// Schema identifier written at the document root
pub const SCHEMA_NAME: &str = "designer-xref";

/// Current document version
pub const SCHEMA_VERSION: u32 = 1;

const SUPPORTED_SCHEMA_VERSIONS: &[u32] = &[1];
const CHECKSUM_PREFIX: &str = "sha256:";

// ═══════════════════════════════════════════════════════════════════════════
// Persisted Records
// ═══════════════════════════════════════════════════════════════════════════

/// Persisted form of one entry; `kind` is the explicit variant discriminator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryRecord {
    Plain {
        source: Option<String>,
        target: String,
        property: String,
    },
    Action {
        source: Option<String>,
        target: String,
        property: String,
        action: String,
        event: String,
    },
}

impl From<&ReferenceEntry> for EntryRecord {
    fn from(entry: &ReferenceEntry) -> Self {
        match entry {
            ReferenceEntry::Plain(item) => EntryRecord::Plain {
                source: item.source_full_name.clone(),
                target: item.target_full_name.clone(),
                property: item.target_property_name.clone(),
            },
            ReferenceEntry::Action(action) => EntryRecord::Action {
                source: action.item.source_full_name.clone(),
                target: action.item.target_full_name.clone(),
                property: action.item.target_property_name.clone(),
                action: action.action_name.clone(),
                event: action.event_name.clone(),
            },
        }
    }
}

impl From<EntryRecord> for ReferenceEntry {
    fn from(record: EntryRecord) -> Self {
        match record {
            EntryRecord::Plain {
                source,
                target,
                property,
            } => ReferenceEntry::Plain(ReferenceItem {
                source_full_name: source,
                target_full_name: target,
                target_property_name: property,
            }),
            EntryRecord::Action {
                source,
                target,
                property,
                action,
                event,
            } => ReferenceEntry::Action(ActionReferenceItem::new(
                ReferenceItem {
                    source_full_name: source,
                    target_full_name: target,
                    target_property_name: property,
                },
                action,
                event,
            )),
        }
    }
}

/// Persisted form of one category container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorySection {
    pub name: String,
    pub items: Vec<EntryRecord>,
}

impl CategorySection {
    pub fn from_container(container: &ReferenceContainer) -> Self {
        Self {
            name: container.category().to_string(),
            items: container.iter().map(EntryRecord::from).collect(),
        }
    }

    pub fn into_container(self) -> ReferenceContainer {
        ReferenceContainer::with_entries(
            self.name,
            self.items.into_iter().map(ReferenceEntry::from).collect(),
        )
    }
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    schema: &'a str,
    version: u32,
    checksum: String,
    categories: &'a [CategorySection],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentIn {
    schema: String,
    version: u32,
    checksum: String,
    categories: Vec<CategorySection>,
}

/// SHA256 over the compact JSON encoding of `sections`
pub fn checksum(sections: &[CategorySection]) -> Result<String> {
    let canonical = serde_json::to_vec(sections)
        .map_err(|e| XrefError::serialization(format!("checksum encoding failed: {}", e)))?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(format!("{}{:x}", CHECKSUM_PREFIX, hasher.finalize()))
}

// ═══════════════════════════════════════════════════════════════════════════
// Codec
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceCodec {
    pretty: bool,
}

impl Default for ReferenceCodec {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ReferenceCodec {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn from_config(config: &XrefConfig) -> Self {
        Self::new(config.pretty)
    }

    /// Encode sections in the given order
    pub fn encode(&self, sections: &[CategorySection]) -> Result<Vec<u8>> {
        let document = DocumentOut {
            schema: SCHEMA_NAME,
            version: SCHEMA_VERSION,
            checksum: checksum(sections)?,
            categories: sections,
        };

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&document)
        } else {
            serde_json::to_vec(&document)
        }
        .map_err(|e| XrefError::serialization(format!("reference document encoding failed: {}", e)))?;

        debug!(
            "Encoded {} category sections ({} bytes)",
            sections.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Decode sections in document order
    ///
    /// With `validate` the document is first checked structurally and its
    /// checksum verified; without it malformed input still fails, only later.
    pub fn decode(&self, bytes: &[u8], validate: bool) -> Result<Vec<CategorySection>> {
        let document: DocumentIn = if validate {
            let value: Value = serde_json::from_slice(bytes)?;
            validate_structure(&value)?;
            serde_json::from_value(value)?
        } else {
            serde_json::from_slice(bytes)?
        };

        if document.schema != SCHEMA_NAME {
            return Err(XrefError::malformed(format!(
                "unexpected schema '{}', expected '{}'",
                document.schema, SCHEMA_NAME
            )));
        }
        if !SUPPORTED_SCHEMA_VERSIONS.contains(&document.version) {
            return Err(XrefError::malformed(format!(
                "unsupported document version {}",
                document.version
            )));
        }

        if validate {
            let expected = checksum(&document.categories)?;
            if expected != document.checksum {
                return Err(XrefError::malformed(format!(
                    "checksum mismatch: document says {}, content is {}",
                    document.checksum, expected
                )));
            }
        }

        debug!(
            "Decoded {} category sections (validated: {})",
            document.categories.len(),
            validate
        );
        Ok(document.categories)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Section Partitioning
// ═══════════════════════════════════════════════════════════════════════════

/// Decoded sections split against the registry's category set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionedSections {
    /// Every registered category, in registry order; absent ones are empty
    pub known: IndexMap<String, ReferenceContainer>,
    /// Sections for unregistered categories, in document order (when preserved)
    pub unknown: Vec<CategorySection>,
}

pub fn partition_sections(
    sections: Vec<CategorySection>,
    registered: &[&str],
    preserve_unknown: bool,
) -> Result<PartitionedSections> {
    let mut known: IndexMap<String, ReferenceContainer> = registered
        .iter()
        .map(|category| (category.to_string(), ReferenceContainer::new(*category)))
        .collect();
    let mut unknown = Vec::new();
    let mut seen: Vec<String> = Vec::with_capacity(sections.len());

    for section in sections {
        if seen.contains(&section.name) {
            return Err(XrefError::malformed(format!(
                "duplicate category section '{}'",
                section.name
            )));
        }
        seen.push(section.name.clone());

        if known.contains_key(&section.name) {
            let name = section.name.clone();
            known.insert(name, section.into_container());
        } else if preserve_unknown {
            unknown.push(section);
        } else {
            warn!(
                "Dropping {} references of unregistered category '{}'",
                section.items.len(),
                section.name
            );
        }
    }

    Ok(PartitionedSections { known, unknown })
}

// ═══════════════════════════════════════════════════════════════════════════
// Structural Validation
// ═══════════════════════════════════════════════════════════════════════════

fn validate_structure(value: &Value) -> Result<()> {
    let root = value
        .as_object()
        .ok_or_else(|| XrefError::malformed("document root must be an object"))?;
    check_fields(root, &["schema", "version", "checksum", "categories"], &[], "document")?;

    require_str(root, "schema", "document")?;
    root.get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| XrefError::malformed("document: 'version' must be an unsigned integer"))?;
    let checksum = require_str(root, "checksum", "document")?;
    if !checksum.starts_with(CHECKSUM_PREFIX) {
        return Err(XrefError::malformed(format!(
            "document: checksum must start with '{}'",
            CHECKSUM_PREFIX
        )));
    }

    let sections = require_array(root, "categories", "document")?;
    for (i, section) in sections.iter().enumerate() {
        let at = format!("categories[{}]", i);
        let section = section
            .as_object()
            .ok_or_else(|| XrefError::malformed(format!("{}: must be an object", at)))?;
        check_fields(section, &["name", "items"], &[], &at)?;

        if require_str(section, "name", &at)?.is_empty() {
            return Err(XrefError::malformed(format!("{}: 'name' must not be empty", at)));
        }

        for (j, item) in require_array(section, "items", &at)?.iter().enumerate() {
            validate_item(item, &format!("{}.items[{}]", at, j))?;
        }
    }

    Ok(())
}

fn validate_item(item: &Value, at: &str) -> Result<()> {
    let item = item
        .as_object()
        .ok_or_else(|| XrefError::malformed(format!("{}: must be an object", at)))?;

    let base = ["kind", "source", "target", "property"];
    match require_str(item, "kind", at)? {
        "plain" => check_fields(item, &base, &[], at)?,
        "action" => {
            check_fields(item, &base, &["action", "event"], at)?;
            require_str(item, "action", at)?;
            require_str(item, "event", at)?;
        }
        other => {
            return Err(XrefError::malformed(format!(
                "{}: unknown entry kind '{}'",
                at, other
            )))
        }
    }

    match item.get("source") {
        Some(Value::String(_)) | Some(Value::Null) => {}
        _ => {
            return Err(XrefError::malformed(format!(
                "{}: 'source' must be a string or null",
                at
            )))
        }
    }
    require_str(item, "target", at)?;
    require_str(item, "property", at)?;
    Ok(())
}

/// Every required field present, nothing beyond `required` + `extra`
fn check_fields(
    object: &Map<String, Value>,
    required: &[&str],
    extra: &[&str],
    at: &str,
) -> Result<()> {
    for field in required.iter().chain(extra) {
        if !object.contains_key(*field) {
            return Err(XrefError::malformed(format!("{}: missing '{}'", at, field)));
        }
    }
    for key in object.keys() {
        if !required.contains(&key.as_str()) && !extra.contains(&key.as_str()) {
            return Err(XrefError::malformed(format!("{}: unexpected field '{}'", at, key)));
        }
    }
    Ok(())
}

fn require_str<'v>(object: &'v Map<String, Value>, field: &str, at: &str) -> Result<&'v str> {
    object
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| XrefError::malformed(format!("{}: '{}' must be a string", at, field)))
}

fn require_array<'v>(
    object: &'v Map<String, Value>,
    field: &str,
    at: &str,
) -> Result<&'v Vec<Value>> {
    object
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| XrefError::malformed(format!("{}: '{}' must be an array", at, field)))
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
