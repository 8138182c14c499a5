//! Design element model
//!
//! The designer's concrete element types live elsewhere; the index only sees
//! them through `DesignElement`. `ElementNode` is the owned implementation
//! used for virtual targets and by callers that build graphs directly.

// ═══════════════════════════════════════════════════════════════════════════
// Property Values
// ═══════════════════════════════════════════════════════════════════════════

/// Kind of named entity a property value refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    DataItem,
    Font,
    Symbol,
    Screen,
    Recipe,
    TextResource,
    Script,
    Expression,
}

/// Typed property value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PropertyValue {
    /// Property not set
    #[default]
    Unset,
    /// Bound to something that no longer resolves (kept verbatim)
    Invalid(String),
    /// Literal text, never a reference
    Text(String),
    /// Data tag path, e.g. `Controller1.D0`
    DataItem(String),
    /// Font family name, e.g. `Arial`
    Font(String),
    Symbol(String),
    Screen(String),
    /// Recipe field path, e.g. `Recipe2.Field23`
    Recipe(String),
    TextResource(String),
    Script(String),
    Expression(String),
    /// Interval-to-resource map
    Intervals(Vec<IntervalEntry>),
}

impl PropertyValue {
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            PropertyValue::DataItem(_) => Some(ValueKind::DataItem),
            PropertyValue::Font(_) => Some(ValueKind::Font),
            PropertyValue::Symbol(_) => Some(ValueKind::Symbol),
            PropertyValue::Screen(_) => Some(ValueKind::Screen),
            PropertyValue::Recipe(_) => Some(ValueKind::Recipe),
            PropertyValue::TextResource(_) => Some(ValueKind::TextResource),
            PropertyValue::Script(_) => Some(ValueKind::Script),
            PropertyValue::Expression(_) => Some(ValueKind::Expression),
            PropertyValue::Unset
            | PropertyValue::Invalid(_)
            | PropertyValue::Text(_)
            | PropertyValue::Intervals(_) => None,
        }
    }

    /// Referenced name, or `None` for non-references and placeholders
    pub fn reference_name(&self) -> Option<&str> {
        let name = match self {
            PropertyValue::DataItem(name)
            | PropertyValue::Font(name)
            | PropertyValue::Symbol(name)
            | PropertyValue::Screen(name)
            | PropertyValue::Recipe(name)
            | PropertyValue::TextResource(name)
            | PropertyValue::Script(name)
            | PropertyValue::Expression(name) => name.as_str(),
            _ => return None,
        };

        if name.trim().is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Referenced name if this value refers to an entity of `kind`
    pub fn reference_of(&self, kind: ValueKind) -> Option<&str> {
        if self.kind() == Some(kind) {
            self.reference_name()
        } else {
            None
        }
    }

    pub fn is_placeholder(&self) -> bool {
        match self {
            PropertyValue::Unset | PropertyValue::Invalid(_) => true,
            PropertyValue::Text(_) => false,
            PropertyValue::Intervals(entries) => entries.is_empty(),
            _ => self.reference_name().is_none(),
        }
    }
}

/// One `(rangeStart, rangeEnd, resource)` entry of an interval map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalEntry {
    pub start: i64,
    pub end: i64,
    pub value: PropertyValue,
}

impl IntervalEntry {
    pub fn new(start: i64, end: i64, value: PropertyValue) -> Self {
        Self { start, end, value }
    }

    /// No usable resource or an inverted range
    pub fn is_empty(&self) -> bool {
        self.start > self.end || self.value.is_placeholder()
    }
}

/// Named property of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Action Lists
// ═══════════════════════════════════════════════════════════════════════════

/// Well-known action identifiers
pub mod actions {
    pub const LOAD_RECIPE: &str = "LoadRecipe";
    pub const SAVE_RECIPE: &str = "SaveRecipe";
    pub const SHOW_SCREEN: &str = "ShowScreen";
    pub const SET_TAG: &str = "SetTag";
    pub const RUN_SCRIPT: &str = "RunScript";
}

/// One action attached to an element event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBinding {
    pub event_name: String,
    pub action_name: String,
    pub parameters: Vec<PropertyValue>,
}

impl ActionBinding {
    pub fn new(
        event_name: impl Into<String>,
        action_name: impl Into<String>,
        parameters: Vec<PropertyValue>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            action_name: action_name.into(),
            parameters,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Element Trait
// ═══════════════════════════════════════════════════════════════════════════

/// Read-only view of one element of the designer graph
pub trait DesignElement {
    fn name(&self) -> &str;

    fn element_type(&self) -> &str;

    /// Properties in declaration order
    fn properties(&self) -> &[Property];

    fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties()
            .iter()
            .find(|property| property.name == name)
            .map(|property| &property.value)
    }

    /// Structural children (ordinary tree children)
    fn children(&self) -> Vec<&dyn DesignElement> {
        Vec::new()
    }

    /// Nested addressable items that are not tree children (chart series, struct members)
    fn sub_items(&self) -> Vec<&dyn DesignElement> {
        Vec::new()
    }

    /// Attached action list
    fn actions(&self) -> &[ActionBinding] {
        &[]
    }
}

/// Owned element with builder-style construction
///
/// # Examples
///
/// ```rust
/// use designer_xref::domain::{DesignElement, ElementNode, PropertyValue};
///
/// let text_box = ElementNode::new("TextBox1", "TextBox")
///     .with_property("FontFamily", PropertyValue::Font("Arial".into()));
/// assert_eq!(text_box.name(), "TextBox1");
/// assert!(text_box.property("FontFamily").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementNode {
    pub name: String,
    pub element_type: String,
    pub properties: Vec<Property>,
    pub children: Vec<ElementNode>,
    pub sub_items: Vec<ElementNode>,
    pub actions: Vec<ActionBinding>,
}

impl ElementNode {
    pub fn new(name: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            element_type: element_type.into(),
            ..Self::default()
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }

    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_sub_item(mut self, item: ElementNode) -> Self {
        self.sub_items.push(item);
        self
    }

    pub fn with_action(
        mut self,
        event_name: impl Into<String>,
        action_name: impl Into<String>,
        parameters: Vec<PropertyValue>,
    ) -> Self {
        self.actions
            .push(ActionBinding::new(event_name, action_name, parameters));
        self
    }
}

impl DesignElement for ElementNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn element_type(&self) -> &str {
        &self.element_type
    }

    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn children(&self) -> Vec<&dyn DesignElement> {
        self.children
            .iter()
            .map(|child| child as &dyn DesignElement)
            .collect()
    }

    fn sub_items(&self) -> Vec<&dyn DesignElement> {
        self.sub_items
            .iter()
            .map(|item| item as &dyn DesignElement)
            .collect()
    }

    fn actions(&self) -> &[ActionBinding] {
        &self.actions
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Traversal Targets
// ═══════════════════════════════════════════════════════════════════════════

/// Name chain of a target: the real element, then virtual sub-target suffixes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetPath {
    segments: Vec<String>,
}

impl TargetPath {
    pub fn root(element_name: impl Into<String>) -> Self {
        Self {
            segments: vec![element_name.into()],
        }
    }

    pub fn child(&self, suffix: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(suffix.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of virtual suffixes below the real element
    pub fn depth(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    pub fn join(&self, separator: &str) -> String {
        self.segments.join(separator)
    }
}

/// Element being scanned together with its name chain
#[derive(Clone, Copy)]
pub struct ScanTarget<'a> {
    pub element: &'a dyn DesignElement,
    pub path: &'a TargetPath,
}

impl<'a> ScanTarget<'a> {
    pub fn new(element: &'a dyn DesignElement, path: &'a TargetPath) -> Self {
        Self { element, path }
    }

    pub fn is_virtual(&self) -> bool {
        self.path.depth() > 0
    }
}

/// Virtual element produced by a resolver: borrowed from the element or synthesized
pub enum TargetElement<'a> {
    Borrowed(&'a dyn DesignElement),
    Owned(ElementNode),
}

impl<'a> TargetElement<'a> {
    pub fn as_element(&self) -> &dyn DesignElement {
        match self {
            TargetElement::Borrowed(element) => *element,
            TargetElement::Owned(node) => node,
        }
    }
}

/// Virtual sub-target with the suffix appended to its parent's target name
pub struct SubTarget<'a> {
    pub element: TargetElement<'a>,
    pub display_name_suffix: String,
}

impl<'a> SubTarget<'a> {
    pub fn borrowed(element: &'a dyn DesignElement, display_name_suffix: impl Into<String>) -> Self {
        Self {
            element: TargetElement::Borrowed(element),
            display_name_suffix: display_name_suffix.into(),
        }
    }

    pub fn owned(element: ElementNode, display_name_suffix: impl Into<String>) -> Self {
        Self {
            element: TargetElement::Owned(element),
            display_name_suffix: display_name_suffix.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_of_matches_kind_only() {
        let value = PropertyValue::DataItem("Controller1.D0".into());
        assert_eq!(value.reference_of(ValueKind::DataItem), Some("Controller1.D0"));
        assert_eq!(value.reference_of(ValueKind::Font), None);
        assert_eq!(PropertyValue::Text("Arial".into()).reference_of(ValueKind::Font), None);
    }

    #[test]
    fn test_placeholders_are_not_references() {
        assert!(PropertyValue::DataItem("  ".into()).reference_name().is_none());
        assert!(PropertyValue::DataItem(String::new()).is_placeholder());
        assert!(PropertyValue::Invalid("Controller9.X".into()).is_placeholder());
        assert!(PropertyValue::Unset.is_placeholder());
        assert!(PropertyValue::Intervals(Vec::new()).is_placeholder());
        assert!(!PropertyValue::Text(String::new()).is_placeholder());
    }

    #[test]
    fn test_interval_entry_emptiness() {
        let symbol = PropertyValue::Symbol("Lamp_On".into());
        assert!(!IntervalEntry::new(0, 10, symbol.clone()).is_empty());
        assert!(IntervalEntry::new(10, 0, symbol).is_empty());
        assert!(IntervalEntry::new(0, 10, PropertyValue::Unset).is_empty());
    }

    #[test]
    fn test_element_node_builder() {
        let chart = ElementNode::new("Chart1", "Chart")
            .with_property("Title", PropertyValue::Text("Trend".into()))
            .with_sub_item(ElementNode::new("Series1", "ChartSeries"))
            .with_child(ElementNode::new("Legend", "Legend"))
            .with_action("Click", actions::SHOW_SCREEN, vec![PropertyValue::Screen("Screen2".into())]);

        assert_eq!(chart.element_type(), "Chart");
        assert_eq!(chart.sub_items().len(), 1);
        assert_eq!(chart.children()[0].name(), "Legend");
        assert_eq!(chart.actions()[0].action_name, "ShowScreen");
        assert_eq!(chart.property("Title"), Some(&PropertyValue::Text("Trend".into())));
        assert_eq!(chart.property("Missing"), None);
    }

    #[test]
    fn test_target_path() {
        let path = TargetPath::root("Chart1");
        assert_eq!(path.depth(), 0);

        let series = path.child("Series1");
        assert_eq!(series.depth(), 1);
        assert_eq!(series.join("."), "Chart1.Series1");
        assert_eq!(series.segments(), &["Chart1".to_string(), "Series1".to_string()]);
    }

    #[test]
    fn test_target_element_access() {
        let node = ElementNode::new("Series1", "ChartSeries");
        let borrowed = SubTarget::borrowed(&node, "Series1");
        let owned = SubTarget::owned(node.clone(), "Series1");

        assert_eq!(borrowed.element.as_element().name(), "Series1");
        assert_eq!(owned.element.as_element().element_type(), "ChartSeries");
    }
}
