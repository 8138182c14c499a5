use crate::domain::{DesignElement, DetailedTargetResolver, ElementNode, PropertyValue, SubTarget};

/// Element type of synthesized interval targets
pub const INTERVAL_ELEMENT_TYPE: &str = "IntervalEntry";

/// Exposes every non-empty entry of an interval map as a virtual target
///
/// The target is named `<Property>[<start>-<end>]` and holds the entry's
/// resource under an empty property name, so the resulting references are
/// structural: the interval entry itself is the user of the resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalResolver;

impl IntervalResolver {
    pub fn new() -> Self {
        Self
    }
}

impl DetailedTargetResolver for IntervalResolver {
    fn name(&self) -> &str {
        "IntervalResolver"
    }

    fn resolve_sub_targets<'a>(&self, element: &'a dyn DesignElement) -> Vec<SubTarget<'a>> {
        let mut targets = Vec::new();
        for property in element.properties() {
            let PropertyValue::Intervals(entries) = &property.value else {
                continue;
            };

            for entry in entries.iter().filter(|entry| !entry.is_empty()) {
                let suffix = format!("{}[{}-{}]", property.name, entry.start, entry.end);
                let node = ElementNode::new(suffix.clone(), INTERVAL_ELEMENT_TYPE)
                    .with_property("", entry.value.clone());
                targets.push(SubTarget::owned(node, suffix));
            }
        }
        targets
    }
}
