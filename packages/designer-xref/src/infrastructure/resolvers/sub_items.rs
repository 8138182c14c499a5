use crate::domain::{DesignElement, DetailedTargetResolver, SubTarget};

/// Exposes `DesignElement::sub_items` as virtual targets named after each item
#[derive(Debug, Clone, Copy, Default)]
pub struct SubItemResolver;

impl SubItemResolver {
    pub fn new() -> Self {
        Self
    }
}

impl DetailedTargetResolver for SubItemResolver {
    fn name(&self) -> &str {
        "SubItemResolver"
    }

    fn resolve_sub_targets<'a>(&self, element: &'a dyn DesignElement) -> Vec<SubTarget<'a>> {
        element
            .sub_items()
            .into_iter()
            .map(|item| SubTarget::borrowed(item, item.name()))
            .collect()
    }
}
