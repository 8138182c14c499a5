//! Built-in reference providers
//!
//! Every built-in provider looks for property values of one `ValueKind`:
//! direct properties become plain items, action parameters become action
//! items whose property name is the triggering event.

mod font;
mod typed;

pub use font::FontReferenceProvider;
pub use typed::TypedReferenceProvider;

use std::sync::Arc;

use crate::application::ProviderRegistry;
use crate::domain::{
    ActionBinding, ActionReferenceItem, DesignElement, FontResolver, ReferenceEntry,
    ReferenceItem, ReferenceProvider, ValueKind,
};
use crate::infrastructure::resolvers::{IntervalResolver, SubItemResolver};

/// Built-in providers in registration order
pub fn builtin_providers(font_resolver: Arc<dyn FontResolver>) -> Vec<Box<dyn ReferenceProvider>> {
    vec![
        Box::new(TypedReferenceProvider::data_items()),
        Box::new(FontReferenceProvider::new(font_resolver)),
        Box::new(TypedReferenceProvider::symbols()),
        Box::new(TypedReferenceProvider::screens()),
        Box::new(TypedReferenceProvider::recipes()),
        Box::new(TypedReferenceProvider::text_library()),
        Box::new(TypedReferenceProvider::scripts()),
        Box::new(TypedReferenceProvider::expressions()),
    ]
}

/// Registry with every built-in provider plus the sub-item and interval resolvers
pub fn builtin_registry(font_resolver: Arc<dyn FontResolver>) -> ProviderRegistry {
    ProviderRegistry::with_providers(builtin_providers(font_resolver))
        .with_resolver(Box::new(SubItemResolver::new()))
        .with_resolver(Box::new(IntervalResolver::new()))
}

/// One reference-valued slot found on an element
#[derive(Debug, Clone, Copy)]
pub(crate) enum ValueHit<'a> {
    Property { property: &'a str, name: &'a str },
    Action { action: &'a ActionBinding, name: &'a str },
}

impl<'a> ValueHit<'a> {
    pub(crate) fn name(&self) -> &'a str {
        match self {
            ValueHit::Property { name, .. } | ValueHit::Action { name, .. } => name,
        }
    }

    pub(crate) fn into_entry(self, source: Option<String>, target_full_name: String) -> ReferenceEntry {
        match self {
            ValueHit::Property { property, .. } => ReferenceEntry::Plain(ReferenceItem {
                source_full_name: source,
                target_full_name,
                target_property_name: property.to_string(),
            }),
            ValueHit::Action { action, .. } => ReferenceEntry::Action(ActionReferenceItem::new(
                ReferenceItem {
                    source_full_name: source,
                    target_full_name,
                    target_property_name: action.event_name.clone(),
                },
                action.action_name.clone(),
                action.event_name.clone(),
            )),
        }
    }
}

/// Properties first (declaration order), then action parameters (list order)
pub(crate) fn value_hits<'a>(
    element: &'a dyn DesignElement,
    kind: ValueKind,
) -> impl Iterator<Item = ValueHit<'a>> + 'a {
    let properties = element.properties().iter().filter_map(move |property| {
        property
            .value
            .reference_of(kind)
            .map(|name| ValueHit::Property {
                property: property.name.as_str(),
                name,
            })
    });

    let actions = element.actions().iter().flat_map(move |action| {
        action
            .parameters
            .iter()
            .filter_map(move |parameter| parameter.reference_of(kind))
            .map(move |name| ValueHit::Action { action, name })
    });

    properties.chain(actions)
}
