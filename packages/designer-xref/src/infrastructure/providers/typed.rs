//! Providers whose source name is the referenced value itself

use super::value_hits;
use crate::domain::{
    categories, ElementPredicate, FindIter, FoundReference, ReferenceFinder, ReferenceProvider,
    ScanTarget, SourceContext, ValueKind,
};
use crate::Result;

/// Detects references of one `ValueKind` and files them under one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedReferenceProvider {
    name: String,
    category: String,
    kind: ValueKind,
}

impl TypedReferenceProvider {
    pub fn new(name: impl Into<String>, category: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            kind,
        }
    }

    /// Data tag bindings (`Controller1.D0`)
    pub fn data_items() -> Self {
        Self::new("GlobalDataItemProvider", categories::GLOBAL_DATA_ITEM, ValueKind::DataItem)
    }

    pub fn symbols() -> Self {
        Self::new("SymbolProvider", categories::SYMBOL, ValueKind::Symbol)
    }

    pub fn screens() -> Self {
        Self::new("ScreenProvider", categories::SCREEN, ValueKind::Screen)
    }

    /// Recipe fields, typically reached through load/save recipe actions
    pub fn recipes() -> Self {
        Self::new("RecipeProvider", categories::RECIPE, ValueKind::Recipe)
    }

    pub fn text_library() -> Self {
        Self::new("TextLibraryProvider", categories::TEXT_LIBRARY, ValueKind::TextResource)
    }

    pub fn scripts() -> Self {
        Self::new("ScriptProvider", categories::SCRIPT, ValueKind::Script)
    }

    pub fn expressions() -> Self {
        Self::new("ExpressionProvider", categories::EXPRESSION, ValueKind::Expression)
    }
}

impl ReferenceProvider for TypedReferenceProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn categories(&self) -> Vec<String> {
        vec![self.category.clone()]
    }

    fn create_finder<'p>(&'p self, context: SourceContext) -> Box<dyn ReferenceFinder + 'p> {
        Box::new(TypedFinder {
            provider: self,
            context,
        })
    }
}

struct TypedFinder<'p> {
    provider: &'p TypedReferenceProvider,
    context: SourceContext,
}

impl<'p> ReferenceFinder for TypedFinder<'p> {
    fn find<'a>(
        &'a self,
        target: ScanTarget<'a>,
        include: &'a ElementPredicate<'a>,
    ) -> FindIter<'a> {
        if !include(target.element) {
            return Box::new(std::iter::empty());
        }

        let target_full_name = self.context.target_full_name(target.path);
        let category = self.provider.category.as_str();
        Box::new(
            value_hits(target.element, self.provider.kind).map(move |hit| -> Result<FoundReference> {
                let source = Some(hit.name().to_string());
                Ok(FoundReference::new(
                    category,
                    hit.into_entry(source, target_full_name.clone()),
                ))
            }),
        )
    }
}
