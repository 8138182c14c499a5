//! Font provider
//!
//! The persisted source of a font reference is the font *file* backing the
//! family, not the family name, so every hit goes through a `FontResolver`.

use std::sync::Arc;

use tracing::warn;

use super::value_hits;
use crate::domain::{
    categories, ElementPredicate, FindIter, FontResolution, FontResolver, FoundReference,
    ReferenceFinder, ReferenceProvider, ScanTarget, SourceContext, ValueKind,
};
use crate::Result;

pub struct FontReferenceProvider {
    resolver: Arc<dyn FontResolver>,
}

impl FontReferenceProvider {
    pub fn new(resolver: Arc<dyn FontResolver>) -> Self {
        Self { resolver }
    }
}

impl ReferenceProvider for FontReferenceProvider {
    fn name(&self) -> &str {
        "FontProvider"
    }

    fn categories(&self) -> Vec<String> {
        vec![categories::FONT.to_string()]
    }

    fn create_finder<'p>(&'p self, context: SourceContext) -> Box<dyn ReferenceFinder + 'p> {
        Box::new(FontFinder {
            resolver: self.resolver.as_ref(),
            context,
        })
    }
}

struct FontFinder<'p> {
    resolver: &'p dyn FontResolver,
    context: SourceContext,
}

impl<'p> FontFinder<'p> {
    /// Font file for `family`; ambiguous and unresolved families keep an implicit source
    fn font_file(&self, family: &str, target_full_name: &str) -> Option<String> {
        match self.resolver.resolve(family) {
            FontResolution::Unique(file) => Some(file),
            FontResolution::Ambiguous(candidates) => {
                warn!(
                    "Font family '{}' on {} matches several font files {:?}; source left implicit",
                    family, target_full_name, candidates
                );
                None
            }
            FontResolution::Unresolved => None,
        }
    }
}

impl<'p> ReferenceFinder for FontFinder<'p> {
    fn find<'a>(
        &'a self,
        target: ScanTarget<'a>,
        include: &'a ElementPredicate<'a>,
    ) -> FindIter<'a> {
        if !include(target.element) {
            return Box::new(std::iter::empty());
        }

        let target_full_name = self.context.target_full_name(target.path);
        Box::new(
            value_hits(target.element, ValueKind::Font).map(move |hit| -> Result<FoundReference> {
                let source = self.font_file(hit.name(), &target_full_name);
                Ok(FoundReference::new(
                    categories::FONT,
                    hit.into_entry(source, target_full_name.clone()),
                ))
            }),
        )
    }
}
