//! Provider registry
//!
//! Owns the registered providers and resolvers and the category → provider
//! mapping. The mapping is built once at registration time; registration
//! order is observable because it fixes item order within one element.

use indexmap::IndexMap;
use tracing::debug;

use crate::domain::{DetailedTargetResolver, ReferenceFinder, ReferenceProvider, SourceContext};
use crate::{Result, XrefError};

/// Provider description cached at registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub name: String,
    pub categories: Vec<String>,
    /// Registration position
    pub order: usize,
}

impl ProviderMetadata {
    pub fn serves(&self, category: &str) -> bool {
        self.categories.iter().any(|served| served == category)
    }
}

/// Finder bound to one element source, tagged with its provider's metadata
pub struct BoundFinder<'r> {
    pub provider: &'r ProviderMetadata,
    pub finder: Box<dyn ReferenceFinder + 'r>,
}

/// Registry of reference providers and detailed target resolvers
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn ReferenceProvider>>,
    metadata: Vec<ProviderMetadata>,
    /// Category → provider positions, categories in first-registration order
    by_category: IndexMap<String, Vec<usize>>,
    resolvers: Vec<Box<dyn DetailedTargetResolver>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_providers(providers: Vec<Box<dyn ReferenceProvider>>) -> Self {
        let mut registry = Self::new();
        for provider in providers {
            registry.register_provider(provider);
        }
        registry
    }

    /// Append a provider; its categories join the category set
    pub fn register_provider(&mut self, provider: Box<dyn ReferenceProvider>) {
        let order = self.providers.len();
        let mut categories: Vec<String> = Vec::new();
        for category in provider.categories() {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        for category in &categories {
            self.by_category
                .entry(category.clone())
                .or_default()
                .push(order);
        }

        debug!(
            "Registered provider '{}' (#{}) for {:?}",
            provider.name(),
            order,
            categories
        );

        self.metadata.push(ProviderMetadata {
            name: provider.name().to_string(),
            categories,
            order,
        });
        self.providers.push(provider);
    }

    /// Append a resolver; resolvers run in registration order
    pub fn register_resolver(&mut self, resolver: Box<dyn DetailedTargetResolver>) {
        debug!("Registered resolver '{}'", resolver.name());
        self.resolvers.push(resolver);
    }

    pub fn with_resolver(mut self, resolver: Box<dyn DetailedTargetResolver>) -> Self {
        self.register_resolver(resolver);
        self
    }

    /// Valid category names, optionally restricted to providers matching `filter`
    pub fn category_names(&self, filter: Option<&dyn Fn(&ProviderMetadata) -> bool>) -> Vec<&str> {
        self.by_category
            .iter()
            .filter(|(_, positions)| match filter {
                Some(filter) => positions.iter().any(|&i| filter(&self.metadata[i])),
                None => true,
            })
            .map(|(category, _)| category.as_str())
            .collect()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.by_category.contains_key(category)
    }

    /// Providers serving `category`, in registration order
    pub fn providers_for(&self, category: &str) -> Result<Vec<&ProviderMetadata>> {
        let positions = self
            .by_category
            .get(category)
            .ok_or_else(|| XrefError::unknown_category(category))?;
        Ok(positions.iter().map(|&i| &self.metadata[i]).collect())
    }

    pub fn metadata(&self) -> &[ProviderMetadata] {
        &self.metadata
    }

    pub fn resolvers(&self) -> &[Box<dyn DetailedTargetResolver>] {
        &self.resolvers
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Bind every provider to one element source, in registration order
    pub fn create_finders_for(&self, context: &SourceContext) -> Vec<BoundFinder<'_>> {
        self.providers
            .iter()
            .zip(&self.metadata)
            .map(|(provider, metadata)| BoundFinder {
                provider: metadata,
                finder: provider.create_finder(context.clone()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ElementPredicate, FindIter, ScanTarget};

    struct StaticProvider {
        name: &'static str,
        categories: &'static [&'static str],
    }

    struct NoopFinder;

    impl ReferenceFinder for NoopFinder {
        fn find<'a>(
            &'a self,
            _target: ScanTarget<'a>,
            _include: &'a ElementPredicate<'a>,
        ) -> FindIter<'a> {
            Box::new(std::iter::empty())
        }
    }

    impl ReferenceProvider for StaticProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn categories(&self) -> Vec<String> {
            self.categories.iter().map(|c| c.to_string()).collect()
        }

        fn create_finder<'p>(&'p self, _context: SourceContext) -> Box<dyn ReferenceFinder + 'p> {
            Box::new(NoopFinder)
        }
    }

    fn registry() -> ProviderRegistry {
        ProviderRegistry::with_providers(vec![
            Box::new(StaticProvider {
                name: "tags",
                categories: &["GlobalDataItem"],
            }),
            Box::new(StaticProvider {
                name: "resources",
                categories: &["Symbol", "Font", "Symbol"],
            }),
            Box::new(StaticProvider {
                name: "fonts",
                categories: &["Font"],
            }),
        ])
    }

    #[test]
    fn test_category_names_in_registration_order() {
        let registry = registry();
        assert_eq!(
            registry.category_names(None),
            vec!["GlobalDataItem", "Symbol", "Font"]
        );
        assert_eq!(registry.metadata()[1].categories, vec!["Symbol", "Font"]);
    }

    #[test]
    fn test_category_names_filtered_by_metadata() {
        let registry = registry();
        let only_fonts = |m: &ProviderMetadata| m.name == "fonts";
        assert_eq!(registry.category_names(Some(&only_fonts)), vec!["Font"]);
    }

    #[test]
    fn test_providers_for_category() {
        let registry = registry();
        let names: Vec<_> = registry
            .providers_for("Font")
            .unwrap()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["resources", "fonts"]);

        let err = registry.providers_for("Alarm").unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::UnknownCategory);
        assert!(!registry.has_category("Alarm"));
    }

    #[test]
    fn test_create_finders_preserves_order() {
        let registry = registry();
        let context = SourceContext {
            source_name: "Screen1".into(),
            separator: ".".into(),
        };
        let finders = registry.create_finders_for(&context);
        let names: Vec<_> = finders.iter().map(|f| f.provider.name.as_str()).collect();
        assert_eq!(names, vec!["tags", "resources", "fonts"]);
        assert_eq!(registry.provider_count(), 3);
    }
}
