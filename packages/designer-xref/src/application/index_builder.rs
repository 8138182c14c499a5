//! Index Builder - depth-first reference collection
//!
//! Walks the element tree, expands virtual sub-targets through the registered
//! resolvers and routes every finder hit into its category container.
//! Containers are built from scratch on every pass and only handed back on
//! success, so a failing finder never leaves a half-populated index behind.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, error, trace, warn};

use super::registry::{BoundFinder, ProviderRegistry};
use crate::config::XrefConfig;
use crate::domain::{
    DesignElement, ElementPredicate, ElementSource, ReferenceContainer, ScanTarget, SourceContext,
    TargetPath,
};
use crate::{Result, XrefError};

/// Summary of one build pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Real elements scanned
    pub elements_visited: usize,
    /// Virtual sub-targets scanned
    pub virtual_targets: usize,
    /// Items per category, in registry order
    pub items_per_category: Vec<(String, usize)>,
}

impl BuildReport {
    pub fn total_items(&self) -> usize {
        self.items_per_category.iter().map(|(_, count)| count).sum()
    }
}

/// Result of a successful build
pub struct BuildOutcome {
    pub containers: IndexMap<String, ReferenceContainer>,
    pub report: BuildReport,
}

/// Empty container for every registered category, in registry order
pub fn empty_containers(registry: &ProviderRegistry) -> IndexMap<String, ReferenceContainer> {
    registry
        .category_names(None)
        .into_iter()
        .map(|category| (category.to_string(), ReferenceContainer::new(category)))
        .collect()
}

pub struct IndexBuilder<'r> {
    registry: &'r ProviderRegistry,
    config: &'r XrefConfig,
}

impl<'r> IndexBuilder<'r> {
    pub fn new(registry: &'r ProviderRegistry, config: &'r XrefConfig) -> Self {
        Self { registry, config }
    }

    /// Build all category containers for `roots`
    ///
    /// - `root_filter` restricts which roots are considered
    /// - `predicate` decides whether an element and its subtree participate
    pub fn build(
        &self,
        source: &dyn ElementSource,
        roots: &[&dyn DesignElement],
        root_filter: Option<&ElementPredicate<'_>>,
        predicate: &ElementPredicate<'_>,
    ) -> Result<BuildOutcome> {
        let context = SourceContext::new(source, self.config.separator.clone());
        let mut pass = BuildPass {
            registry: self.registry,
            max_depth: self.config.max_resolve_depth,
            context: &context,
            finders: self.registry.create_finders_for(&context),
            predicate,
            containers: empty_containers(self.registry),
            resolving: HashSet::new(),
            report: BuildReport::default(),
        };

        for root in roots {
            if let Some(root_filter) = root_filter {
                if !root_filter(*root) {
                    trace!("Root '{}' excluded by root filter", root.name());
                    continue;
                }
            }
            pass.visit(*root, &TargetPath::root(root.name()))?;
        }

        let BuildPass {
            containers,
            mut report,
            ..
        } = pass;

        report.items_per_category = containers
            .iter()
            .map(|(category, container)| (category.clone(), container.len()))
            .collect();

        debug!(
            "Built reference index for '{}': {} elements, {} virtual targets, {} items",
            source.name(),
            report.elements_visited,
            report.virtual_targets,
            report.total_items()
        );

        Ok(BuildOutcome { containers, report })
    }
}

/// Identity of an element for the loop guard
///
/// Owned virtual targets live in their resolver's output for as long as they
/// are on the current path, so their address is stable while it matters.
fn element_address(element: &dyn DesignElement) -> usize {
    element as *const _ as *const () as usize
}

/// State of one traversal
struct BuildPass<'b, 'p> {
    registry: &'b ProviderRegistry,
    max_depth: usize,
    context: &'b SourceContext,
    finders: Vec<BoundFinder<'b>>,
    predicate: &'b ElementPredicate<'p>,
    containers: IndexMap<String, ReferenceContainer>,
    /// (element address, resolver position) along the current path
    resolving: HashSet<(usize, usize)>,
    report: BuildReport,
}

impl<'b, 'p> BuildPass<'b, 'p> {
    fn visit(&mut self, element: &dyn DesignElement, path: &TargetPath) -> Result<()> {
        if !(self.predicate)(element) {
            return Ok(());
        }

        let is_virtual = path.depth() > 0;
        if is_virtual {
            self.report.virtual_targets += 1;
            trace!("Scanning virtual target {}", path.join(&self.context.separator));
        } else {
            self.report.elements_visited += 1;
        }

        self.scan(ScanTarget::new(element, path))?;
        self.expand(element, path)?;

        // Children of a virtual target stay under its name
        for child in element.children() {
            let child_path = if is_virtual {
                path.child(child.name())
            } else {
                TargetPath::root(child.name())
            };
            self.visit(child, &child_path)?;
        }

        Ok(())
    }

    fn expand(&mut self, element: &dyn DesignElement, path: &TargetPath) -> Result<()> {
        let registry = self.registry;
        for (position, resolver) in registry.resolvers().iter().enumerate() {
            let sub_targets = resolver.resolve_sub_targets(element);
            if sub_targets.is_empty() {
                continue;
            }

            if path.depth() >= self.max_depth {
                warn!(
                    "Virtual target depth limit {} reached at {}; '{}' not expanded",
                    self.max_depth,
                    path.join(&self.context.separator),
                    resolver.name()
                );
                continue;
            }

            let key = (element_address(element), position);
            if !self.resolving.insert(key) {
                trace!(
                    "Resolver '{}' already expanding '{}' on this path",
                    resolver.name(),
                    element.name()
                );
                continue;
            }

            let result = sub_targets.iter().try_for_each(|sub_target| {
                let sub_path = path.child(sub_target.display_name_suffix.clone());
                self.visit(sub_target.element.as_element(), &sub_path)
            });
            self.resolving.remove(&key);
            result?;
        }
        Ok(())
    }

    fn scan(&mut self, target: ScanTarget<'_>) -> Result<()> {
        let predicate = self.predicate;
        for bound in &self.finders {
            for found in bound.finder.find(target, predicate) {
                let found = found.map_err(|err| {
                    error!(
                        "Finder '{}' failed on {}: {}",
                        bound.provider.name,
                        self.context.target_full_name(target.path),
                        err
                    );
                    err
                })?;

                if !bound.provider.serves(&found.category) {
                    return Err(XrefError::provider(
                        &bound.provider.name,
                        format!("emitted into undeclared category '{}'", found.category),
                    ));
                }

                match self.containers.get_mut(&found.category) {
                    Some(container) => container.push(found.entry),
                    None => return Err(XrefError::unknown_category(found.category)),
                }
            }
        }
        Ok(())
    }
}
