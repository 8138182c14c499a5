//! Container inspection helpers

use designer_xref::ReferenceContainer;

/// Target full names in container order
pub fn targets(container: &ReferenceContainer) -> Vec<&str> {
    container.iter().map(|entry| entry.target_full_name()).collect()
}

/// Source full names in container order (`None` for implicit sources)
pub fn sources(container: &ReferenceContainer) -> Vec<Option<&str>> {
    container.iter().map(|entry| entry.source_full_name()).collect()
}

/// Source names in container order, implicit sources skipped
pub fn named_sources(container: &ReferenceContainer) -> Vec<&str> {
    container
        .iter()
        .filter_map(|entry| entry.source_full_name())
        .collect()
}
