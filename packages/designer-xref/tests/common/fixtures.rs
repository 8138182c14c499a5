//! Element graphs, storages and test-only plugins

use std::sync::Arc;

use designer_xref::domain::{
    DetailedTargetResolver, ElementPredicate, FindIter, FoundReference, ReferenceFinder,
    ReferenceProvider, ScanTarget, SourceContext, SubTarget,
};
use designer_xref::infrastructure::builtin_providers;
use designer_xref::{
    actions, builtin_registry, categories, CategorizedStorage, DesignElement, ElementNode, FontCatalog,
    MemorySource, PropertyValue, ProviderRegistry, ReferenceItem, XrefConfig, XrefError,
};

// ═══════════════════════════════════════════════════════════════════════════
// Storages
// ═══════════════════════════════════════════════════════════════════════════

pub fn font_catalog() -> FontCatalog {
    FontCatalog::new(["arial.ttf", "tahoma.ttf", "segoeui.ttf"])
}

pub fn registry() -> Arc<ProviderRegistry> {
    Arc::new(builtin_registry(Arc::new(font_catalog())))
}

/// Built-in registry without the provider named `provider_name`
pub fn registry_without(provider_name: &str) -> Arc<ProviderRegistry> {
    let providers = builtin_providers(Arc::new(font_catalog()))
        .into_iter()
        .filter(|provider| provider.name() != provider_name)
        .collect();
    Arc::new(ProviderRegistry::with_providers(providers))
}

pub fn storage(screen: &str) -> CategorizedStorage<MemorySource> {
    CategorizedStorage::new(MemorySource::new(screen), registry())
}

pub fn storage_with_config(screen: &str, config: XrefConfig) -> CategorizedStorage<MemorySource> {
    CategorizedStorage::with_config(MemorySource::new(screen), registry(), config)
        .expect("valid config")
}

/// Storage reading `bytes` from its element source
pub fn storage_with_document(screen: &str, bytes: Vec<u8>) -> CategorizedStorage<MemorySource> {
    CategorizedStorage::new(MemorySource::with_contents(screen, bytes), registry())
}

pub fn as_roots(elements: &[ElementNode]) -> Vec<&dyn DesignElement> {
    elements
        .iter()
        .map(|element| element as &dyn DesignElement)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Element Graphs
// ═══════════════════════════════════════════════════════════════════════════

pub fn text_box(name: &str, family: &str) -> ElementNode {
    ElementNode::new(name, "TextBox")
        .with_property("Text", PropertyValue::Text("Hello".into()))
        .with_property("FontFamily", PropertyValue::Font(family.into()))
}

pub fn numeric_field(name: &str, tag: &str, family: &str) -> ElementNode {
    ElementNode::new(name, "NumericField")
        .with_property("Value", PropertyValue::DataItem(tag.into()))
        .with_property("FontFamily", PropertyValue::Font(family.into()))
}

pub fn symbol_button(name: &str, symbol: &str, family: &str) -> ElementNode {
    ElementNode::new(name, "Button")
        .with_property("Symbol", PropertyValue::Symbol(symbol.into()))
        .with_property("FontFamily", PropertyValue::Font(family.into()))
}

/// Two symbol buttons, two numeric fields, two text boxes, all with a font
pub fn six_element_screen() -> Vec<ElementNode> {
    vec![
        symbol_button("Button1", "Lamp_On", "Arial"),
        symbol_button("Button2", "Lamp_Off", "Tahoma"),
        numeric_field("NumericField1", "Controller1.D0", "Arial"),
        numeric_field("NumericField2", "Controller1.C0", "Tahoma"),
        text_box("TextBox1", "Arial"),
        text_box("TextBox2", "Segoe UI"),
    ]
}

/// Six-element screen plus a button with a text resource and two actions
pub fn mixed_screen() -> Vec<ElementNode> {
    let mut elements = six_element_screen();
    elements.push(
        ElementNode::new("Button3", "Button")
            .with_property("Text", PropertyValue::TextResource("Texts.Start".into()))
            .with_action(
                "Click",
                actions::LOAD_RECIPE,
                vec![PropertyValue::Recipe("Recipe2.Field23".into())],
            )
            .with_action(
                "Release",
                actions::SHOW_SCREEN,
                vec![PropertyValue::Screen("Screen2".into())],
            ),
    );
    elements
}

/// Storage built from `mixed_screen`
pub fn populated_storage() -> CategorizedStorage<MemorySource> {
    let mut storage = storage("Screen1");
    storage
        .find_all_references(&as_roots(&mixed_screen()))
        .expect("build succeeds");
    storage
}

// ═══════════════════════════════════════════════════════════════════════════
// Test-only Plugins
// ═══════════════════════════════════════════════════════════════════════════

/// Emits one symbol reference per element and fails on elements named `fail_on`
pub struct FailingProvider {
    pub fail_on: &'static str,
}

struct FailingFinder {
    fail_on: &'static str,
    context: SourceContext,
}

impl ReferenceProvider for FailingProvider {
    fn name(&self) -> &str {
        "FailingProvider"
    }

    fn categories(&self) -> Vec<String> {
        vec![categories::SYMBOL.to_string()]
    }

    fn create_finder<'p>(&'p self, context: SourceContext) -> Box<dyn ReferenceFinder + 'p> {
        Box::new(FailingFinder {
            fail_on: self.fail_on,
            context,
        })
    }
}

impl ReferenceFinder for FailingFinder {
    fn find<'a>(
        &'a self,
        target: ScanTarget<'a>,
        _include: &'a ElementPredicate<'a>,
    ) -> FindIter<'a> {
        let result = if target.element.name() == self.fail_on {
            Err(XrefError::provider("FailingProvider", "property system unavailable"))
        } else {
            Ok(FoundReference::new(
                categories::SYMBOL,
                ReferenceItem::implicit(self.context.target_full_name(target.path), ""),
            ))
        };
        Box::new(std::iter::once(result))
    }
}

/// Declares `Symbol` but files its hits under `Font`
pub struct MisroutingProvider;

struct MisroutingFinder;

impl ReferenceProvider for MisroutingProvider {
    fn name(&self) -> &str {
        "MisroutingProvider"
    }

    fn categories(&self) -> Vec<String> {
        vec![categories::SYMBOL.to_string()]
    }

    fn create_finder<'p>(&'p self, _context: SourceContext) -> Box<dyn ReferenceFinder + 'p> {
        Box::new(MisroutingFinder)
    }
}

impl ReferenceFinder for MisroutingFinder {
    fn find<'a>(
        &'a self,
        target: ScanTarget<'a>,
        _include: &'a ElementPredicate<'a>,
    ) -> FindIter<'a> {
        Box::new(std::iter::once(Ok(FoundReference::new(
            categories::FONT,
            ReferenceItem::implicit(target.element.name(), "FontFamily"),
        ))))
    }
}

/// Expands every `Recursive` element into itself
pub struct SelfResolver;

impl DetailedTargetResolver for SelfResolver {
    fn name(&self) -> &str {
        "SelfResolver"
    }

    fn resolve_sub_targets<'a>(&self, element: &'a dyn DesignElement) -> Vec<SubTarget<'a>> {
        if element.element_type() != "Recursive" {
            return Vec::new();
        }
        vec![SubTarget::borrowed(element, element.name())]
    }
}

/// Expands every `Growing` element into a new, differently named `Growing` element
pub struct GrowingResolver;

impl DetailedTargetResolver for GrowingResolver {
    fn name(&self) -> &str {
        "GrowingResolver"
    }

    fn resolve_sub_targets<'a>(&self, element: &'a dyn DesignElement) -> Vec<SubTarget<'a>> {
        if element.element_type() != "Growing" {
            return Vec::new();
        }
        let next = format!("{}x", element.name());
        vec![SubTarget::owned(ElementNode::new(next.clone(), "Growing"), next)]
    }
}
