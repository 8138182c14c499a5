//! Well-known category names
//!
//! Categories are opaque strings; these are the ones the built-in providers
//! serve. Custom providers may declare any other name.

pub const GLOBAL_DATA_ITEM: &str = "GlobalDataItem";
pub const FONT: &str = "Font";
pub const SYMBOL: &str = "Symbol";
pub const SCREEN: &str = "Screen";
pub const RECIPE: &str = "Recipe";
pub const TEXT_LIBRARY: &str = "TextLibrary";
pub const SCRIPT: &str = "Script";
pub const EXPRESSION: &str = "Expression";

/// Built-in categories in provider registration order
pub const BUILTIN: &[&str] = &[
    GLOBAL_DATA_ITEM,
    FONT,
    SYMBOL,
    SCREEN,
    RECIPE,
    TEXT_LIBRARY,
    SCRIPT,
    EXPRESSION,
];
