//! Detailed target resolvers
//!
//! - `SubItemResolver`: nested addressable items (chart series, struct members)
//! - `IntervalResolver`: interval-to-resource maps

mod intervals;
mod sub_items;

pub use intervals::IntervalResolver;
pub use sub_items::SubItemResolver;
