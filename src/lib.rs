//! Turn depth-marked nested lists into forests of parent/child nodes.
//!
//! A markup parser hands over `(depth, value)` pairs in document order; the
//! [`TreeBuilder`] attaches every entry to the most recent entry one level up.
//!
//! ```
//! use loctree::{build, Item};
//!
//! let forest = build(vec![
//!     Item::new(0, "Alderaan sector"),
//!     Item::new(1, "Alderaan"),
//!     Item::new(1, "Delaya"),
//! ])?;
//! assert_eq!(forest.len(), 3);
//! assert_eq!(forest.leaf_nodes(), vec!["Alderaan", "Delaya"]);
//! # Ok::<(), loctree::DomainError>(())
//! ```

pub mod config;
pub mod domain;
pub mod tree_traits;
pub mod util;

pub use config::{BuilderConfig, SettingsError};
pub use domain::{
    DomainError, Forest, Item, MalformedReason, NestedNode, NodeData, TreeBuilder, TreeNode,
    TreeResult,
};
pub use tree_traits::TreeNodeConvert;

/// Build a forest with the default configuration.
pub fn build<I, T>(items: I) -> TreeResult<Forest>
where
    I: IntoIterator<Item = T>,
    T: Into<Item>,
{
    TreeBuilder::new().build(items)
}
