//! Domain layer: list items, the forest, and the builder between them
//!
//! This layer is independent of external concerns (no I/O, no markup parsing, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod item;

pub use arena::{Forest, NestedNode, NodeData, TreeNode};
pub use builder::TreeBuilder;
pub use error::{DomainError, MalformedReason, TreeResult};
pub use item::Item;
