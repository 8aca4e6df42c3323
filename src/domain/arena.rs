use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::item::Item;

/// Data payload for tree nodes representing one list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Text label of the entry
    pub value: String,
    /// Nesting level the entry appeared at
    pub depth: usize,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Tree node in the arena-based forest.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in input order
    pub children: Vec<Index>,
}

/// Owned, serializable view of one tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedNode {
    pub value: String,
    pub depth: usize,
    pub children: Vec<NestedNode>,
}

/// Arena-based forest: an ordered sequence of root trees.
///
/// The arena owns every node; `parent` links are back-references only.
/// Nodes are inserted exclusively by [`TreeBuilder`](crate::domain::TreeBuilder),
/// so a node's depth is always its parent's depth + 1.
#[derive(Debug)]
pub struct Forest {
    arena: Arena<TreeNode>,
    roots: Vec<Index>,
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

impl Forest {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    /// Children of `idx` in input order; empty for unknown indices.
    pub fn children(&self, idx: Index) -> &[Index] {
        self.get_node(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.get_node(idx).and_then(|node| node.parent)
    }

    /// Total number of nodes across all trees.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order traversal over all trees, roots and siblings in input order.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Walks from the parent of `idx` up to its root.
    pub fn ancestors(&self, idx: Index) -> Ancestors<'_> {
        Ancestors {
            forest: self,
            next: self.parent(idx),
        }
    }

    /// Number of levels of the deepest tree, 0 for an empty forest.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_height(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_height(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_height(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the values of all nodes without children, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.data.value.clone())
            .collect()
    }

    /// Labels from the root down to `idx`, inclusive.
    pub fn path(&self, idx: Index) -> Vec<&str> {
        let Some(node) = self.get_node(idx) else {
            return Vec::new();
        };
        let mut labels: Vec<&str> = self
            .ancestors(idx)
            .map(|(_, ancestor)| ancestor.data.value.as_str())
            .collect();
        labels.reverse();
        labels.push(node.data.value.as_str());
        labels
    }

    pub fn path_string(&self, idx: Index, separator: &str) -> String {
        self.path(idx).iter().join(separator)
    }

    /// First node in pre-order whose value equals `value`.
    pub fn find(&self, value: &str) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.data.value == value)
            .map(|(idx, _)| idx)
    }

    /// Turns the forest back into the depth-marked sequence it was built from.
    #[instrument(level = "debug", skip(self))]
    pub fn flatten(&self) -> Vec<Item> {
        self.iter()
            .map(|(_, node)| Item::new(node.data.depth, node.data.value.clone()))
            .collect()
    }

    /// Flat listing in pre-order where each entry points at its parent's position.
    #[instrument(level = "debug", skip(self))]
    pub fn parent_table(&self) -> Vec<(String, Option<usize>)> {
        let positions: HashMap<Index, usize> = self
            .iter()
            .enumerate()
            .map(|(pos, (idx, _))| (idx, pos))
            .collect();
        self.iter()
            .map(|(_, node)| {
                let parent_pos = node
                    .parent
                    .and_then(|parent| positions.get(&parent).copied());
                (node.data.value.clone(), parent_pos)
            })
            .collect()
    }

    pub fn to_nested(&self) -> Vec<NestedNode> {
        self.roots
            .iter()
            .filter_map(|&root| self.nest(root))
            .collect()
    }

    fn nest(&self, idx: Index) -> Option<NestedNode> {
        let node = self.get_node(idx)?;
        Some(NestedNode {
            value: node.data.value.clone(),
            depth: node.data.depth,
            children: node
                .children
                .iter()
                .filter_map(|&child| self.nest(child))
                .collect(),
        })
    }
}

pub struct TreeIterator<'a> {
    forest: &'a Forest,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        let stack = forest.roots.iter().rev().copied().collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    forest: &'a Forest,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        let stack = forest.roots.iter().rev().map(|&root| (root, false)).collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

pub struct Ancestors<'a> {
    forest: &'a Forest,
    next: Option<Index>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.forest.get_node(idx)?;
        self.next = node.parent;
        Some((idx, node))
    }
}
