use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::Forest;

/// Conversion into `termtree` for display.
pub trait TreeNodeConvert {
    fn to_tree_string(&self, label: &str) -> Tree<String>;
}

impl TreeNodeConvert for Forest {
    /// One subtree per root, hung below a synthetic `label` node.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, label: &str) -> Tree<String> {
        fn build_tree(forest: &Forest, node_idx: Index) -> Option<Tree<String>> {
            let node = forest.get_node(node_idx)?;
            let leaves: Vec<_> = node
                .children
                .iter()
                .filter_map(|&child| build_tree(forest, child))
                .collect();
            Some(Tree::new(node.data.value.clone()).with_leaves(leaves))
        }

        let leaves: Vec<_> = self
            .roots()
            .iter()
            .filter_map(|&root| build_tree(self, root))
            .collect();
        Tree::new(label.to_string()).with_leaves(leaves)
    }
}
