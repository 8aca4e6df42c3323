//! Tree builder turning depth-marked list items into a forest.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::config::BuilderConfig;
use crate::domain::arena::{Forest, NodeData};
use crate::domain::error::{DomainError, MalformedReason, TreeResult};
use crate::domain::item::Item;

/// Constructs a [`Forest`] from items in a single pass.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    config: BuilderConfig,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build a forest, attaching each item to the most recent node one level up.
    ///
    /// The first item must have depth 0 and each following item may go at most
    /// one level deeper than its predecessor. Any violation aborts the whole
    /// build with [`DomainError::MalformedInput`].
    #[instrument(level = "debug", skip(self, items))]
    pub fn build<I, T>(&self, items: I) -> TreeResult<Forest>
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        let mut forest = Forest::new();
        // open[d] is the node currently accepting children at depth d
        let mut open: Vec<Index> = Vec::new();

        for (index, item) in items.into_iter().map(Into::into).enumerate() {
            let Item { depth, value } = item;
            self.check_depth(index, depth, &value, open.len())?;

            // check_depth guarantees depth <= open.len(), so after truncating the
            // last open node (if any) sits exactly one level up
            open.truncate(depth);
            let parent = open.last().copied();

            let value = if self.config.trim_values {
                value.trim().to_string()
            } else {
                value
            };
            trace!(index, depth, value = %value, "attach node");

            let idx = forest.insert_node(NodeData { value, depth }, parent);
            open.push(idx);
        }

        debug!(
            nodes = forest.len(),
            roots = forest.roots().len(),
            "forest built"
        );
        Ok(forest)
    }

    /// `open_len` is the previous item's depth + 1, or 0 before the first item.
    fn check_depth(
        &self,
        index: usize,
        depth: usize,
        value: &str,
        open_len: usize,
    ) -> TreeResult<()> {
        let reason = if open_len == 0 && depth != 0 {
            Some(MalformedReason::NonZeroStart { depth })
        } else if depth > open_len {
            Some(MalformedReason::DepthJump {
                depth,
                previous: open_len - 1,
            })
        } else {
            self.config
                .max_depth
                .filter(|&max| depth > max)
                .map(|max| MalformedReason::TooDeep { depth, max })
        };

        match reason {
            Some(reason) => Err(DomainError::MalformedInput {
                index,
                value: value.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(pairs: &[(usize, &str)]) -> Vec<Item> {
        pairs.iter().map(|&(depth, value)| Item::new(depth, value)).collect()
    }

    fn values(forest: &Forest, indices: &[Index]) -> Vec<String> {
        indices
            .iter()
            .map(|&idx| forest.get_node(idx).unwrap().data.value.clone())
            .collect()
    }

    #[test]
    fn test_build_siblings_under_one_root() {
        let forest = TreeBuilder::new()
            .build(items(&[(0, "A"), (1, "B"), (1, "C"), (0, "D")]))
            .unwrap();

        assert_eq!(values(&forest, forest.roots()), vec!["A", "D"]);
        let a = forest.roots()[0];
        let d = forest.roots()[1];
        assert_eq!(values(&forest, forest.children(a)), vec!["B", "C"]);
        assert!(forest.children(d).is_empty());
    }

    #[test]
    fn test_build_returns_to_shallower_parent() {
        let forest = TreeBuilder::new()
            .build(items(&[(0, "A"), (1, "B"), (2, "C"), (1, "D")]))
            .unwrap();

        let a = forest.roots()[0];
        assert_eq!(values(&forest, forest.children(a)), vec!["B", "D"]);
        let b = forest.find("B").unwrap();
        let d = forest.find("D").unwrap();
        assert_eq!(values(&forest, forest.children(b)), vec!["C"]);
        assert!(forest.children(d).is_empty());
    }

    #[test]
    fn test_build_drops_several_levels_at_once() {
        let forest = TreeBuilder::new()
            .build(items(&[(0, "A"), (1, "B"), (2, "C"), (3, "D"), (1, "E")]))
            .unwrap();

        let a = forest.roots()[0];
        assert_eq!(values(&forest, forest.children(a)), vec!["B", "E"]);
        let e = forest.find("E").unwrap();
        assert_eq!(forest.parent(e), Some(a));
        let d = forest.find("D").unwrap();
        assert_eq!(forest.ancestors(d).count(), 3);
    }

    #[test]
    fn test_build_empty_input() {
        let forest = TreeBuilder::new().build(Vec::<Item>::new()).unwrap();
        assert!(forest.is_empty());
        assert_eq!(forest.len(), 0);
    }

    #[test]
    fn test_build_rejects_depth_jump() {
        let err = TreeBuilder::new().build(items(&[(0, "A"), (2, "B")])).unwrap_err();
        assert_eq!(
            err,
            DomainError::MalformedInput {
                index: 1,
                value: "B".to_string(),
                reason: MalformedReason::DepthJump {
                    depth: 2,
                    previous: 0
                },
            }
        );
    }

    #[test]
    fn test_build_rejects_nonzero_start() {
        let err = TreeBuilder::new().build(items(&[(1, "A")])).unwrap_err();
        assert!(matches!(
            err,
            DomainError::MalformedInput {
                index: 0,
                reason: MalformedReason::NonZeroStart { depth: 1 },
                ..
            }
        ));
    }

    #[test]
    fn test_build_trims_values_when_configured() {
        let builder = TreeBuilder::with_config(BuilderConfig {
            trim_values: true,
            ..Default::default()
        });
        let forest = builder.build(items(&[(0, " Alderaan "), (1, "\tAldera")])).unwrap();
        assert_eq!(forest.leaf_nodes(), vec!["Aldera"]);
        assert!(forest.find("Alderaan").is_some());
    }

    #[test]
    fn test_build_keeps_whitespace_by_default() {
        let forest = TreeBuilder::new().build(items(&[(0, " Tatooine ")])).unwrap();
        assert!(forest.find(" Tatooine ").is_some());
    }

    #[test]
    fn test_build_rejects_items_beyond_max_depth() {
        let builder = TreeBuilder::with_config(BuilderConfig {
            max_depth: Some(1),
            ..Default::default()
        });
        let err = builder.build(items(&[(0, "A"), (1, "B"), (2, "C")])).unwrap_err();
        assert!(matches!(
            err,
            DomainError::MalformedInput {
                index: 2,
                reason: MalformedReason::TooDeep { depth: 2, max: 1 },
                ..
            }
        ));
    }
}
