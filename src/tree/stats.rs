//! Traversal renderings and shape metrics for the tree maps.

use std::fmt;

use crate::{arena::NodeId, entry::EntryDisplay, entry::write_bracketed};

use super::raw::RawTree;

/// Order in which a traversal visits nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Node, then left subtree, then right subtree
    Preorder,
    /// Left subtree, then node, then right subtree; ascending keys
    Inorder,
    /// Left subtree, then right subtree, then node
    Postorder,
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Preorder => "Preorder",
            Self::Inorder => "Inorder",
            Self::Postorder => "Postorder",
        })
    }
}

/// Shape metrics of a tree.
///
/// Positions where a child is absent are the tree's external (null) slots;
/// a tree of `len` nodes always has `len + 1` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    /// Number of nodes
    pub len: usize,
    /// Height of the tree, -1 when it is empty
    pub height: isize,
    /// Number of absent-child positions
    pub null_count: usize,
    /// Sum of the depths of all nodes, the root being at depth 0
    pub sum_levels: usize,
    /// Sum of the depths of all absent-child positions
    pub sum_null_levels: usize,
}

impl TreeStats {
    /// Expected number of comparisons for a successful search, `1 + sum_levels / len`.
    /// Zero for an empty tree.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn successful_search_cost(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        1.0 + self.sum_levels as f64 / self.len as f64
    }

    /// Expected number of comparisons for an unsuccessful search,
    /// `sum_null_levels / null_count`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn unsuccessful_search_cost(&self) -> f64 {
        if self.null_count == 0 {
            return 0.0;
        }
        self.sum_null_levels as f64 / self.null_count as f64
    }
}

impl<K, V> RawTree<K, V> {
    /// Collects every metric in one pass over an explicit stack
    pub(crate) fn stats(&self) -> TreeStats {
        let mut stats = TreeStats { len: self.len(), height: -1, ..TreeStats::default() };
        let mut pending = vec![(self.root, 0_usize)];
        while let Some((position, depth)) = pending.pop() {
            match position {
                None => {
                    stats.null_count = stats.null_count.saturating_add(1);
                    stats.sum_null_levels = stats.sum_null_levels.saturating_add(depth);
                }
                Some(id) => {
                    stats.sum_levels = stats.sum_levels.saturating_add(depth);
                    stats.height = stats.height.max(isize::try_from(depth).unwrap_or(isize::MAX));
                    let child_depth = depth.saturating_add(1);
                    pending.push((self.right(id), child_depth));
                    pending.push((self.left(id), child_depth));
                }
            }
        }
        stats
    }

    /// Node ids in the given traversal order
    pub(crate) fn walk(&self, order: Traversal) -> Vec<NodeId> {
        let mut visited = Vec::with_capacity(self.len());
        match order {
            Traversal::Preorder => {
                let mut stack: Vec<NodeId> = self.root.into_iter().collect();
                while let Some(id) = stack.pop() {
                    visited.push(id);
                    stack.extend(self.right(id));
                    stack.extend(self.left(id));
                }
            }
            Traversal::Inorder => {
                let mut stack = Vec::new();
                let mut current = self.root;
                loop {
                    while let Some(id) = current {
                        stack.push(id);
                        current = self.left(id);
                    }
                    let Some(id) = stack.pop() else {
                        break;
                    };
                    visited.push(id);
                    current = self.right(id);
                }
            }
            Traversal::Postorder => {
                // node, right, left reversed
                let mut stack: Vec<NodeId> = self.root.into_iter().collect();
                while let Some(id) = stack.pop() {
                    visited.push(id);
                    stack.extend(self.left(id));
                    stack.extend(self.right(id));
                }
                visited.reverse();
            }
        }
        visited
    }
}

/// Entries of a tree visited in one traversal order, displayed as
/// `[<k, v>, <k, v>]`
#[derive(Debug)]
pub(crate) struct Rendered<'a, K, V> {
    /// Tree being rendered
    tree: &'a RawTree<K, V>,
    /// Visiting order
    order: Traversal,
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Rendered<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.tree.walk(self.order).into_iter().map(|id| {
            let (key, value) = self.tree.entry(id);
            EntryDisplay { key, value }
        });
        write_bracketed(f, entries)
    }
}

impl<K, V> RawTree<K, V> {
    /// Displays the entries visited in `order`
    pub(crate) const fn rendered(&self, order: Traversal) -> Rendered<'_, K, V> {
        Rendered { tree: self, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[i32]) -> RawTree<i32, i32> {
        let mut tree = RawTree::new();
        for &key in keys {
            tree.insert(key, key);
        }
        tree
    }

    #[test]
    fn test_stats_of_empty_tree() {
        let stats = RawTree::<i32, i32>::new().stats();
        assert_eq!(stats.height, -1);
        assert_eq!(stats.null_count, 1);
        assert_eq!(stats.sum_levels, 0);
        assert_eq!(stats.sum_null_levels, 0);
        assert!(stats.successful_search_cost().abs() < f64::EPSILON);
        assert!(stats.unsuccessful_search_cost().abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_of_small_tree() {
        //   5
        //  / \
        // 2   8
        //      \
        //      10
        let stats = tree_of(&[5, 2, 8, 10]).stats();
        assert_eq!(stats.height, 2);
        assert_eq!(stats.null_count, 5);
        assert_eq!(stats.sum_levels, 4);
        assert_eq!(stats.sum_null_levels, 12);
        assert!((stats.successful_search_cost() - 2.0).abs() < 1e-9);
        assert!((stats.unsuccessful_search_cost() - 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_stats_of_degenerate_tree() {
        let keys: Vec<i32> = (0..5_000).collect();
        let stats = tree_of(&keys).stats();
        assert_eq!(stats.height, 4_999);
        assert_eq!(stats.null_count, 5_001);
    }

    #[test]
    fn test_walk_orders() {
        let tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        let keys = |order| -> Vec<i32> {
            tree.walk(order).into_iter().map(|id| *tree.entry(id).0).collect()
        };
        assert_eq!(keys(Traversal::Preorder), vec![4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(keys(Traversal::Inorder), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(keys(Traversal::Postorder), vec![1, 3, 2, 5, 7, 6, 4]);
    }

    #[test]
    fn test_render() {
        let tree = tree_of(&[2, 1, 3]);
        assert_eq!(tree.rendered(Traversal::Preorder).to_string(), "[<2, 2>, <1, 1>, <3, 3>]");
        assert_eq!(tree.rendered(Traversal::Postorder).to_string(), "[<1, 1>, <3, 3>, <2, 2>]");
        assert_eq!(RawTree::<i32, i32>::new().rendered(Traversal::Inorder).to_string(), "[]");
    }
}
