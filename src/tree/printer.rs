//! ASCII line drawing of a tree's shape.
//!
//! Every key gets its own columns in inorder position and its own pair of
//! rows per depth: the label row, then a connector row holding `/` and `\`
//! above the children. Underscores run along the label row from a node
//! toward the columns of its children.
//!
//! ```text
//!  _5_
//! /   \
//! 2   8
//! ```

use std::{collections::HashMap, fmt};

use crate::arena::NodeId;

use super::raw::RawTree;

/// Horizontal placement of one node
#[derive(Debug, Clone, Copy)]
struct Placement {
    /// First column of the label
    start: usize,
    /// Label width in characters
    width: usize,
    /// Column connectors attach to
    center: usize,
    /// Depth of the node, 0 for the root
    depth: usize,
}

impl<K: fmt::Display, V> RawTree<K, V> {
    /// Draws the tree. An empty tree draws as an empty string.
    pub(crate) fn ascii_drawing(&self) -> String {
        let Some(root) = self.root else {
            return String::new();
        };

        let mut labels = HashMap::new();
        let mut placements = HashMap::new();
        let mut column = 0_usize;
        let mut deepest = 0_usize;
        for (id, depth) in self.inorder_with_depth(root) {
            let label: Vec<char> = self.entry(id).0.to_string().chars().collect();
            let width = label.len().max(1);
            let center = column.saturating_add(width / 2);
            placements.insert(id, Placement { start: column, width, center, depth });
            labels.insert(id, label);
            column = column.saturating_add(width).saturating_add(1);
            deepest = deepest.max(depth);
        }

        let rows = deepest.saturating_mul(2).saturating_add(1);
        let mut grid = vec![vec![' '; column]; rows];
        for (&id, placement) in &placements {
            let row = placement.depth.saturating_mul(2);
            let label = labels.get(&id).map_or(&[][..], Vec::as_slice);
            for (offset, &ch) in label.iter().enumerate() {
                put(&mut grid, row, placement.start.saturating_add(offset), ch);
            }
            if let Some(child) = self.left(id).and_then(|child| placements.get(&child)) {
                for col in child.center.saturating_add(1)..placement.start {
                    put(&mut grid, row, col, '_');
                }
                put(&mut grid, row.saturating_add(1), child.center, '/');
            }
            if let Some(child) = self.right(id).and_then(|child| placements.get(&child)) {
                for col in placement.start.saturating_add(placement.width)..child.center {
                    put(&mut grid, row, col, '_');
                }
                put(&mut grid, row.saturating_add(1), child.center, '\\');
            }
        }

        grid.iter()
            .map(|line| line.iter().collect::<String>().trim_end().to_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Inorder node ids paired with their depth
    fn inorder_with_depth(&self, root: NodeId) -> Vec<(NodeId, usize)> {
        let mut visited = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = Some((root, 0_usize));
        loop {
            while let Some((id, depth)) = current {
                stack.push((id, depth));
                current = self.left(id).map(|left| (left, depth.saturating_add(1)));
            }
            let Some((id, depth)) = stack.pop() else {
                break;
            };
            visited.push((id, depth));
            current = self.right(id).map(|right| (right, depth.saturating_add(1)));
        }
        visited
    }
}

/// Writes one character, ignoring positions outside the grid
fn put(grid: &mut [Vec<char>], row: usize, col: usize, ch: char) {
    if let Some(cell) = grid.get_mut(row).and_then(|line| line.get_mut(col)) {
        *cell = ch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[i32]) -> RawTree<i32, ()> {
        let mut tree = RawTree::new();
        for &key in keys {
            tree.insert(key, ());
        }
        tree
    }

    #[test]
    fn test_three_nodes() {
        assert_eq!(tree_of(&[5, 2, 8]).ascii_drawing(), " _5_\n/   \\\n2   8");
    }

    #[test]
    fn test_right_leaning_chain() {
        assert_eq!(tree_of(&[1, 2, 3]).ascii_drawing(), "1_\n  \\\n  2_\n    \\\n    3");
    }

    #[test]
    fn test_wide_labels() {
        let drawing = tree_of(&[50, 7, 100]).ascii_drawing();
        let lines: Vec<_> = drawing.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].trim(), "_50__");
        assert_eq!(lines[2], "7    100");
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(tree_of(&[]).ascii_drawing(), "");
    }
}
