//! Arena-backed binary search tree shared by [`BsTreeMap`](super::BsTreeMap)
//! and [`RbTreeMap`](super::RbTreeMap).
//!
//! Nodes link to their parent and children by [`NodeId`]. The parent link is
//! only used for navigation; the arena owns every node.

use std::{borrow::Borrow, cmp::Ordering, mem};

use crate::arena::{Arena, NodeId};

/// Node color. Only the red-black tree reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    /// Red node
    Red,
    /// Black node; absent children count as black
    Black,
}

/// A tree node holding a key-value pair
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<K, V> {
    /// The key, never changed once inserted
    pub(crate) key: K,
    /// The value associated with the key
    pub(crate) value: V,
    /// Parent node, `None` for the root
    pub(crate) parent: Option<NodeId>,
    /// Left child
    pub(crate) left: Option<NodeId>,
    /// Right child
    pub(crate) right: Option<NodeId>,
    /// Red-black color
    pub(crate) color: Color,
}

/// Result of inserting into the raw tree
#[derive(Debug)]
pub(crate) enum Inserted<V> {
    /// The key existed; its value was replaced
    Replaced(V),
    /// A new node was attached
    Attached(NodeId),
}

/// What the red-black fix-up needs to know after a node was unlinked
#[derive(Debug)]
pub(crate) struct Unlinked<K, V> {
    /// The removed key
    pub(crate) key: K,
    /// The removed value
    pub(crate) value: V,
    /// Node that moved into the vacated position, possibly absent
    pub(crate) replacement: Option<NodeId>,
    /// Parent of `replacement`, tracked separately since it may be absent
    pub(crate) replacement_parent: Option<NodeId>,
    /// Color of the node that was physically taken out of its position
    pub(crate) removed_color: Color,
}

/// Binary search tree over an arena of nodes
#[derive(Debug, Clone)]
pub(crate) struct RawTree<K, V> {
    /// Storage for every node
    pub(crate) nodes: Arena<TreeNode<K, V>>,
    /// Top node
    pub(crate) root: Option<NodeId>,
}

impl<K, V> Default for RawTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RawTree<K, V> {
    /// Creates an empty tree
    pub(crate) const fn new() -> Self {
        Self { nodes: Arena::new(), root: None }
    }

    /// Creates an empty tree with room for `capacity` nodes
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { nodes: Arena::with_capacity(capacity), root: None }
    }

    /// Drops every node
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Number of nodes in the tree
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Left child of `id`
    pub(crate) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].left
    }

    /// Right child of `id`
    pub(crate) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].right
    }

    /// Parent of `id`
    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Key and value of `id`
    pub(crate) fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = &self.nodes[id];
        (&node.key, &node.value)
    }

    /// Color of a possibly absent node; absent nodes are black
    pub(crate) fn color(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.nodes[id].color)
    }

    /// Recolors a node, ignoring absent ones
    pub(crate) fn set_color(&mut self, id: Option<NodeId>, color: Color) {
        if let Some(id) = id {
            self.nodes[id].color = color;
        }
    }

    /// Leftmost node of the subtree rooted at `id`
    pub(crate) fn minimum(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.left(id) {
            id = left;
        }
        id
    }

    /// Rightmost node of the subtree rooted at `id`
    pub(crate) fn maximum(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.right(id) {
            id = right;
        }
        id
    }

    /// Puts `replacement` where `target` hangs under its parent (or at the
    /// root) and points the replacement's parent link back up.
    pub(crate) fn transplant(&mut self, target: NodeId, replacement: Option<NodeId>) {
        let parent = self.parent(target);
        match parent {
            None => self.root = replacement,
            Some(parent) if self.left(parent) == Some(target) => {
                self.nodes[parent].left = replacement;
            }
            Some(parent) => self.nodes[parent].right = replacement,
        }
        if let Some(replacement) = replacement {
            self.nodes[replacement].parent = parent;
        }
    }

    /// Rotates the right child of `id` into its position
    pub(crate) fn rotate_left(&mut self, id: NodeId) {
        let Some(pivot) = self.right(id) else {
            return;
        };
        let inner = self.left(pivot);
        self.nodes[id].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(id);
        }
        self.transplant(id, Some(pivot));
        self.nodes[pivot].left = Some(id);
        self.nodes[id].parent = Some(pivot);
    }

    /// Rotates the left child of `id` into its position
    pub(crate) fn rotate_right(&mut self, id: NodeId) {
        let Some(pivot) = self.left(id) else {
            return;
        };
        let inner = self.right(pivot);
        self.nodes[id].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(id);
        }
        self.transplant(id, Some(pivot));
        self.nodes[pivot].right = Some(id);
        self.nodes[id].parent = Some(pivot);
    }

    /// Takes `id` out of the tree and frees it.
    ///
    /// A node with at most one child is replaced by that child. A node with
    /// two children is replaced by its successor (the minimum of its right
    /// subtree), which inherits both subtrees and the removed node's color.
    pub(crate) fn unlink(&mut self, id: NodeId) -> Option<Unlinked<K, V>> {
        let node_color = self.nodes[id].color;
        let (replacement, replacement_parent, removed_color) =
            match (self.left(id), self.right(id)) {
                (None, right) => {
                    self.transplant(id, right);
                    (right, self.parent(id), node_color)
                }
                (Some(left), None) => {
                    self.transplant(id, Some(left));
                    (Some(left), self.parent(id), node_color)
                }
                (Some(left), Some(right)) => {
                    let successor = self.minimum(right);
                    let successor_color = self.nodes[successor].color;
                    let successor_right = self.right(successor);
                    let successor_right_parent = if successor == right {
                        successor
                    } else {
                        let parent = self.parent(successor).unwrap_or(right);
                        self.transplant(successor, successor_right);
                        self.nodes[successor].right = Some(right);
                        self.nodes[right].parent = Some(successor);
                        parent
                    };
                    self.transplant(id, Some(successor));
                    self.nodes[successor].left = Some(left);
                    self.nodes[left].parent = Some(successor);
                    self.nodes[successor].color = node_color;
                    (successor_right, Some(successor_right_parent), successor_color)
                }
            };

        let node = self.nodes.free(id)?;
        Some(Unlinked {
            key: node.key,
            value: node.value,
            replacement,
            replacement_parent,
            removed_color,
        })
    }
}

impl<K: Ord, V> RawTree<K, V> {
    /// Iterative descent: left on strictly-less, right otherwise, until a match
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            current = match key.cmp(self.nodes[id].key.borrow()) {
                Ordering::Less => self.left(id),
                Ordering::Equal => return Some(id),
                Ordering::Greater => self.right(id),
            };
        }
        None
    }

    /// Replaces the value of an existing key, or attaches a new red node
    /// under the last node visited by the descent.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Inserted<V> {
        let mut current = self.root;
        let mut last = None;
        let mut went_left = false;
        while let Some(id) = current {
            last = Some(id);
            match key.cmp(&self.nodes[id].key) {
                Ordering::Less => {
                    went_left = true;
                    current = self.left(id);
                }
                Ordering::Equal => {
                    return Inserted::Replaced(mem::replace(&mut self.nodes[id].value, value));
                }
                Ordering::Greater => {
                    went_left = false;
                    current = self.right(id);
                }
            }
        }

        let id = self.nodes.alloc(TreeNode {
            key,
            value,
            parent: last,
            left: None,
            right: None,
            color: Color::Red,
        });
        match last {
            None => self.root = Some(id),
            Some(parent) if went_left => self.nodes[parent].left = Some(id),
            Some(parent) => self.nodes[parent].right = Some(id),
        }
        Inserted::Attached(id)
    }

    /// Builds a subtree from the next `count` pairs of an ascending stream,
    /// rooting each range at its middle element. Returns the subtree root.
    pub(crate) fn build_balanced<I>(&mut self, pairs: &mut I, count: usize) -> Option<NodeId>
    where
        I: Iterator<Item = (K, V)>,
    {
        let before = count.checked_sub(1)? / 2;
        let after = count.saturating_sub(1).saturating_sub(before);

        let left = self.build_balanced(pairs, before);
        let (key, value) = pairs.next()?;
        let id = self.nodes.alloc(TreeNode {
            key,
            value,
            parent: None,
            left,
            right: None,
            color: Color::Black,
        });
        if let Some(left) = left {
            self.nodes[left].parent = Some(id);
        }

        let right = self.build_balanced(pairs, after);
        self.nodes[id].right = right;
        if let Some(right) = right {
            self.nodes[right].parent = Some(id);
        }
        Some(id)
    }
}

#[cfg(test)]
impl<K: Ord, V> RawTree<K, V> {
    /// Asserts the BST ordering, parent links and node count
    pub(crate) fn assert_structure(&self) {
        let mut count = 0;
        let mut stack: Vec<(NodeId, Option<&K>, Option<&K>)> = Vec::new();
        if let Some(root) = self.root {
            assert_eq!(self.parent(root), None, "root has a parent");
            stack.push((root, None, None));
        }
        while let Some((id, low, high)) = stack.pop() {
            count += 1;
            let key = &self.nodes[id].key;
            if let Some(low) = low {
                assert!(low < key, "left subtree key out of order");
            }
            if let Some(high) = high {
                assert!(key < high, "right subtree key out of order");
            }
            for (child, child_low, child_high) in
                [(self.left(id), low, Some(key)), (self.right(id), Some(key), high)]
            {
                if let Some(child) = child {
                    assert_eq!(self.parent(child), Some(id), "broken parent link");
                    stack.push((child, child_low, child_high));
                }
            }
        }
        assert_eq!(count, self.len());
    }
}
