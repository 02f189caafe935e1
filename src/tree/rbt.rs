use std::borrow::Borrow;

use crate::arena::NodeId;

use super::raw::{Color, Inserted, RawTree, Unlinked};

/// An ordered map stored in a red-black tree.
///
/// Behaves exactly like [`BsTreeMap`](super::BsTreeMap) from the outside,
/// but recolors and rotates after every insertion and removal so the height
/// stays below `2 * log2(n + 1)` whatever order keys arrive in.
#[derive(Debug, Clone)]
pub struct RbTreeMap<K, V> {
    /// Node storage and links
    tree: RawTree<K, V>,
}

tree_map_common!(RbTreeMap);

impl<K: Ord, V> RbTreeMap<K, V> {
    /// Creates an empty map
    #[must_use]
    pub const fn new() -> Self {
        Self { tree: RawTree::new() }
    }

    /// Associates `value` with `key`, returning the value it replaced
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.insert(key, value) {
            Inserted::Replaced(previous) => Some(previous),
            Inserted::Attached(id) => {
                self.tree.fix_after_insert(id);
                None
            }
        }
    }

    /// Removes `key`, returning the stored key along with its value
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.tree.search(key)?;
        let Unlinked { key, value, replacement, replacement_parent, removed_color } =
            self.tree.unlink(id)?;
        if removed_color == Color::Black {
            self.tree.fix_after_remove(replacement, replacement_parent);
        }
        Some((key, value))
    }
}

impl<K, V> RawTree<K, V> {
    /// Restores the red-black properties after `id` was attached as a red leaf
    fn fix_after_insert(&mut self, mut id: NodeId) {
        while let Some(parent) = self.parent(id).filter(|&p| self.color(Some(p)) == Color::Red) {
            // A red parent is never the root, so the grandparent exists
            let Some(grandparent) = self.parent(parent) else {
                break;
            };
            let parent_is_left = self.left(grandparent) == Some(parent);
            let uncle =
                if parent_is_left { self.right(grandparent) } else { self.left(grandparent) };

            if self.color(uncle) == Color::Red {
                self.set_color(Some(parent), Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                id = grandparent;
                continue;
            }

            let mut parent = parent;
            if parent_is_left {
                if self.right(parent) == Some(id) {
                    id = parent;
                    self.rotate_left(id);
                    parent = self.parent(id).unwrap_or(parent);
                }
                self.set_color(Some(parent), Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                self.rotate_right(grandparent);
            } else {
                if self.left(parent) == Some(id) {
                    id = parent;
                    self.rotate_right(id);
                    parent = self.parent(id).unwrap_or(parent);
                }
                self.set_color(Some(parent), Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                self.rotate_left(grandparent);
            }
        }
        self.set_color(self.root, Color::Black);
    }

    /// Restores the red-black properties after a black node left the tree.
    ///
    /// `current` carries an extra black; it may be absent, so its parent is
    /// passed alongside.
    fn fix_after_remove(&mut self, mut current: Option<NodeId>, mut parent: Option<NodeId>) {
        while current != self.root && self.color(current) == Color::Black {
            let Some(p) = parent else {
                break;
            };
            if self.left(p) == current {
                let Some(mut sibling) = self.right(p) else {
                    break;
                };
                if self.color(Some(sibling)) == Color::Red {
                    self.set_color(Some(sibling), Color::Black);
                    self.set_color(Some(p), Color::Red);
                    self.rotate_left(p);
                    let Some(next) = self.right(p) else {
                        break;
                    };
                    sibling = next;
                }
                if self.color(self.left(sibling)) == Color::Black
                    && self.color(self.right(sibling)) == Color::Black
                {
                    self.set_color(Some(sibling), Color::Red);
                    current = Some(p);
                    parent = self.parent(p);
                } else {
                    if self.color(self.right(sibling)) == Color::Black {
                        self.set_color(self.left(sibling), Color::Black);
                        self.set_color(Some(sibling), Color::Red);
                        self.rotate_right(sibling);
                        let Some(next) = self.right(p) else {
                            break;
                        };
                        sibling = next;
                    }
                    self.set_color(Some(sibling), self.color(Some(p)));
                    self.set_color(Some(p), Color::Black);
                    self.set_color(self.right(sibling), Color::Black);
                    self.rotate_left(p);
                    current = self.root;
                    parent = None;
                }
            } else {
                let Some(mut sibling) = self.left(p) else {
                    break;
                };
                if self.color(Some(sibling)) == Color::Red {
                    self.set_color(Some(sibling), Color::Black);
                    self.set_color(Some(p), Color::Red);
                    self.rotate_right(p);
                    let Some(next) = self.left(p) else {
                        break;
                    };
                    sibling = next;
                }
                if self.color(self.right(sibling)) == Color::Black
                    && self.color(self.left(sibling)) == Color::Black
                {
                    self.set_color(Some(sibling), Color::Red);
                    current = Some(p);
                    parent = self.parent(p);
                } else {
                    if self.color(self.left(sibling)) == Color::Black {
                        self.set_color(self.right(sibling), Color::Black);
                        self.set_color(Some(sibling), Color::Red);
                        self.rotate_left(sibling);
                        let Some(next) = self.left(p) else {
                            break;
                        };
                        sibling = next;
                    }
                    self.set_color(Some(sibling), self.color(Some(p)));
                    self.set_color(Some(p), Color::Black);
                    self.set_color(self.left(sibling), Color::Black);
                    self.rotate_right(p);
                    current = self.root;
                    parent = None;
                }
            }
        }
        self.set_color(current, Color::Black);
    }
}
