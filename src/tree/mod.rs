//! Ordered maps over an arena-backed binary tree.
//!
//! [`BsTreeMap`] is a plain binary search tree whose shape depends on the
//! insertion order. [`RbTreeMap`] keeps itself balanced with red-black
//! recoloring and rotations. Both share the same node storage, search,
//! traversal, statistics and drawing code.

/// Lookups, traversals, metrics and trait impls common to the tree maps.
///
/// The map type must wrap a `tree: RawTree<K, V>` field and provide its own
/// `new` and `insert`; only insertion and removal differ between the maps.
macro_rules! tree_map_common {
    ($map:ident) => {
        impl<K: Ord, V> Default for $map<K, V> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<K: Ord, V> Extend<(K, V)> for $map<K, V> {
            fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
                for (k, v) in iter {
                    self.insert(k, v);
                }
            }
        }

        /// Inserts the pairs one by one in the order received
        impl<K: Ord, V> FromIterator<(K, V)> for $map<K, V> {
            fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
                let mut map = Self::new();
                map.extend(iter);
                map
            }
        }

        impl<K: Ord, V> $map<K, V> {
            /// Returns the value stored for `key`
            pub fn get<Q>(&self, key: &Q) -> Option<&V>
            where
                K: ::std::borrow::Borrow<Q>,
                Q: Ord + ?Sized,
            {
                let id = self.tree.search(key)?;
                Some(self.tree.entry(id).1)
            }

            /// Returns a mutable reference to the value stored for `key`
            pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
            where
                K: ::std::borrow::Borrow<Q>,
                Q: Ord + ?Sized,
            {
                let id = self.tree.search(key)?;
                Some(&mut self.tree.nodes[id].value)
            }

            /// Returns true if the map holds a value for `key`
            pub fn contains_key<Q>(&self, key: &Q) -> bool
            where
                K: ::std::borrow::Borrow<Q>,
                Q: Ord + ?Sized,
            {
                self.tree.search(key).is_some()
            }

            /// Removes `key`, returning its value
            pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
            where
                K: ::std::borrow::Borrow<Q>,
                Q: Ord + ?Sized,
            {
                self.remove_entry(key).map(|(_, value)| value)
            }

            /// Entry with the smallest key
            #[must_use]
            pub fn first_key_value(&self) -> Option<(&K, &V)> {
                let root = self.tree.root?;
                Some(self.tree.entry(self.tree.minimum(root)))
            }

            /// Entry with the largest key
            #[must_use]
            pub fn last_key_value(&self) -> Option<(&K, &V)> {
                let root = self.tree.root?;
                Some(self.tree.entry(self.tree.maximum(root)))
            }
        }

        impl<K, V> $map<K, V> {
            /// Returns the number of entries
            #[must_use]
            pub const fn len(&self) -> usize {
                self.tree.len()
            }

            /// Returns true if the map holds no entries
            #[must_use]
            pub const fn is_empty(&self) -> bool {
                self.tree.len() == 0
            }

            /// Removes every entry
            pub fn clear(&mut self) {
                self.tree.clear();
            }

            /// Iterates entries by ascending key
            #[must_use]
            #[allow(clippy::iter_without_into_iter)]
            pub fn iter(&self) -> $crate::tree::Iter<'_, K, V> {
                $crate::tree::Iter::new(&self.tree)
            }

            /// Height, node count, null positions and level sums
            #[must_use]
            pub fn stats(&self) -> $crate::tree::TreeStats {
                self.tree.stats()
            }

            /// Height of the tree, -1 when empty
            #[must_use]
            pub fn height(&self) -> isize {
                self.tree.stats().height
            }
        }

        impl<K: ::std::fmt::Display, V: ::std::fmt::Display> $map<K, V> {
            /// Entries in the given traversal order, as `[<k, v>, <k, v>]`
            #[must_use]
            pub fn traversal(&self, order: $crate::tree::Traversal) -> String {
                self.tree.rendered(order).to_string()
            }

            /// Node, left, right
            #[must_use]
            pub fn preorder(&self) -> String {
                self.traversal($crate::tree::Traversal::Preorder)
            }

            /// Left, node, right
            #[must_use]
            pub fn inorder(&self) -> String {
                self.traversal($crate::tree::Traversal::Inorder)
            }

            /// Left, right, node
            #[must_use]
            pub fn postorder(&self) -> String {
                self.traversal($crate::tree::Traversal::Postorder)
            }

            /// ASCII drawing of the tree's shape
            #[must_use]
            pub fn to_ascii_drawing(&self) -> String {
                self.tree.ascii_drawing()
            }
        }

        /// Inorder entries, as `[<k, v>, <k, v>]`
        impl<K: ::std::fmt::Display, V: ::std::fmt::Display> ::std::fmt::Display for $map<K, V> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.tree.rendered($crate::tree::Traversal::Inorder), f)
            }
        }
    };
}

mod bst;
mod iter;
mod printer;
mod raw;
mod rbt;
mod stats;

pub use bst::BsTreeMap;
pub use iter::Iter;
pub use rbt::RbTreeMap;
pub use stats::{Traversal, TreeStats};
