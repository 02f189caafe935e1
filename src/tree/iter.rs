use crate::{
    arena::NodeId,
    error::{MapError, Result},
};

use super::raw::RawTree;

/// Inorder iterator over a tree map, yielding entries by ascending key.
///
/// Walks with an explicit stack of pending parents instead of recursion.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    /// Tree being walked
    tree: &'a RawTree<K, V>,
    /// Next subtree to descend into
    current: Option<NodeId>,
    /// Ancestors whose entry and right subtree are still pending
    parents: Vec<NodeId>,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Starts at the root of `tree`
    pub(crate) const fn new(tree: &'a RawTree<K, V>) -> Self {
        Self { tree, current: tree.root, parents: Vec::new() }
    }

    /// Removing through the iterator is not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`MapError::UnsupportedOperation`].
    pub fn remove(&mut self) -> Result<()> {
        Err(MapError::UnsupportedOperation { operation: "remove" })
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.current {
            self.parents.push(id);
            self.current = self.tree.left(id);
        }
        let id = self.parents.pop()?;
        self.current = self.tree.right(id);
        Some(self.tree.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.tree.len()))
    }
}

impl<K, V> std::iter::FusedIterator for Iter<'_, K, V> {}
