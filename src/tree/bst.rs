use std::borrow::Borrow;

use crate::error::{MapError, Result};

use super::raw::{Inserted, RawTree};

/// An ordered map stored in a plain binary search tree.
///
/// Keys arriving in sorted order through [`insert`](Self::insert) degrade the
/// tree into a list; [`from_sorted`](Self::from_sorted) builds a balanced
/// tree from sorted pairs in linear time instead.
///
/// ```rust
/// use wordmap::BsTreeMap;
///
/// let mut map = BsTreeMap::new();
/// map.insert(5, "five");
/// map.insert(2, "two");
/// map.insert(8, "eight");
///
/// assert_eq!(map.get(&2), Some(&"two"));
/// assert_eq!(map.preorder(), "[<5, five>, <2, two>, <8, eight>]");
/// assert_eq!(map.remove(&5), Some("five"));
/// assert_eq!(map.inorder(), "[<2, two>, <8, eight>]");
/// ```
#[derive(Debug, Clone)]
pub struct BsTreeMap<K, V> {
    /// Node storage and links
    tree: RawTree<K, V>,
}

tree_map_common!(BsTreeMap);

impl<K: Ord, V> BsTreeMap<K, V> {
    /// Creates an empty map
    #[must_use]
    pub const fn new() -> Self {
        Self { tree: RawTree::new() }
    }

    /// Builds a balanced tree from pairs sorted by strictly ascending key.
    ///
    /// The middle pair of every range becomes the root of that range's
    /// subtree, so the height is `floor(log2(n))`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnsortedInput`] when a key does not exceed the
    /// key before it.
    pub fn from_sorted<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        if let Some(position) =
            pairs.iter().zip(pairs.iter().skip(1)).position(|((a, _), (b, _))| a >= b)
        {
            return Err(MapError::UnsortedInput { index: position.saturating_add(1) });
        }

        let count = pairs.len();
        let mut tree = RawTree::with_capacity(count);
        let mut pairs = pairs.into_iter();
        tree.root = tree.build_balanced(&mut pairs, count);
        Ok(Self { tree })
    }

    /// Associates `value` with `key`, returning the value it replaced.
    ///
    /// An existing key keeps its node; only the value changes.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.insert(key, value) {
            Inserted::Replaced(previous) => Some(previous),
            Inserted::Attached(_) => None,
        }
    }

    /// Removes `key`, returning the stored key along with its value
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.tree.search(key)?;
        self.tree.unlink(id).map(|unlinked| (unlinked.key, unlinked.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn map_of(keys: &[i32]) -> BsTreeMap<i32, i32> {
        keys.iter().map(|&k| (k, k * 10)).collect()
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = BsTreeMap::new();
        assert_eq!(map.insert("key2".to_string(), 2), None);
        assert_eq!(map.insert("key1".to_string(), 1), None);
        assert_eq!(map.insert("key3".to_string(), 3), None);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.get("key4"), None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_update_keeps_shape() {
        let mut map = map_of(&[5, 2, 8]);
        let before = map.preorder();
        assert_eq!(map.insert(2, 99), Some(20));
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&2), Some(&99));
        assert_eq!(map.preorder().replace("99", "20"), before);
    }

    #[test]
    fn test_remove_leaf_and_single_child() {
        let mut map = map_of(&[5, 2, 8, 9]);
        assert_eq!(map.remove(&2), Some(20));
        assert_eq!(map.preorder(), "[<5, 50>, <8, 80>, <9, 90>]");
        assert_eq!(map.remove(&8), Some(80));
        assert_eq!(map.preorder(), "[<5, 50>, <9, 90>]");
        assert_eq!(map.remove_entry(&9), Some((9, 90)));
        assert_eq!(map.remove_entry(&9), None);
        assert_eq!(map.len(), 1);
        map.tree.assert_structure();
    }

    #[test]
    fn test_remove_two_children() {
        // successor is the immediate right child
        let mut map = map_of(&[5, 2, 8, 9]);
        assert_eq!(map.remove(&5), Some(50));
        assert_eq!(map.preorder(), "[<8, 80>, <2, 20>, <9, 90>]");
        map.tree.assert_structure();

        // successor deeper in the right subtree
        let mut map = map_of(&[10, 5, 20, 15, 30, 17]);
        assert_eq!(map.remove(&10), Some(100));
        assert_eq!(map.preorder(), "[<15, 150>, <5, 50>, <20, 200>, <17, 170>, <30, 300>]");
        map.tree.assert_structure();
    }

    #[test]
    fn test_remove_root_until_empty() {
        let mut map = map_of(&[4, 2, 6, 1, 3, 5, 7]);
        while let Some((&key, _)) = map.first_key_value() {
            assert!(map.remove(&key).is_some());
            map.tree.assert_structure();
        }
        assert!(map.is_empty());
        assert_eq!(map.height(), -1);
        assert_eq!(map.remove(&4), None);
    }

    #[test]
    fn test_traversals() {
        let map = map_of(&[4, 2, 6, 1, 3]);
        assert_eq!(map.preorder(), "[<4, 40>, <2, 20>, <1, 10>, <3, 30>, <6, 60>]");
        assert_eq!(map.inorder(), "[<1, 10>, <2, 20>, <3, 30>, <4, 40>, <6, 60>]");
        assert_eq!(map.postorder(), "[<1, 10>, <3, 30>, <2, 20>, <6, 60>, <4, 40>]");
        assert_eq!(map.to_string(), map.inorder());
        assert_eq!(BsTreeMap::<i32, i32>::new().inorder(), "[]");
    }

    #[test]
    fn test_iter_is_ascending() {
        let map = map_of(&[50, 30, 70, 20, 40, 60, 80]);
        let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![20, 30, 40, 50, 60, 70, 80]);

        let mut iter = map.iter();
        assert!(iter.remove().is_err());
    }

    #[test]
    fn test_sequential_sorted_input_degenerates() {
        let map: BsTreeMap<_, _> = (0..100).map(|k| (k, k)).collect();
        assert_eq!(map.height(), 99);
    }

    #[test]
    fn test_from_sorted_is_balanced() {
        for n in [1_usize, 2, 3, 7, 8, 100, 1000, 1023, 1024] {
            let map = BsTreeMap::from_sorted((0..n).map(|k| (k, k))).unwrap();
            let expected = isize::try_from(n.ilog2()).unwrap();
            assert_eq!(map.height(), expected, "n = {n}");
            assert_eq!(map.len(), n);
            map.tree.assert_structure();
            assert!(map.iter().map(|(k, _)| *k).eq(0..n));
        }

        let empty = BsTreeMap::<i32, i32>::from_sorted(Vec::new()).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.height(), -1);
    }

    #[test]
    fn test_from_sorted_picks_middle() {
        let map = BsTreeMap::from_sorted((1..=7).map(|k| (k, k))).unwrap();
        assert_eq!(map.preorder(), "[<4, 4>, <2, 2>, <1, 1>, <3, 3>, <6, 6>, <5, 5>, <7, 7>]");
    }

    #[test]
    fn test_from_sorted_rejects_unsorted() {
        let error = BsTreeMap::from_sorted(vec![(1, ()), (3, ()), (2, ())]).unwrap_err();
        assert_eq!(error, MapError::UnsortedInput { index: 2 });

        let error = BsTreeMap::from_sorted(vec![(1, ()), (1, ())]).unwrap_err();
        assert_eq!(error, MapError::UnsortedInput { index: 1 });
    }

    #[test]
    fn test_stats() {
        let map = map_of(&[5, 2, 8, 10]);
        let stats = map.stats();
        assert_eq!(stats.null_count, map.len() + 1);
        assert_eq!(stats.sum_levels, 4);
        assert_eq!(stats.sum_null_levels, 12);
    }

    #[test]
    fn test_get_mut_and_clear() {
        let mut map = map_of(&[1, 2]);
        if let Some(value) = map.get_mut(&1) {
            *value += 1;
        }
        assert_eq!(map.get(&1), Some(&11));
        assert!(map.contains_key(&2));

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.iter().next(), None);
    }

    proptest! {
        #[test]
        fn prop_matches_btreemap(ops in prop::collection::vec((any::<bool>(), 0u8..64, any::<u16>()), 0..300)) {
            let mut map = BsTreeMap::new();
            let mut model = BTreeMap::new();
            for (is_insert, key, value) in ops {
                if is_insert {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                } else {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                }
            }
            map.tree.assert_structure();
            prop_assert_eq!(map.len(), model.len());
            prop_assert!(map.iter().eq(model.iter()));
            prop_assert_eq!(map.stats().null_count, map.len() + 1);
        }
    }
}
