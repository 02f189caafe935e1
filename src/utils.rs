//! Utility functions and traits shared by every map backend

use crate::map::Map;

/// Extension trait for [`Map`] implementations that provides additional utility methods
pub trait MapExtensions<K, V> {
    /// Returns the keys of the map as a Vec, in iteration order
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the map as a Vec, in iteration order
    fn values(&self) -> Vec<V>;

    /// Returns true if the map contains the given key
    fn contains_key(&self, key: &K) -> bool;
}

impl<K, V, M> MapExtensions<K, V> for M
where
    M: Map<K, V>,
    K: Clone,
    V: Clone,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

/// Fills an empty map of type `M` from an iterator of key-value pairs.
/// Later pairs overwrite earlier ones with the same key.
pub fn collect_into<K, V, M, I>(mut map: M, iter: I) -> M
where
    M: Map<K, V>,
    I: IntoIterator<Item = (K, V)>,
{
    for (key, value) in iter {
        map.insert(key, value);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnyMap, Backend, BsTreeMap, ChainedHashMap, RbTreeMap};

    #[test]
    fn test_collect_into() {
        let data = vec![("a".to_string(), 1), ("b".to_string(), 2), ("a".to_string(), 3)];

        let map = collect_into(AnyMap::new(Backend::RedBlack), data);

        assert_eq!(map.get(&"a".to_string()), Some(&3));
        assert_eq!(map.get(&"b".to_string()), Some(&2));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_keys_and_values() {
        let mut map = ChainedHashMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        map.insert("c".to_string(), 3);

        let mut keys = MapExtensions::keys(&map);
        keys.sort(); // Bucket order is not sorted

        let mut values = MapExtensions::values(&map);
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_tree_keys_are_sorted() {
        let map: BsTreeMap<_, _> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
        assert_eq!(MapExtensions::keys(&map), vec![1, 2, 3]);
        assert_eq!(MapExtensions::values(&map), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_contains_key() {
        let map: RbTreeMap<_, _> = [("a".to_string(), 1)].into_iter().collect();

        assert!(MapExtensions::contains_key(&map, &"a".to_string()));
        assert!(!MapExtensions::contains_key(&map, &"b".to_string()));
    }
}
