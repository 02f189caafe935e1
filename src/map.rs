//! The common map interface and a runtime-selected backend.

use std::{
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{BuildHasher, BuildHasherDefault, Hash},
    str::FromStr,
};

use crate::{
    chained_hashmap::{self, ChainedHashMap},
    error::MapError,
    tree::{self, BsTreeMap, RbTreeMap},
};

/// Operations every map backend supports.
///
/// Absent keys are reported as `None`, never as an error.
pub trait Map<K, V> {
    /// Iterator over the entries, in the backend's natural order
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Number of entries
    fn len(&self) -> usize;

    /// True when the map holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value stored for `key`
    fn get(&self, key: &K) -> Option<&V>;

    /// Associates `value` with `key`, returning the value it replaced
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Removes `key`, returning its value
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Iterates every entry
    fn iter(&self) -> Self::Iter<'_>;
}

impl<K, V, S> Map<K, V> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Iter<'a>
        = chained_hashmap::Iter<'a, K, V, S>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        ChainedHashMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        ChainedHashMap::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        ChainedHashMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        ChainedHashMap::remove(self, key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        ChainedHashMap::iter(self)
    }
}

impl<K: Ord, V> Map<K, V> for BsTreeMap<K, V> {
    type Iter<'a>
        = tree::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        BsTreeMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        BsTreeMap::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BsTreeMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BsTreeMap::remove(self, key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        BsTreeMap::iter(self)
    }
}

impl<K: Ord, V> Map<K, V> for RbTreeMap<K, V> {
    type Iter<'a>
        = tree::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        RbTreeMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        RbTreeMap::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        RbTreeMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        RbTreeMap::remove(self, key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        RbTreeMap::iter(self)
    }
}

/// Which structure backs an [`AnyMap`].
///
/// Parses from and displays as `hash`, `bst` or `rbt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// [`ChainedHashMap`]
    Hash,
    /// [`BsTreeMap`]
    Tree,
    /// [`RbTreeMap`]
    RedBlack,
}

impl Backend {
    /// Every backend, in display order
    pub const ALL: [Self; 3] = [Self::Hash, Self::Tree, Self::RedBlack];

    /// Command-line spelling of the backend
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::Tree => "bst",
            Self::RedBlack => "rbt",
        }
    }
}

impl FromStr for Backend {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hash" => Ok(Self::Hash),
            "bst" => Ok(Self::Tree),
            "rbt" => Ok(Self::RedBlack),
            other => Err(MapError::UnknownBackend(other.to_owned())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A map whose backend is chosen at runtime
#[derive(Debug, Clone)]
pub enum AnyMap<K, V> {
    /// Separate-chaining hash table
    Hash(ChainedHashMap<K, V>),
    /// Unbalanced binary search tree
    Tree(BsTreeMap<K, V>),
    /// Red-black tree
    RedBlack(RbTreeMap<K, V>),
}

impl<K, V> AnyMap<K, V>
where
    K: Ord + Hash,
{
    /// Creates an empty map of the given backend
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        match backend {
            Backend::Hash => Self::Hash(ChainedHashMap::new()),
            Backend::Tree => Self::Tree(BsTreeMap::new()),
            Backend::RedBlack => Self::RedBlack(RbTreeMap::new()),
        }
    }
}

impl<K, V> AnyMap<K, V> {
    /// Backend this map was built with
    #[must_use]
    pub const fn backend(&self) -> Backend {
        match self {
            Self::Hash(_) => Backend::Hash,
            Self::Tree(_) => Backend::Tree,
            Self::RedBlack(_) => Backend::RedBlack,
        }
    }
}

impl<K, V> From<ChainedHashMap<K, V>> for AnyMap<K, V> {
    fn from(map: ChainedHashMap<K, V>) -> Self {
        Self::Hash(map)
    }
}

impl<K, V> From<BsTreeMap<K, V>> for AnyMap<K, V> {
    fn from(map: BsTreeMap<K, V>) -> Self {
        Self::Tree(map)
    }
}

impl<K, V> From<RbTreeMap<K, V>> for AnyMap<K, V> {
    fn from(map: RbTreeMap<K, V>) -> Self {
        Self::RedBlack(map)
    }
}

impl<K, V> Map<K, V> for AnyMap<K, V>
where
    K: Ord + Hash,
{
    type Iter<'a>
        = AnyIter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        match self {
            Self::Hash(map) => map.len(),
            Self::Tree(map) => map.len(),
            Self::RedBlack(map) => map.len(),
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        match self {
            Self::Hash(map) => map.get(key),
            Self::Tree(map) => map.get(key),
            Self::RedBlack(map) => map.get(key),
        }
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self {
            Self::Hash(map) => map.insert(key, value),
            Self::Tree(map) => map.insert(key, value),
            Self::RedBlack(map) => map.insert(key, value),
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        match self {
            Self::Hash(map) => map.remove(key),
            Self::Tree(map) => map.remove(key),
            Self::RedBlack(map) => map.remove(key),
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        match self {
            Self::Hash(map) => AnyIter::Hash(map.iter()),
            Self::Tree(map) => AnyIter::Tree(map.iter()),
            Self::RedBlack(map) => AnyIter::Tree(map.iter()),
        }
    }
}

/// Hash maps dump their buckets; trees print their inorder traversal.
impl<K, V> fmt::Display for AnyMap<K, V>
where
    K: Eq + Hash + fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash(map) => fmt::Display::fmt(map, f),
            Self::Tree(map) => fmt::Display::fmt(map, f),
            Self::RedBlack(map) => fmt::Display::fmt(map, f),
        }
    }
}

/// Iterator over an [`AnyMap`]
#[derive(Debug)]
pub enum AnyIter<'a, K, V> {
    /// Bucket order
    Hash(chained_hashmap::Iter<'a, K, V, BuildHasherDefault<DefaultHasher>>),
    /// Ascending key order
    Tree(tree::Iter<'a, K, V>),
}

impl<'a, K, V> Iterator for AnyIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Hash(iter) => iter.next(),
            Self::Tree(iter) => iter.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<M: Map<String, i32>>(map: &mut M) {
        for i in 1..=100 {
            assert_eq!(map.insert(i.to_string(), i), None);
        }
        assert_eq!(map.len(), 100);
        assert_eq!(map.iter().map(|(_, v)| *v).sum::<i32>(), 5050);

        for i in (1..=100).rev() {
            assert_eq!(map.insert(i.to_string(), i), Some(i));
        }
        assert_eq!(map.len(), 100);
        assert_eq!(map.iter().map(|(_, v)| *v).sum::<i32>(), 5050);

        for i in 1..=100 {
            assert_eq!(map.remove(&i.to_string()), Some(i));
        }
        assert!(map.is_empty());
        for i in 1..=100 {
            assert_eq!(map.get(&i.to_string()), None);
        }
        assert_eq!(map.remove(&"1".to_string()), None);
    }

    #[test]
    fn test_every_backend_behaves_alike() {
        exercise(&mut ChainedHashMap::new());
        exercise(&mut BsTreeMap::new());
        exercise(&mut RbTreeMap::new());
        for backend in Backend::ALL {
            let mut map = AnyMap::new(backend);
            exercise(&mut map);
            assert_eq!(map.backend(), backend);
        }
    }

    #[test]
    fn test_backend_parsing() {
        for backend in Backend::ALL {
            assert_eq!(backend.to_string().parse::<Backend>(), Ok(backend));
        }
        assert_eq!("bst".parse::<Backend>(), Ok(Backend::Tree));
        assert_eq!(
            "avl".parse::<Backend>(),
            Err(MapError::UnknownBackend("avl".to_string()))
        );
        assert_eq!(
            "HASH".parse::<Backend>().unwrap_err().to_string(),
            "Invalid data structure 'HASH' received."
        );
    }

    #[test]
    fn test_tree_backends_iterate_in_order() {
        for backend in [Backend::Tree, Backend::RedBlack] {
            let mut map = AnyMap::new(backend);
            for key in [5, 3, 9, 1, 7] {
                map.insert(key, key * 10);
            }
            let keys: Vec<i32> = map.iter().map(|(k, _)| *k).collect();
            assert_eq!(keys, vec![1, 3, 5, 7, 9]);
            assert_eq!(map.to_string(), "[<1, 10>, <3, 30>, <5, 50>, <7, 70>, <9, 90>]");
        }
    }

    #[test]
    fn test_from_concrete_map() {
        let map: AnyMap<_, _> = ChainedHashMap::from_iter([(1, 'a')]).into();
        assert_eq!(map.backend(), Backend::Hash);
        assert_eq!(Map::get(&map, &1), Some(&'a'));
    }
}
