use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{BuildHasher, BuildHasherDefault, Hash},
    mem,
};

use crate::{
    arena::{Arena, NodeId},
    entry::EntryDisplay,
    error::{MapError, Result},
};

/// Bucket counts the table grows through. Growth stops at the last one.
const PRIMES: [usize; 12] =
    [101, 211, 431, 863, 1733, 3467, 6947, 13901, 27803, 55609, 111227, 222461];

/// Default load factor threshold, as a percentage
const DEFAULT_LOAD_FACTOR_THRESHOLD: usize = 75;

/// Above this many entries `Display` prints a placeholder instead of the table
const MAX_RENDERED_ENTRIES: usize = 1000;

/// A chain link holding a key-value pair
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
    /// The next entry in the same bucket
    next: Option<NodeId>,
}

/// A hash table resolving collisions by separate chaining.
///
/// Buckets are indexed by the key's hash modulo a prime capacity. When the
/// load factor exceeds the threshold (75% by default) the table advances to
/// the next prime of a fixed sequence and relinks every entry; once the
/// sequence is exhausted the table keeps working at a higher load factor.
///
/// New keys are linked at the head of their chain.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<K, V, S = BuildHasherDefault<DefaultHasher>> {
    /// Bucket heads, one per slot of the current prime capacity
    table: Vec<Option<NodeId>>,
    /// Storage for every chain entry
    entries: Arena<Entry<K, V>>,
    /// Position of the current capacity in `PRIMES`
    prime_index: usize,
    /// Current number of entries in the hash table
    size: usize,
    /// Growth threshold, as a percentage of entries per bucket
    load_factor_threshold: usize,
    /// Builds the hasher used for every key
    hash_builder: S,
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty `ChainedHashMap` with 101 buckets
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(BuildHasherDefault::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Creates an empty `ChainedHashMap` hashing keys with `hash_builder`
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: vec![None; PRIMES[0]],
            entries: Arena::new(),
            prime_index: 0,
            size: 0,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
            hash_builder,
        }
    }

    /// Gets the bucket index for a key
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        bucket_for(non_negative_hash(self.hash_builder.hash_one(key)), self.table.len())
    }

    /// Walks the chain of `bucket` looking for `key`
    fn find<Q>(&self, bucket: usize, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut current = self.table.get(bucket).copied().flatten();
        while let Some(id) = current {
            let entry = &self.entries[id];
            if entry.key.borrow() == key {
                return Some(id);
            }
            current = entry.next;
        }
        None
    }

    /// Returns the value stored for `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.find(self.bucket_index(key), key)?;
        Some(&self.entries[id].value)
    }

    /// Returns a mutable reference to the value stored for `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.find(self.bucket_index(key), key)?;
        Some(&mut self.entries[id].value)
    }

    /// Returns true if the map holds a value for `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Insert a key-value pair into the hash table.
    ///
    /// Returns the previous value when the key was already present; in that
    /// case only the value changes and no resize can happen.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_index(&key);
        if let Some(id) = self.find(bucket, &key) {
            return Some(mem::replace(&mut self.entries[id].value, value));
        }

        let Some(head) = self.table.get_mut(bucket) else {
            return None;
        };
        let id = self.entries.alloc(Entry { key, value, next: *head });
        *head = Some(id);
        self.size = self.size.saturating_add(1);

        if self.exceeds_threshold() && !self.is_at_max_capacity() {
            self.resize();
        }
        None
    }

    /// Removes a key-value pair from the hash table
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.bucket_index(key);
        let head = self.table.get(bucket).copied().flatten()?;

        // Match at the head of the chain
        if self.entries[head].key.borrow() == key {
            let next = self.entries[head].next;
            if let Some(slot) = self.table.get_mut(bucket) {
                *slot = next;
            }
            return self.release(head);
        }

        // Otherwise splice the match out with a trailing link
        let mut prior = head;
        let mut current = self.entries[head].next;
        while let Some(id) = current {
            let next = self.entries[id].next;
            if self.entries[id].key.borrow() == key {
                self.entries[prior].next = next;
                return self.release(id);
            }
            prior = id;
            current = next;
        }
        None
    }

    /// Frees an entry that has already been unlinked from its chain
    fn release(&mut self, id: NodeId) -> Option<V> {
        let entry = self.entries.free(id)?;
        self.size = self.size.saturating_sub(1);
        Some(entry.value)
    }

    /// Returns true once the load factor is above the threshold
    fn exceeds_threshold(&self) -> bool {
        self.size.saturating_mul(100) > self.table.len().saturating_mul(self.load_factor_threshold)
    }

    /// Returns true when the table already uses the last prime of the sequence
    const fn is_at_max_capacity(&self) -> bool {
        self.prime_index.saturating_add(1) >= PRIMES.len()
    }

    /// Moves the table to the next prime capacity, relinking every entry at
    /// the head of its new bucket. No entry is reallocated.
    fn resize(&mut self) {
        let next_index = self.prime_index.saturating_add(1);
        let Some(&new_capacity) = PRIMES.get(next_index) else {
            return;
        };
        let old_table = mem::replace(&mut self.table, vec![None; new_capacity]);
        self.prime_index = next_index;

        for head in old_table {
            let mut current = head;
            while let Some(id) = current {
                let entry = &self.entries[id];
                current = entry.next;
                let bucket = bucket_for(
                    non_negative_hash(self.hash_builder.hash_one(&entry.key)),
                    new_capacity,
                );
                if let Some(slot) = self.table.get_mut(bucket) {
                    self.entries[id].next = *slot;
                    *slot = Some(id);
                }
            }
        }

        tracing::debug!(capacity = new_capacity, entries = self.size, "resized hash table");
        if self.is_at_max_capacity() {
            tracing::warn!(
                capacity = new_capacity,
                "hash table reached its largest capacity, growth is disabled"
            );
        }
    }

    /// Sets the percentage of entries per bucket above which the table grows,
    /// clamped to `1..=95`. Takes effect on the next insertion.
    pub fn set_load_factor_threshold(&mut self, threshold: usize) {
        self.load_factor_threshold = threshold.clamp(1, 95);
    }

    /// Returns the number of elements in the hash table
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the hash table is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Clears the hash map, removing all key-value pairs. The capacity is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.table {
            *bucket = None;
        }
        self.entries.clear();
        self.size = 0;
    }

    /// Returns the number of buckets in the hash map
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Returns the current load factor of the hash map
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.table.len() as f64
    }

    /// Length of the longest chain.
    ///
    /// Tells how well the hash function spreads keys: at a 0.75 load factor
    /// this should stay close to 1.
    #[must_use]
    pub fn max_chain_length(&self) -> usize {
        (0..self.table.len()).map(|bucket| self.chain(bucket).count()).max().unwrap_or(0)
    }

    /// Returns an iterator over the key-value pairs in bucket order, each
    /// chain from head to tail
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter { map: self, bucket: 0, current: None }
    }

    /// Iterates the entries of one chain
    fn chain(&self, bucket: usize) -> impl Iterator<Item = &Entry<K, V>> {
        let mut current = self.table.get(bucket).copied().flatten();
        std::iter::from_fn(move || {
            let entry = &self.entries[current?];
            current = entry.next;
            Some(entry)
        })
    }
}

/// Reads the 64-bit hash as a signed integer and takes its absolute value.
/// `i64::MIN` has no positive counterpart and maps to 0.
fn non_negative_hash(hash: u64) -> u64 {
    let signed = i64::from_ne_bytes(hash.to_ne_bytes());
    signed.checked_abs().map_or(0, i64::unsigned_abs)
}

/// Reduces a non-negative hash to a bucket index
#[allow(clippy::cast_possible_truncation)]
fn bucket_for(hash: u64, capacity: usize) -> usize {
    // `capacity` always fits in u64 and the remainder is below `capacity`
    hash.checked_rem(capacity as u64).unwrap_or(0) as usize
}

impl<K, V, S> fmt::Display for ChainedHashMap<K, V, S>
where
    K: Eq + Hash + fmt::Display,
    V: fmt::Display,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.size > MAX_RENDERED_ENTRIES {
            return f.write_str("HashMap too large to represent as a string.");
        }
        let Some(last) = self.table.iter().rposition(Option::is_some) else {
            return f.write_str("HashMap is empty.");
        };
        let width = last.to_string().len();
        for bucket in 0..=last {
            let mut chain = self.chain(bucket).peekable();
            if chain.peek().is_none() {
                continue;
            }
            write!(f, "{bucket:>width$}: ")?;
            for (position, entry) in chain.enumerate() {
                if position > 0 {
                    f.write_str(" -> ")?;
                }
                write!(f, "{}", EntryDisplay { key: &entry.key, value: &entry.value })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the key-value pairs of the hash table
#[derive(Debug)]
pub struct Iter<'a, K, V, S> {
    /// The map being iterated
    map: &'a ChainedHashMap<K, V, S>,
    /// Next bucket to look at once the current chain ends
    bucket: usize,
    /// Entry to yield next
    current: Option<NodeId>,
}

impl<K, V, S> Iter<'_, K, V, S> {
    /// Removing through the iterator is not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`MapError::UnsupportedOperation`].
    pub fn remove(&mut self) -> Result<()> {
        Err(MapError::UnsupportedOperation { operation: "remove" })
    }
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current.is_none() {
            let head = self.map.table.get(self.bucket)?;
            self.current = *head;
            self.bucket = self.bucket.saturating_add(1);
        }
        let entry = &self.map.entries[self.current?];
        self.current = entry.next;
        Some((&entry.key, &entry.value))
    }
}
