//! Insertion-ordered keyed collection.

use std::collections::HashMap;
use std::collections::hash_map::ValuesMut;
use std::hash::Hash;

/// A keyed map that remembers insertion order.
///
/// Replacing the value under an existing key keeps that key's position, which
/// is what lets an entity be swapped for an object of another kind without
/// moving it. An optional limit evicts the oldest entries when a new key would
/// overflow it.
///
/// # Example
///
/// ```
/// use mosaic_core::Collection;
///
/// let mut letters = Collection::with_limit(2);
/// letters.insert('a', 1);
/// letters.insert('b', 2);
/// letters.insert('a', 10);
/// letters.insert('c', 3);
///
/// // 'a' was oldest even after being replaced in place
/// assert_eq!(letters.keys().copied().collect::<Vec<_>>(), vec!['b', 'c']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<K, V>
where
    K: Eq + Hash,
{
    entries: HashMap<K, V>,
    order: Vec<K>,
    limit: Option<usize>,
}

impl<K, V> Collection<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create an unbounded collection.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    /// Create a collection holding at most `limit` entries (minimum one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new()
        }
    }

    /// Entry limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Borrow the value under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Mutably borrow the value under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Insert a value, returning the one it replaced.
    ///
    /// A replaced key keeps its position; a new key goes last.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if !self.entries.contains_key(&key) {
            self.make_room();
            self.order.push(key.clone());
        }
        self.entries.insert(key, value)
    }

    /// Borrow the value under `key`, inserting `f()` first if absent.
    pub fn get_or_insert_with(&mut self, key: K, f: impl FnOnce() -> V) -> &mut V {
        if !self.entries.contains_key(&key) {
            self.make_room();
            self.order.push(key.clone());
        }
        self.entries.entry(key).or_insert_with(f)
    }

    /// Remove and return the value under `key`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.entries.remove(key)?;
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        Some(value)
    }

    /// Keep only the entries matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &mut V) -> bool) {
        self.entries.retain(|k, v| keep(k, v));
        let entries = &self.entries;
        self.order.retain(|k| entries.contains_key(k));
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(|k| self.entries.get(k))
    }

    /// Mutable values in unspecified order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        self.entries.values_mut()
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order
            .iter()
            .filter_map(|k| self.entries.get(k).map(|v| (k, v)))
    }

    fn make_room(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        while self.entries.len() >= limit && !self.order.is_empty() {
            let oldest = self.order.remove(0);
            self.entries.remove(&oldest);
            tracing::trace!(limit, "Evicted oldest collection entry");
        }
    }
}

impl<K, V> Default for Collection<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for Collection<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (key, value) in iter {
            collection.insert(key, value);
        }
        collection
    }
}
