//! Single-threaded persistent map.

use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::ops;

use archery::{RcK, SharedPointerKind};

use crate::iter::{Iter, Keys, Values};
use crate::node::{Entry, Node};
use crate::ops::get::get_recursive;
use crate::ops::insert::{Insert, insert_recursive};
use crate::ops::remove::{Remove, remove_recursive};

/// Hashes `key` down to the 32-bit value the trie keys on, using `builder`.
fn hash_key<K: Hash + ?Sized, S: BuildHasher>(key: &K, builder: &S) -> u32 {
    let mut hasher = builder.build_hasher();
    key.hash(&mut hasher);
    hasher.finish() as u32
}

/// A persistent (immutable, structurally shared) hash array mapped trie.
///
/// Every mutating method returns a new `PersistentMap` that shares whatever
/// subtrees the edit didn't touch with `self`; `self` remains valid and
/// unchanged afterwards. `_mut` variants are provided as a convenience for
/// single-owner callers who don't need to retain the prior version.
///
/// `P` selects the shared-pointer kind backing every node: [`archery::RcK`]
/// (the default, single-threaded) or [`archery::ArcK`] (see
/// [`PersistentMapSync`](crate::PersistentMapSync)). `S` selects the hasher
/// used to place keys in the trie, [`RandomState`] by default — the same
/// hash-DoS-resistant default `std::collections::HashMap` uses.
pub struct PersistentMap<K, V, P: SharedPointerKind = RcK, S = RandomState> {
    root: Node<K, V, P>,
    size: usize,
    hasher_builder: S,
}

impl<K, V, P: SharedPointerKind, S: Clone> Clone for PersistentMap<K, V, P, S> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            size: self.size,
            hasher_builder: self.hasher_builder.clone(),
        }
    }
}

impl<K, V, P: SharedPointerKind, S: Default> PersistentMap<K, V, P, S> {
    /// Creates an empty map using `S`'s default hasher builder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, P: SharedPointerKind, S> PersistentMap<K, V, P, S> {
    /// Creates an empty map that hashes keys with `hasher_builder`.
    #[must_use]
    pub fn with_hasher(hasher_builder: S) -> Self {
        Self {
            root: Node::Empty,
            size: 0,
            hasher_builder,
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns an iterator over `(&K, &V)` pairs in trie slot order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter::new(&self.root)
    }

    /// Returns an iterator over key references.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, P> {
        self.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over value references.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, P> {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V, P: SharedPointerKind, S: Default> Default for PersistentMap<K, V, P, S> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Read operations — K: Hash + Eq, S: BuildHasher
// ---------------------------------------------------------------------------

impl<K, V, P, S> PersistentMap<K, V, P, S>
where
    K: Hash + Eq,
    P: SharedPointerKind,
    S: BuildHasher,
{
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        get_recursive(&self.root, hash_key(key, &self.hasher_builder), key, 0)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

// ---------------------------------------------------------------------------
// Write operations — K: Hash + Eq, V: PartialEq, S: BuildHasher
// ---------------------------------------------------------------------------

impl<K, V, P, S> PersistentMap<K, V, P, S>
where
    K: Hash + Eq,
    V: PartialEq,
    P: SharedPointerKind,
    S: BuildHasher + Clone,
{
    /// Returns a new map with `key` bound to `value`.
    ///
    /// If `key` is already bound to a value equal to `value`, the returned
    /// map shares its root with `self` directly — no rebuild, no new
    /// allocation.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let hash = hash_key(&key, &self.hasher_builder);
        let entry = Entry { hash, key, value };
        match insert_recursive(&self.root, entry, 0) {
            Insert::Unchanged => self.clone(),
            Insert::Changed { node, new_key } => Self {
                root: node,
                size: self.size + usize::from(new_key),
                hasher_builder: self.hasher_builder.clone(),
            },
        }
    }
}

impl<K, V, P, S> PersistentMap<K, V, P, S>
where
    K: Hash + Eq,
    V: PartialEq,
    P: SharedPointerKind,
    S: BuildHasher,
{
    /// Inserts `key`/`value` in place.
    ///
    /// Returns `true` if this added a new key, `false` if it replaced an
    /// existing binding or left the map unchanged.
    pub fn insert_mut(&mut self, key: K, value: V) -> bool {
        let hash = hash_key(&key, &self.hasher_builder);
        let entry = Entry { hash, key, value };
        match insert_recursive(&self.root, entry, 0) {
            Insert::Unchanged => false,
            Insert::Changed { node, new_key } => {
                self.root = node;
                if new_key {
                    self.size += 1;
                }
                new_key
            }
        }
    }
}

impl<K, V, P, S> PersistentMap<K, V, P, S>
where
    K: Hash + Eq,
    P: SharedPointerKind,
    S: BuildHasher + Clone,
{
    /// Returns a new map with `key` removed, if present.
    ///
    /// If `key` isn't present, the returned map shares its root with `self`.
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        let hash = hash_key(key, &self.hasher_builder);
        match remove_recursive(&self.root, hash, key, 0) {
            Remove::NotFound => self.clone(),
            Remove::Removed(node) => Self {
                root: node,
                size: self.size - 1,
                hasher_builder: self.hasher_builder.clone(),
            },
        }
    }
}

impl<K, V, P, S> PersistentMap<K, V, P, S>
where
    K: Hash + Eq,
    P: SharedPointerKind,
    S: BuildHasher,
{
    /// Removes `key` in place. Returns `true` if it was present.
    pub fn remove_mut(&mut self, key: &K) -> bool {
        let hash = hash_key(key, &self.hasher_builder);
        match remove_recursive(&self.root, hash, key, 0) {
            Remove::NotFound => false,
            Remove::Removed(node) => {
                self.root = node;
                self.size -= 1;
                true
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V, P: SharedPointerKind, S> fmt::Debug for PersistentMap<K, V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentMap")
            .field("len", &self.size)
            .finish_non_exhaustive()
    }
}

/// Equality is equality of the two maps' `(key, value)` multisets —
/// insertion order, internal trie shape, and the two maps' (possibly
/// distinct) hashers never factor in.
impl<K, V, P, S> PartialEq for PersistentMap<K, V, P, S>
where
    K: Hash + Eq,
    V: PartialEq,
    P: SharedPointerKind,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.iter().all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl<K, V, P, S> Eq for PersistentMap<K, V, P, S>
where
    K: Hash + Eq,
    V: Eq,
    P: SharedPointerKind,
    S: BuildHasher,
{
}

impl<K, V, P, S> Extend<(K, V)> for PersistentMap<K, V, P, S>
where
    K: Hash + Eq,
    V: PartialEq,
    P: SharedPointerKind,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert_mut(key, value);
        }
    }
}

impl<K, V, P, S> FromIterator<(K, V)> for PersistentMap<K, V, P, S>
where
    K: Hash + Eq,
    V: PartialEq,
    P: SharedPointerKind,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, P, S> ops::Index<&K> for PersistentMap<K, V, P, S>
where
    K: Hash + Eq,
    P: SharedPointerKind,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` isn't present.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, P: SharedPointerKind, S> IntoIterator for &'a PersistentMap<K, V, P, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    fn into_iter(self) -> Iter<'a, K, V, P> {
        self.iter()
    }
}
