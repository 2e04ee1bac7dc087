//! Multi-threaded persistent map — a type alias over [`PersistentMap`].

use std::collections::hash_map::RandomState;

use archery::ArcK;

use crate::map::PersistentMap;

/// A [`PersistentMap`] backed by [`archery::ArcK`] shared pointers.
///
/// Identical API and semantics to [`PersistentMap`], but `Send + Sync`
/// whenever `K` and `V` are, so a single map value can be shared across
/// threads — each thread holding a clone sees its own unaffected snapshot
/// (spec's concurrency model: immutability, not locking, is what makes this
/// safe).
pub type PersistentMapSync<K, V, S = RandomState> = PersistentMap<K, V, ArcK, S>;
