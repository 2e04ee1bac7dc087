//! A persistent (immutable, structurally shared) hash map based on a hash
//! array mapped trie (HAMT).
//!
//! Every insert or remove returns a new map; the map it was called on stays
//! valid and keeps observing its own snapshot of the data. Two maps that
//! share history share the subtrees neither of them touched, so producing a
//! new version costs space and time proportional to the trie's depth, not
//! its size.
//!
//! # Key properties
//!
//! - **Structural sharing**: edits path-copy from the changed leaf to the
//!   root; everything else is shared by reference with prior versions.
//! - **Identity-preserving no-ops**: re-inserting an existing `(key, value)`
//!   pair, or removing an absent key, returns a map backed by the same root
//!   pointer — no allocation, no rebuild.
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`.
//!
//! # References
//!
//! - Bagwell, 2001 — "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod iter;
pub mod node;
pub mod ops;

mod map;
mod map_sync;

#[cfg(test)]
mod tests;

pub use map::PersistentMap;
pub use map_sync::PersistentMapSync;

/// Creates a [`PersistentMap`] containing the given key-value pairs:
///
/// ```
/// # use phamt::{phamt_map, PersistentMap};
/// let m: PersistentMap<i32, &str> = phamt_map![1 => "one", 2 => "two"];
/// assert_eq!(m.get(&1), Some(&"one"));
/// ```
#[macro_export]
macro_rules! phamt_map {
    ($($k:expr => $v:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut m = $crate::PersistentMap::new();
        $(
            m.insert_mut($k, $v);
        )*
        m
    }};
}

/// Creates a [`PersistentMapSync`] containing the given key-value pairs:
///
/// ```
/// # use phamt::{phamt_map_sync, PersistentMapSync};
/// let m: PersistentMapSync<i32, &str> = phamt_map_sync![1 => "one", 2 => "two"];
/// assert_eq!(m.get(&1), Some(&"one"));
/// ```
#[macro_export]
macro_rules! phamt_map_sync {
    ($($k:expr => $v:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut m = $crate::PersistentMapSync::new();
        $(
            m.insert_mut($k, $v);
        )*
        m
    }};
}
