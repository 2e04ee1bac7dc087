//! Black-box checks of the map's core algebraic properties.

use crate::{PersistentMap, phamt_map};

/// Inserting the same binding twice is idempotent: the second insert
/// changes nothing observable.
#[test]
fn insert_is_idempotent() {
    let once = PersistentMap::new().insert("a", 1).insert("b", 2);
    let twice = once.insert("a", 1).insert("a", 1);
    assert_eq!(once, twice);
}

/// Removing an already-absent key is idempotent.
#[test]
fn remove_is_idempotent() {
    let map = PersistentMap::new().insert("a", 1);
    let once = map.remove(&"z");
    let twice = once.remove(&"z").remove(&"z");
    assert_eq!(once, twice);
}

/// `len()` always agrees with the number of entries `iter()` yields.
#[test]
fn len_matches_iter_count() {
    let mut map = PersistentMap::new();
    for i in 0_u64..200 {
        map = map.insert(i, i);
        assert_eq!(map.len(), map.iter().count());
    }
    for i in 0_u64..200 {
        map = map.remove(&i);
        assert_eq!(map.len(), map.iter().count());
    }
}

/// Every entry `iter()` yields is independently retrievable through
/// `get()`, and every key `get()` answers is among those `iter()` yields.
#[test]
fn iter_and_get_agree() {
    let map: PersistentMap<i32, i32> = (0..64).map(|i| (i, i * i)).collect();

    for (k, v) in map.iter() {
        assert_eq!(map.get(k), Some(v));
    }
    for i in 0..64 {
        assert!(map.iter().any(|(k, _)| *k == i));
    }
}

/// A map built through the convenience macro matches one built by
/// repeated `insert`.
#[test]
fn macro_matches_manual_build() {
    let via_macro = phamt_map![1 => "one", 2 => "two", 3 => "three"];
    let via_insert = PersistentMap::new().insert(1, "one").insert(2, "two").insert(3, "three");

    assert_eq!(via_macro, via_insert);
}

/// Equality is insensitive to the path taken to reach a given content
/// set, including via a mix of persistent and in-place operations.
#[test]
fn persistent_and_mut_apis_agree() {
    let persistent = PersistentMap::new().insert(1, 10).insert(2, 20).remove(&1).insert(1, 11);

    let mut via_mut = PersistentMap::new();
    via_mut.insert_mut(1, 10);
    via_mut.insert_mut(2, 20);
    via_mut.remove_mut(&1);
    via_mut.insert_mut(1, 11);

    assert_eq!(persistent, via_mut);
}

/// `PartialEq` doesn't require the two maps to have grown through the
/// same number of operations — only the same final content.
#[test]
fn equality_is_content_only() {
    let short_path: PersistentMap<i32, i32> = (0..30).map(|i| (i, i)).collect();

    let mut long_path = PersistentMap::new();
    for i in 0..30 {
        long_path = long_path.insert(i, -1).insert(i, i);
    }

    assert_eq!(short_path, long_path);
}
