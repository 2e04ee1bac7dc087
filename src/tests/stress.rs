use crate::PersistentMap;

/// 1000 entries: insert all, verify all, remove all.
#[test]
fn thousand_entries() {
    let mut map = PersistentMap::new();
    for i in 0_u64..1000 {
        map = map.insert(i, i * 3);
    }
    assert_eq!(map.len(), 1000);

    for i in 0_u64..1000 {
        assert_eq!(map.get(&i), Some(&(i * 3)), "missing key {i}");
    }

    for i in 0_u64..1000 {
        map = map.remove(&i);
    }
    assert!(map.is_empty());
}

/// Deep trie: keys with shared hash prefixes force deeper nodes.
#[test]
fn deep_shared_prefixes() {
    let mut map = PersistentMap::new();
    for i in 0_u64..500 {
        map = map.insert(i, i);
    }
    assert_eq!(map.len(), 500);
    for i in 0_u64..500 {
        assert_eq!(map.get(&i), Some(&i));
    }
}

/// Insert + overwrite + remove interleaved.
#[test]
fn interleaved_operations() {
    let mut map = PersistentMap::new();
    for i in 0_u64..200 {
        map = map.insert(i, i);
    }
    for i in (0_u64..200).step_by(2) {
        map = map.insert(i, i + 1000);
    }
    for i in (1_u64..200).step_by(2) {
        map = map.remove(&i);
    }
    assert_eq!(map.len(), 100);
    for i in (0_u64..200).step_by(2) {
        assert_eq!(map.get(&i), Some(&(i + 1000)));
    }
}

/// Removing every entry in a different order than insertion still empties
/// the map completely.
#[test]
fn remove_reverse_order() {
    let mut map = PersistentMap::new();
    for i in 0_u64..300 {
        map = map.insert(i, i);
    }
    for i in (0_u64..300).rev() {
        map = map.remove(&i);
    }
    assert!(map.is_empty());
}
