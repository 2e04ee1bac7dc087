//! Insertion order must not affect the map's observable contents:
//! two maps built from the same set of bindings, in any order, compare
//! equal — even though `remove`'s contraction rule means the two tries
//! need not be byte-for-byte identical in shape.

use crate::PersistentMap;

#[test]
fn insert_order_abc_cba_bca() {
    let orders: [&[(i32, i32)]; 3] = [
        &[(1, 10), (2, 20), (3, 30)],
        &[(3, 30), (2, 20), (1, 10)],
        &[(2, 20), (3, 30), (1, 10)],
    ];

    let maps: Vec<PersistentMap<i32, i32>> = orders
        .iter()
        .map(|pairs| {
            let mut m = PersistentMap::new();
            for &(k, v) in *pairs {
                m = m.insert(k, v);
            }
            m
        })
        .collect();

    assert_eq!(maps[0], maps[1]);
    assert_eq!(maps[1], maps[2]);
}

#[test]
fn insert_order_100_entries() {
    let entries: Vec<(u64, u64)> = (0..100).map(|i| (i, i * 7)).collect();

    let mut forward = PersistentMap::new();
    for &(k, v) in &entries {
        forward = forward.insert(k, v);
    }

    let mut backward = PersistentMap::new();
    for &(k, v) in entries.iter().rev() {
        backward = backward.insert(k, v);
    }

    let mut interleaved = PersistentMap::new();
    for &(k, v) in entries.iter().step_by(2) {
        interleaved = interleaved.insert(k, v);
    }
    for &(k, v) in entries.iter().skip(1).step_by(2) {
        interleaved = interleaved.insert(k, v);
    }

    assert_eq!(forward, backward);
    assert_eq!(forward, interleaved);
    assert_eq!(forward.len(), 100);
}

#[test]
fn overwrite_order_does_not_matter() {
    let map_a = PersistentMap::new().insert(1, 10).insert(2, 20).insert(1, 11);
    let map_b = PersistentMap::new().insert(2, 20).insert(1, 11);

    assert_eq!(map_a, map_b);
}

#[test]
fn delete_then_rebuild_matches_direct_build() {
    let map_a = PersistentMap::new().insert(1, 10).insert(2, 20).insert(3, 30).remove(&2);
    let map_b = PersistentMap::new().insert(3, 30).insert(1, 10);

    assert_eq!(map_a, map_b);
}

#[test]
fn unequal_maps_compare_unequal() {
    let map_a = PersistentMap::new().insert(1, 10).insert(2, 20);
    let map_b = PersistentMap::new().insert(1, 10).insert(2, 21);
    let map_c = PersistentMap::new().insert(1, 10);

    assert_ne!(map_a, map_b);
    assert_ne!(map_a, map_c);
}
