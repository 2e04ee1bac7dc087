//! Persistence tests: every prior version of the map stays valid and
//! unaffected by edits made against a later version built from it.

use crate::PersistentMap;

/// Inserting into one version never perturbs an earlier version built
/// from the same history.
#[test]
fn old_version_survives_new_insert() {
    let v0 = PersistentMap::new().insert(1, "a").insert(2, "b");
    let v1 = v0.insert(3, "c");

    assert_eq!(v0.len(), 2);
    assert_eq!(v0.get(&3), None);

    assert_eq!(v1.len(), 3);
    assert_eq!(v1.get(&3), Some(&"c"));

    // v0's own entries are untouched by the existence of v1.
    assert_eq!(v0.get(&1), Some(&"a"));
    assert_eq!(v0.get(&2), Some(&"b"));
}

/// Removing from one version never perturbs an earlier version.
#[test]
fn old_version_survives_new_remove() {
    let v0 = PersistentMap::new().insert(1, "a").insert(2, "b").insert(3, "c");
    let v1 = v0.remove(&2);

    assert_eq!(v0.len(), 3);
    assert_eq!(v0.get(&2), Some(&"b"));

    assert_eq!(v1.len(), 2);
    assert_eq!(v1.get(&2), None);
}

/// A branching history: two maps derived from the same ancestor, each
/// edited differently, stay mutually independent.
#[test]
fn branching_history_stays_independent() {
    let base = PersistentMap::new().insert(1, 1).insert(2, 2).insert(3, 3);

    let branch_a = base.insert(4, 4);
    let branch_b = base.remove(&1);

    assert_eq!(base.len(), 3);
    assert_eq!(branch_a.len(), 4);
    assert_eq!(branch_b.len(), 2);

    assert_eq!(branch_a.get(&1), Some(&1));
    assert_eq!(branch_b.get(&1), None);
    assert_eq!(base.get(&4), None);
}

/// Re-inserting an identical `(key, value)` pair is a no-op: the
/// resulting map is observably identical to the one it was called on.
#[test]
fn reinserting_identical_binding_is_a_no_op() {
    let map = PersistentMap::new().insert("k", 1).insert("other", 2);
    let same = map.insert("k", 1);

    assert_eq!(same, map);
    assert_eq!(same.len(), map.len());
}

/// Removing an absent key is a no-op: the resulting map equals the one it
/// was called on.
#[test]
fn removing_absent_key_is_a_no_op() {
    let map = PersistentMap::new().insert("k", 1);
    let same = map.remove(&"missing");

    assert_eq!(same, map);
}

/// Many generations chained together: every ancestor remains queryable.
#[test]
fn long_history_keeps_every_generation_valid() {
    let mut generations = vec![PersistentMap::new()];
    for i in 0_u64..50 {
        let next = generations.last().unwrap().insert(i, i);
        generations.push(next);
    }

    for (i, gen) in generations.iter().enumerate() {
        assert_eq!(gen.len(), i);
        for k in 0..i as u64 {
            assert_eq!(gen.get(&k), Some(&k));
        }
    }
}
