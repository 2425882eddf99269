//! Algebraic laws over insert/delete/member: idempotence and round-tripping.

use std::collections::BTreeSet as StdBTreeSet;

use btreeset::backend::memory::MemoryStore;
use btreeset::BTreeSet;

fn build(order: usize, keys: &[i32]) -> (MemoryStore<i32>, BTreeSet<i32>) {
    let store = MemoryStore::new();
    let mut set = BTreeSet::new(order).unwrap();
    for &k in keys {
        set = set.insert(&store, k).unwrap();
    }
    (store, set)
}

#[test]
fn insert_idempotence() {
    let (store, set) = build(2, &[5, 1, 9, 3, 7, 2, 8]);

    let once = set.insert(&store, 42).unwrap();
    let twice = once.insert(&store, 42).unwrap();

    assert_eq!(
        once.all_keys(&store).unwrap(),
        twice.all_keys(&store).unwrap()
    );
    twice.check(&store).unwrap();
}

#[test]
fn delete_idempotence() {
    let (store, set) = build(2, &[5, 1, 9, 3, 7, 2, 8]);

    let once = set.delete(&store, &7).unwrap();
    let twice = once.delete(&store, &7).unwrap();

    assert_eq!(
        once.all_keys(&store).unwrap(),
        twice.all_keys(&store).unwrap()
    );
    twice.check(&store).unwrap();
}

#[test]
fn insert_delete_round_trip() {
    let (store, set) = build(2, &[5, 1, 9, 3, 7, 2, 8]);
    let before = set.all_keys(&store).unwrap();

    assert!(!set.member(&store, &100).unwrap());

    let inserted = set.insert(&store, 100).unwrap();
    let round_tripped = inserted.delete(&store, &100).unwrap();

    assert_eq!(round_tripped.all_keys(&store).unwrap(), before);
    round_tripped.check(&store).unwrap();
}

#[test]
fn membership_agreement() {
    let keys = [5, 1, 9, 3, 7, 2, 8];
    let (store, set) = build(2, &keys);
    let model: StdBTreeSet<i32> = keys.iter().copied().collect();

    for x in -5..15 {
        assert_eq!(set.member(&store, &x).unwrap(), model.contains(&x));
    }
}
