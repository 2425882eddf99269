//! Structural invariants checked after every mutation, across a
//! deterministic mixed insert/delete sequence and several orders.

use std::collections::BTreeSet as StdBTreeSet;

use btreeset::backend::memory::MemoryStore;
use btreeset::BTreeSet;

fn ordering_and_set_equality_hold<S: btreeset::PageStore<i32>>(
    store: &S,
    set: &BTreeSet<i32>,
    model: &StdBTreeSet<i32>,
) {
    let keys = set.all_keys(store).unwrap();

    // Property 3: strictly ascending.
    assert!(keys.windows(2).all(|w| w[0] < w[1]));

    // Property 4: set equality with the model.
    let actual: StdBTreeSet<i32> = keys.into_iter().collect();
    assert_eq!(&actual, model);
}

#[test]
fn invariants_hold_across_a_mixed_sequence() {
    for &order in &[2usize, 3, 4] {
        let store = MemoryStore::new();
        let mut set = BTreeSet::new(order).unwrap();
        let mut model = StdBTreeSet::new();

        // A deliberately irregular schedule: runs of inserts, interleaved
        // deletes (including of already-absent keys), re-inserts.
        let ops: Vec<(bool, i32)> = (0..60)
            .map(|i| (true, i))
            .chain((0..60).step_by(3).map(|i| (false, i)))
            .chain((30..90).map(|i| (true, i)))
            .chain((0..90).step_by(2).map(|i| (false, i)))
            .collect();

        for (is_insert, key) in ops {
            if is_insert {
                set = set.insert(&store, key).unwrap();
                model.insert(key);
            } else {
                set = set.delete(&store, &key).unwrap();
                model.remove(&key);
            }

            set.check(&store).unwrap();
            ordering_and_set_equality_hold(&store, &set, &model);

            for probe in [key, key + 1000] {
                assert_eq!(set.member(&store, &probe).unwrap(), model.contains(&probe));
            }
        }
    }
}
