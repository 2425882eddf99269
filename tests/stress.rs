//! Randomised stress test: interleaved insert/delete/member against a model
//! set, checking invariants after every mutation, rather than
//! insert-everything-then-delete-everything.

use std::collections::BTreeSet as StdBTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use btreeset::backend::memory::MemoryStore;
use btreeset::BTreeSet;

#[test]
fn randomised_insert_delete_member_sequence() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = StdRng::seed_from_u64(0xB7EE_5E7);
    let store = MemoryStore::new();
    let mut set = BTreeSet::new(3).unwrap();
    let mut model: StdBTreeSet<i32> = StdBTreeSet::new();

    let universe: Vec<i32> = (0..500).collect();

    for _ in 0..4000 {
        let key = *universe.choose(&mut rng).unwrap();

        match rng.gen_range(0..3) {
            0 => {
                set = set.insert(&store, key).unwrap();
                model.insert(key);
            }
            1 => {
                set = set.delete(&store, &key).unwrap();
                model.remove(&key);
            }
            _ => {
                assert_eq!(set.member(&store, &key).unwrap(), model.contains(&key));
                continue;
            }
        }

        set.check(&store).unwrap();

        let keys = set.all_keys(&store).unwrap();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        let actual: StdBTreeSet<i32> = keys.into_iter().collect();
        assert_eq!(actual, model);
    }

    // Drain whatever remains, in shuffled order, verifying the tree empties
    // cleanly.
    let mut remaining: Vec<i32> = model.iter().copied().collect();
    remaining.shuffle(&mut rng);
    for key in remaining {
        set = set.delete(&store, &key).unwrap();
        model.remove(&key);
        set.check(&store).unwrap();
    }

    assert!(set.is_empty());
    assert_eq!(set.all_keys(&store).unwrap(), Vec::<i32>::new());
}
