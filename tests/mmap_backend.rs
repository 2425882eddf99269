//! Exercises the `memmap2`-backed demonstration store end-to-end against a
//! real file, opened via `tempfile::NamedTempFile`.

use tempfile::NamedTempFile;

use btreeset::backend::mmap::MmapStore;
use btreeset::BTreeSet;

#[test]
fn insert_member_delete_over_a_real_file() {
    let file = NamedTempFile::new().unwrap();
    let store = MmapStore::create(file.path(), 512).unwrap();

    let mut set = BTreeSet::<u64>::new(4).unwrap();
    for key in 0..200u64 {
        set = set.insert(&store, key).unwrap();
    }

    set.check(&store).unwrap();
    for key in 0..200u64 {
        assert!(set.member(&store, &key).unwrap());
    }

    for key in (0..200u64).step_by(2) {
        set = set.delete(&store, &key).unwrap();
    }
    set.check(&store).unwrap();

    for key in 0..200u64 {
        assert_eq!(set.member(&store, &key).unwrap(), key % 2 == 1);
    }

    let expected: Vec<u64> = (0..200u64).filter(|k| k % 2 == 1).collect();
    assert_eq!(set.all_keys(&store).unwrap(), expected);
}
