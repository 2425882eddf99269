//! A manual, `harness = false` benchmark (`SystemTime`-based timing, no
//! `criterion` dependency), exercising insert/member/delete against the
//! in-memory backend.

use std::time::SystemTime;

use btreeset::backend::memory::MemoryStore;
use btreeset::BTreeSet;

const ELEMENTS: usize = 100_000;
const ORDER: usize = 32;

fn bench_insert() -> (MemoryStore<u64>, BTreeSet<u64>) {
    let store = MemoryStore::new();
    let mut set = BTreeSet::new(ORDER).unwrap();

    let start = SystemTime::now();
    for i in 0..ELEMENTS as u64 {
        set = set.insert(&store, i).unwrap();
    }
    let elapsed = start.elapsed().unwrap();
    println!(
        "insert: {ELEMENTS} keys in {elapsed:?} ({:?}/op)",
        elapsed / ELEMENTS as u32
    );

    (store, set)
}

fn bench_member(store: &MemoryStore<u64>, set: &BTreeSet<u64>) {
    let start = SystemTime::now();
    for i in 0..ELEMENTS as u64 {
        assert!(set.member(store, &i).unwrap());
    }
    let elapsed = start.elapsed().unwrap();
    println!(
        "member: {ELEMENTS} lookups in {elapsed:?} ({:?}/op)",
        elapsed / ELEMENTS as u32
    );
}

fn bench_delete(store: &MemoryStore<u64>, mut set: BTreeSet<u64>) {
    let start = SystemTime::now();
    for i in 0..ELEMENTS as u64 {
        set = set.delete(store, &i).unwrap();
    }
    let elapsed = start.elapsed().unwrap();
    println!(
        "delete: {ELEMENTS} keys in {elapsed:?} ({:?}/op)",
        elapsed / ELEMENTS as u32
    );
    assert!(set.is_empty());
}

fn main() {
    let (store, set) = bench_insert();
    bench_member(&store, &set);
    bench_delete(&store, set);
}
