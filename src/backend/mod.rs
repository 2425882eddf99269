//! Reference `PageStore` implementations. The adapter contract is
//! storage-agnostic; these exist so it is exercised end-to-end in tests and
//! benches rather than only type-checked.

pub mod memory;
pub mod mmap;
