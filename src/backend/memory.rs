//! An in-memory `PageStore`, for tests and property checks that have no
//! business touching a filesystem.

use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;

use crate::page::{PageBody, PageId, PageStore};

/// Backed by a `HashMap<PageId, PageBody<K>>` behind a `RefCell`, with no
/// byte-level encoding: the body is stored as-is.
pub struct MemoryStore<K> {
    pages: RefCell<HashMap<PageId, PageBody<K>>>,
    next_id: RefCell<PageId>,
}

impl<K> MemoryStore<K> {
    pub fn new() -> Self {
        MemoryStore {
            pages: RefCell::new(HashMap::new()),
            next_id: RefCell::new(1),
        }
    }
}

impl<K> Default for MemoryStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> PageStore<K> for MemoryStore<K> {
    type Error = Infallible;

    fn read(&self, id: PageId) -> Result<PageBody<K>, Infallible> {
        Ok(self
            .pages
            .borrow()
            .get(&id)
            .unwrap_or_else(|| panic!("MemoryStore: read of unallocated page {id}"))
            .clone())
    }

    fn write(&self, id: PageId, body: &PageBody<K>) -> Result<(), Infallible> {
        self.pages.borrow_mut().insert(id, body.clone());
        Ok(())
    }

    fn allocate(&self) -> Result<PageId, Infallible> {
        let mut next = self.next_id.borrow_mut();
        let id = *next;
        *next += 1;
        Ok(id)
    }

    fn delete(&self, id: PageId) -> Result<(), Infallible> {
        self.pages.borrow_mut().remove(&id);
        Ok(())
    }
}
