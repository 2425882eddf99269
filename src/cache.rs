//! The delete-scoped write-back page cache.
//!
//! A one-shot buffer living for the span of a single `delete` call. Multiple
//! underflow/borrow/merge steps can revisit the same page (particularly
//! during splice and sibling rebalancing), so every read/write/delete during
//! one `delete` is routed through here instead of straight to the backend.

use log::trace;

use crate::error::Error;
use crate::page::{PageBody, PageId, PageStore};

/// One cache slot: a page is either untouched since it was read (`Clean`),
/// modified and pending write-back (`Dirty`), or released (`Deleted`).
enum Entry<K> {
    Clean(PageBody<K>),
    Dirty(PageBody<K>),
    Deleted,
}

/// A small association list is adequate here: the working set per `delete`
/// is `O(depth)`, and trees are shallow.
pub(crate) struct Cache<'a, K, S> {
    store: &'a S,
    entries: Vec<(PageId, Entry<K>)>,
}

impl<'a, K, S> Cache<'a, K, S>
where
    K: Clone,
    S: PageStore<K>,
{
    pub fn new(store: &'a S) -> Self {
        Cache {
            store,
            entries: Vec::new(),
        }
    }

    fn position(&self, id: PageId) -> Option<usize> {
        self.entries.iter().position(|(pid, _)| *pid == id)
    }

    /// Fetch a page's body, going to the backend only on first touch.
    ///
    /// Reading a page this cache has already deleted is a programming
    /// error: the delete algorithm never legitimately attempts it, so this
    /// is treated as a fatal, panic-class failure rather than a recoverable
    /// `Error`.
    pub fn read(&mut self, id: PageId) -> Result<PageBody<K>, Error<S::Error>> {
        if let Some(idx) = self.position(id) {
            return match &self.entries[idx].1 {
                Entry::Clean(body) | Entry::Dirty(body) => Ok(body.clone()),
                Entry::Deleted => {
                    panic!("page cache: read of page {id} already deleted in this operation")
                }
            };
        }

        let body = self.store.read(id).map_err(Error::Backend)?;
        self.entries.push((id, Entry::Clean(body.clone())));
        Ok(body)
    }

    /// Upsert `Dirty(body)` for `id`.
    pub fn write(&mut self, id: PageId, body: PageBody<K>) {
        match self.position(id) {
            Some(idx) => self.entries[idx].1 = Entry::Dirty(body),
            None => self.entries.push((id, Entry::Dirty(body))),
        }
    }

    /// Upsert `Deleted` for `id`.
    pub fn delete(&mut self, id: PageId) {
        match self.position(id) {
            Some(idx) => self.entries[idx].1 = Entry::Deleted,
            None => self.entries.push((id, Entry::Deleted)),
        }
    }

    /// Apply every buffered change to the backend. All dirtied pages are
    /// written before any page is deleted, so a backend that parallelises
    /// the flush can still rely on that ordering.
    pub fn flush(self) -> Result<(), Error<S::Error>> {
        trace!("page cache: flushing {} entries", self.entries.len());
        for (id, entry) in &self.entries {
            if let Entry::Dirty(body) = entry {
                self.store.write(*id, body).map_err(Error::Backend)?;
            }
        }
        for (id, entry) in &self.entries {
            if let Entry::Deleted = entry {
                self.store.delete(*id).map_err(Error::Backend)?;
            }
        }
        Ok(())
    }
}
