//! The on-disk data model and the page I/O adapter that hides storage from
//! the tree core.

use crate::error::Error;

/// An opaque, backend-assigned page identifier.
///
/// `NONE` is represented as `Option<PageId>` rather than a distinguished
/// sentinel value: it keeps the sentinel cleanly distinguishable in memory
/// while still letting a backend choose an arbitrarily small on-disk
/// encoding for the `None` case.
pub type PageId = u32;

/// One `(key, right-subtree)` pair within a page.
///
/// `p` is the subtree containing keys strictly greater than `k` and strictly
/// less than the next item's key (or strictly greater than `k` if this is
/// the page's last item).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item<K> {
    pub k: K,
    pub p: Option<PageId>,
}

impl<K> Item<K> {
    pub fn new(k: K, p: Option<PageId>) -> Self {
        Item { k, p }
    }
}

/// A page body: the leftmost subtree pointer plus the ordered item vector.
///
/// Either `p0` and every `items[i].p` are `None` (the page is a *leaf*), or
/// all of them are `Some` (the page is *internal*) — mixed is forbidden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageBody<K> {
    pub p0: Option<PageId>,
    pub items: Vec<Item<K>>,
}

impl<K> PageBody<K> {
    pub fn empty_leaf() -> Self {
        PageBody {
            p0: None,
            items: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.p0.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The child reached by descending through slot `r` (0-based): `p0` if
    /// `r == 0`, else `items[r - 1].p`.
    pub fn child(&self, r: usize) -> Option<PageId> {
        if r == 0 {
            self.p0
        } else {
            self.items[r - 1].p
        }
    }
}

/// A fully-identified page: its id plus its body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<K> {
    pub id: PageId,
    pub body: PageBody<K>,
}

impl<K> Page<K> {
    pub fn new(id: PageId, body: PageBody<K>) -> Self {
        Page { id, body }
    }
}

/// The page I/O adapter: a four-operation callback bundle hiding storage
/// completely from the tree core.
///
/// The handle *is* `self`, and an implementor uses interior mutability (as
/// [`crate::backend::memory::MemoryStore`] and
/// [`crate::backend::mmap::MmapStore`] both do) to mutate backing state via
/// `allocate`/`write`/`delete` despite being passed by shared reference.
pub trait PageStore<K> {
    type Error;

    /// Fetch a page's body by id.
    fn read(&self, id: PageId) -> Result<PageBody<K>, Self::Error>;

    /// Install a page body at `id`. Must be idempotent.
    fn write(&self, id: PageId, body: &PageBody<K>) -> Result<(), Self::Error>;

    /// Return a fresh id. The page body is uninitialised until the first
    /// `write` to that id.
    fn allocate(&self) -> Result<PageId, Self::Error>;

    /// Release `id`. A further `read` of it is undefined, and the tree core
    /// never attempts one.
    fn delete(&self, id: PageId) -> Result<(), Self::Error>;
}

/// Reads a page straight from the backend, wrapping its error in [`Error`].
pub(crate) fn read_page<K, S: PageStore<K>>(
    store: &S,
    id: PageId,
) -> Result<Page<K>, Error<S::Error>> {
    let body = store.read(id).map_err(Error::Backend)?;
    Ok(Page::new(id, body))
}

/// A `PageStore` built from four plain functions plus a handle value.
///
/// Prefer implementing [`PageStore`] directly for a type with genuine
/// internal state; reach for `CallbackStore` when wiring up something that
/// is naturally a handle plus four free functions (e.g. bridging into a
/// foreign-function or scripting boundary).
pub struct CallbackStore<H, K, E> {
    handle: H,
    read: fn(&H, PageId) -> Result<PageBody<K>, E>,
    write: fn(&H, PageId, &PageBody<K>) -> Result<(), E>,
    allocate: fn(&H) -> Result<PageId, E>,
    delete: fn(&H, PageId) -> Result<(), E>,
}

impl<H, K, E> CallbackStore<H, K, E> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        handle: H,
        read: fn(&H, PageId) -> Result<PageBody<K>, E>,
        write: fn(&H, PageId, &PageBody<K>) -> Result<(), E>,
        allocate: fn(&H) -> Result<PageId, E>,
        delete: fn(&H, PageId) -> Result<(), E>,
    ) -> Self {
        CallbackStore {
            handle,
            read,
            write,
            allocate,
            delete,
        }
    }
}

/// Builds a [`CallbackStore`] as a free function, for callers who would
/// rather not name the type.
#[allow(clippy::too_many_arguments)]
pub fn mkio<H, K, E>(
    handle: H,
    read: fn(&H, PageId) -> Result<PageBody<K>, E>,
    write: fn(&H, PageId, &PageBody<K>) -> Result<(), E>,
    allocate: fn(&H) -> Result<PageId, E>,
    delete: fn(&H, PageId) -> Result<(), E>,
) -> CallbackStore<H, K, E> {
    CallbackStore::new(handle, read, write, allocate, delete)
}

impl<H, K, E> PageStore<K> for CallbackStore<H, K, E> {
    type Error = E;

    fn read(&self, id: PageId) -> Result<PageBody<K>, E> {
        (self.read)(&self.handle, id)
    }

    fn write(&self, id: PageId, body: &PageBody<K>) -> Result<(), E> {
        (self.write)(&self.handle, id, body)
    }

    fn allocate(&self) -> Result<PageId, E> {
        (self.allocate)(&self.handle)
    }

    fn delete(&self, id: PageId) -> Result<(), E> {
        (self.delete)(&self.handle, id)
    }
}
