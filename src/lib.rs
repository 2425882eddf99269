//! An on-disk B-tree set engine: an ordered collection of unique keys kept
//! in fixed-capacity pages reached through a client-supplied [`PageStore`].
//!
//! The crate implements the five classical operations — create, membership
//! test, in-order enumeration, insertion, deletion — while preserving the
//! B-tree balance invariants (every non-root page holds between `N` and
//! `2N` items, all leaves share one depth). Page storage, key/page-body
//! serialization, and concurrency control are the caller's concern; see
//! [`backend`] for two reference implementations used by this crate's own
//! tests.

pub mod backend;
mod cache;
mod debug;
mod delete;
mod enumerate;
mod error;
mod insert;
mod page;
mod search;

use std::fmt;
use std::marker::PhantomData;

pub use error::{Error, InvalidOrder};
pub use page::{mkio, CallbackStore, Item, Page, PageBody, PageId, PageStore};

use search::Search;

/// The tree's own record: its order and the id of its root page, or `None`
/// for an empty tree. Carries no `K` — only [`BTreeSet`] is generic over the
/// key type, via a zero-sized marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tree {
    pub order: usize,
    pub root: Option<PageId>,
}

/// An ordered set of unique `K` values, persisted as a B-tree of order `N`
/// reached through a [`PageStore<K>`].
///
/// `BTreeSet` is a small, `Copy`able value: the order and the current root
/// page id. Every mutating method (`insert`, `delete`) takes `&self` and
/// returns a *new* `BTreeSet` reflecting the updated root — it does not
/// mutate in place, since the root id itself can change (a split grows a
/// new root; a root-emptying merge shrinks one). Callers hold onto the
/// returned value the way they would a new root pointer after any
/// persistent-structure update.
pub struct BTreeSet<K> {
    tree: Tree,
    _marker: PhantomData<fn() -> K>,
}

impl<K> fmt::Debug for BTreeSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTreeSet")
            .field("order", &self.tree.order)
            .field("root", &self.tree.root)
            .finish()
    }
}

impl<K> Clone for BTreeSet<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for BTreeSet<K> {}

impl<K> BTreeSet<K> {
    /// Create an empty set of the given order. `order` must be at least 2.
    pub fn new(order: usize) -> Result<Self, InvalidOrder> {
        if order < 2 {
            return Err(InvalidOrder { requested: order });
        }
        Ok(BTreeSet {
            tree: Tree { order, root: None },
            _marker: PhantomData,
        })
    }

    /// The set's order `N`.
    pub fn order(&self) -> usize {
        self.tree.order
    }

    /// `true` if the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.root.is_none()
    }
}

impl<K: Ord> BTreeSet<K> {
    /// Test whether `key` is present.
    pub fn member<S: PageStore<K>>(&self, store: &S, key: &K) -> Result<bool, Error<S::Error>> {
        match search::search(store, self.tree.root, key)? {
            Search::Found { .. } => Ok(true),
            Search::NotFound { .. } => Ok(false),
        }
    }
}

impl<K: Ord + Clone> BTreeSet<K> {
    /// All keys, in ascending order.
    pub fn all_keys<S: PageStore<K>>(&self, store: &S) -> Result<Vec<K>, Error<S::Error>> {
        let mut out = Vec::new();
        enumerate::collect_keys(store, self.tree.root, &mut out)?;
        Ok(out)
    }

    /// Insert `key`, returning the updated set. A duplicate key is a no-op.
    pub fn insert<S: PageStore<K>>(&self, store: &S, key: K) -> Result<Self, Error<S::Error>> {
        let tree = insert::insert(store, &self.tree, key)?;
        Ok(BTreeSet {
            tree,
            _marker: PhantomData,
        })
    }

    /// Delete `key`, returning the updated set. Deleting an absent key is a
    /// no-op.
    pub fn delete<S: PageStore<K>>(&self, store: &S, key: &K) -> Result<Self, Error<S::Error>> {
        let tree = delete::delete(store, &self.tree, key)?;
        Ok(BTreeSet {
            tree,
            _marker: PhantomData,
        })
    }

    /// Validate the tree's structural invariants, returning
    /// [`Error::InvariantViolation`] on the first one found.
    pub fn check<S: PageStore<K>>(&self, store: &S) -> Result<(), Error<S::Error>> {
        debug::check(store, &self.tree)
    }
}

impl<K: Ord + Clone + fmt::Debug> BTreeSet<K> {
    /// Render the tree for human inspection, one page per line.
    pub fn print<S: PageStore<K>>(&self, store: &S) -> Result<String, Error<S::Error>> {
        debug::print(store, &self.tree)
    }
}
