use std::fmt;

/// Errors raised by the tree core.
///
/// `E` is the error type a [`crate::page::PageStore`] implementation raises
/// from its own `read`/`write`/`allocate`/`delete` callbacks; the core never
/// constructs a `Backend` variant itself, it only wraps whatever the backend
/// reports.
#[derive(Debug)]
pub enum Error<E> {
    /// `BTreeSet::new` was called with an order less than 2.
    InvalidOrder { requested: usize },
    /// A page I/O callback reported failure. The tree is potentially
    /// inconsistent and should be discarded unless the backend itself
    /// guarantees transactional semantics.
    Backend(E),
    /// A page read back from the backend violates a structural invariant:
    /// mixed leaf/internal children, or unsorted keys. A storage-corruption
    /// error, not recoverable at runtime.
    ///
    /// (A delete-scoped cache read of an already-deleted page is a related
    /// but stricter violation — the tree core never legitimately attempts
    /// one — and is raised as a panic rather than through this variant; see
    /// [`crate::cache::Cache::read`].)
    InvariantViolation(String),
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOrder { requested } => {
                write!(f, "invalid order {requested}: order must be >= 2")
            }
            Error::Backend(e) => write!(f, "page store error: {e}"),
            Error::InvariantViolation(msg) => write!(f, "B-tree invariant violated: {msg}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for Error<E> {}

/// Raised directly by [`crate::BTreeSet::new`] when the requested order is
/// less than 2. Kept separate from `Error<E>` because order validation never
/// touches a backend, so it has no `E` to be generic over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOrder {
    pub requested: usize,
}

impl fmt::Display for InvalidOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid order {}: order must be >= 2", self.requested)
    }
}

impl std::error::Error for InvalidOrder {}

impl<E> From<InvalidOrder> for Error<E> {
    fn from(e: InvalidOrder) -> Self {
        Error::InvalidOrder {
            requested: e.requested,
        }
    }
}
