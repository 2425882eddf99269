//! Binary search within a page and root-to-leaf tree search.

use crate::error::Error;
use crate::page::{read_page, Item, Page, PageId, PageStore};

/// Result of a binary search over one page's item vector.
pub(crate) enum BinSearch {
    /// `items[idx].k == x`.
    Found(usize),
    /// No item matches; `r` is the number of items whose key is `< x`, i.e.
    /// the slot to descend through (`p0` if `r == 0`, else `items[r-1].p`).
    NotFound(usize),
}

/// Classic half-open binary search, `O(log m)` comparisons.
pub(crate) fn binary_search_page<K: Ord>(items: &[Item<K>], x: &K) -> BinSearch {
    match items.binary_search_by(|item| item.k.cmp(x)) {
        Ok(idx) => BinSearch::Found(idx),
        Err(pos) => BinSearch::NotFound(pos),
    }
}

/// One step of a descent path: the page visited and the child slot taken
/// (0-based; 0 means `p0`).
pub(crate) struct PathStep<K> {
    pub page: Page<K>,
    pub slot: usize,
}

/// Outcome of a root-to-leaf [`search`].
pub(crate) enum Search<K> {
    Found {
        page: Page<K>,
        index: usize,
        /// Root-last: the deepest visited ancestor is at index 0.
        path: Vec<PathStep<K>>,
    },
    NotFound {
        /// Root-last, including the leaf where the miss was detected.
        path: Vec<PathStep<K>>,
    },
}

/// Descend from `root`, binary-searching each page along the way.
pub(crate) fn search<K, S>(
    store: &S,
    root: Option<PageId>,
    x: &K,
) -> Result<Search<K>, Error<S::Error>>
where
    K: Ord,
    S: PageStore<K>,
{
    let mut path = Vec::new();

    let mut current = match root {
        None => return Ok(Search::NotFound { path }),
        Some(id) => read_page(store, id)?,
    };

    loop {
        match binary_search_page(&current.body.items, x) {
            BinSearch::Found(index) => {
                path.reverse();
                return Ok(Search::Found {
                    page: current,
                    index,
                    path,
                });
            }
            BinSearch::NotFound(r) => match current.body.child(r) {
                None => {
                    path.push(PathStep { page: current, slot: r });
                    path.reverse();
                    return Ok(Search::NotFound { path });
                }
                Some(child_id) => {
                    let child = read_page(store, child_id)?;
                    path.push(PathStep { page: current, slot: r });
                    current = child;
                }
            },
        }
    }
}
