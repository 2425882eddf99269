//! In-order enumeration. Side-effect free.

use crate::error::Error;
use crate::page::{read_page, PageId, PageStore};

/// Collect every key in the subtree rooted at `root`, in ascending order,
/// appending to `out`.
pub(crate) fn collect_keys<K, S>(
    store: &S,
    root: Option<PageId>,
    out: &mut Vec<K>,
) -> Result<(), Error<S::Error>>
where
    K: Ord + Clone,
    S: PageStore<K>,
{
    let Some(id) = root else {
        return Ok(());
    };

    let page = read_page(store, id)?;

    collect_keys(store, page.body.p0, out)?;
    for item in &page.body.items {
        out.push(item.k.clone());
        collect_keys(store, item.p, out)?;
    }

    Ok(())
}
