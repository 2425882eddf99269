//! Insertion with bottom-up split propagation.

use log::{debug, trace};

use crate::error::Error;
use crate::page::{Item, PageBody, PageId, PageStore};
use crate::search::{search, PathStep, Search};
use crate::Tree;

/// Insert `key` into `tree`, returning the (possibly unchanged) new tree
/// value. A duplicate key is a no-op, per set semantics.
pub(crate) fn insert<K, S>(store: &S, tree: &Tree, key: K) -> Result<Tree, Error<S::Error>>
where
    K: Ord + Clone,
    S: PageStore<K>,
{
    let path = match search(store, tree.root, &key)? {
        Search::Found { .. } => {
            trace!("insert: key already present, no-op");
            return Ok(*tree);
        }
        Search::NotFound { path } => path,
    };

    let n = tree.order;
    let mut bubble = Item::new(key, None);

    for PathStep { page, slot } in path {
        let page_id = page.id;
        let PageBody { p0, mut items } = page.body;

        if items.len() < 2 * n {
            items.insert(slot, bubble);
            store
                .write(page_id, &PageBody { p0, items })
                .map_err(Error::Backend)?;
            return Ok(*tree);
        }

        let new_id = store.allocate().map_err(Error::Backend)?;
        let (next_bubble, left_body, right_body) = split(p0, items, bubble, slot, n, new_id);
        trace!("insert: split page {page_id} into {page_id} and {new_id}");
        store
            .write(page_id, &left_body)
            .map_err(Error::Backend)?;
        store.write(new_id, &right_body).map_err(Error::Backend)?;
        bubble = next_bubble;
    }

    let new_root_id = store.allocate().map_err(Error::Backend)?;
    store
        .write(
            new_root_id,
            &PageBody {
                p0: tree.root,
                items: vec![bubble],
            },
        )
        .map_err(Error::Backend)?;
    debug!("insert: tree grew a new root at page {new_root_id}");

    Ok(Tree {
        order: tree.order,
        root: Some(new_root_id),
    })
}

/// Split a full page (`2N` items) around the incoming item `u` at insert
/// slot `r`, producing the item that bubbles up to the parent plus the two
/// resulting page bodies (the split-off right half gets `new_right_id`; the
/// left half keeps the original page id and is written back by the caller).
fn split<K>(
    p0: Option<PageId>,
    mut items: Vec<Item<K>>,
    u: Item<K>,
    r: usize,
    n: usize,
    new_right_id: PageId,
) -> (Item<K>, PageBody<K>, PageBody<K>) {
    debug_assert_eq!(items.len(), 2 * n);

    let (median, left_items, right_items) = match r.cmp(&n) {
        std::cmp::Ordering::Equal => {
            let right_items = items.split_off(n);
            (u, items, right_items)
        }
        std::cmp::Ordering::Less => {
            let right_items = items.split_off(n);
            let median = items.pop().expect("full page has >= n items");
            items.insert(r, u);
            (median, items, right_items)
        }
        std::cmp::Ordering::Greater => {
            let mut right_items = items.split_off(n + 1);
            let median = items.pop().expect("full page has >= n+1 items");
            right_items.insert(r - n - 1, u);
            (median, items, right_items)
        }
    };

    let left_body = PageBody {
        p0,
        items: left_items,
    };
    let right_body = PageBody {
        p0: median.p,
        items: right_items,
    };
    let bubble = Item {
        k: median.k,
        p: Some(new_right_id),
    };

    (bubble, left_body, right_body)
}
