//! Deletion with recursive borrow/merge rebalance.

use log::{debug, trace};

use crate::cache::Cache;
use crate::error::Error;
use crate::page::{Item, PageId, PageStore};
use crate::search::{binary_search_page, BinSearch};
use crate::Tree;

/// Delete `key` from `tree`, returning the (possibly unchanged) new tree
/// value. Deleting an absent key is a success, not an error.
pub(crate) fn delete<K, S>(store: &S, tree: &Tree, key: &K) -> Result<Tree, Error<S::Error>>
where
    K: Ord + Clone,
    S: PageStore<K>,
{
    let mut cache = Cache::new(store);
    let n = tree.order;

    let new_root = match tree.root {
        None => None,
        Some(root_id) => {
            delete_rec(&mut cache, n, key, root_id)?;

            let root_body = cache.read(root_id)?;
            if root_body.items.is_empty() {
                let promoted = root_body.p0;
                cache.delete(root_id);
                debug!("delete: root {root_id} emptied, promoting {promoted:?}");
                promoted
            } else {
                Some(root_id)
            }
        }
    };

    cache.flush()?;

    Ok(Tree {
        order: tree.order,
        root: new_root,
    })
}

/// Locate and delete `key` within the subtree rooted at `a_id`. Returns
/// whether `a_id` now has fewer than `n` items (underflowed).
fn delete_rec<K, S>(
    cache: &mut Cache<K, S>,
    n: usize,
    key: &K,
    a_id: PageId,
) -> Result<bool, Error<S::Error>>
where
    K: Ord + Clone,
    S: PageStore<K>,
{
    let a = cache.read(a_id)?;

    match binary_search_page(&a.items, key) {
        BinSearch::Found(idx) => match a.child(idx) {
            None => {
                let mut a = a;
                a.items.remove(idx);
                let underflowed = a.items.len() < n;
                cache.write(a_id, a);
                Ok(underflowed)
            }
            Some(q_id) => {
                let q_underflowed = splice(cache, n, q_id, a_id, idx)?;
                if q_underflowed {
                    underflow(cache, n, a_id, q_id, idx)
                } else {
                    Ok(false)
                }
            }
        },
        BinSearch::NotFound(r) => match a.child(r) {
            None => {
                trace!("delete: key not present");
                Ok(false)
            }
            Some(q_id) => {
                let q_underflowed = delete_rec(cache, n, key, q_id)?;
                if q_underflowed {
                    underflow(cache, n, a_id, q_id, r)
                } else {
                    Ok(false)
                }
            }
        },
    }
}

/// Replace `parent.items[item_idx]`'s key with the largest key in the
/// subtree rooted at `q_id` (the in-order predecessor), then remove that key
/// from its leaf. Walks rightward to the leaf, then unwinds, rebalancing any
/// intermediate page whose rightmost child underflowed. Returns whether
/// `q_id` itself now underflows.
fn splice<K, S>(
    cache: &mut Cache<K, S>,
    n: usize,
    q_id: PageId,
    parent_id: PageId,
    item_idx: usize,
) -> Result<bool, Error<S::Error>>
where
    K: Ord + Clone,
    S: PageStore<K>,
{
    let body = cache.read(q_id)?;
    let m = body.items.len();

    match body.child(m) {
        None => {
            let mut leaf = body;
            let pred_key = leaf.items[m - 1].k.clone();

            let mut parent = cache.read(parent_id)?;
            parent.items[item_idx].k = pred_key;
            cache.write(parent_id, parent);

            leaf.items.pop();
            let underflowed = leaf.items.len() < n;
            cache.write(q_id, leaf);
            Ok(underflowed)
        }
        Some(child_id) => {
            let child_underflowed = splice(cache, n, child_id, parent_id, item_idx)?;
            if child_underflowed {
                underflow(cache, n, q_id, child_id, m)
            } else {
                Ok(false)
            }
        }
    }
}

/// Rebalance undersized page `a_id` (reached from `c_id` at child slot `s`,
/// 0 meaning `c.p0`) by borrowing from an adjacent sibling or merging with
/// it. Returns whether `c_id` itself now underflows (only possible on the
/// merge path, since `c_id` loses a separator item).
fn underflow<K, S>(
    cache: &mut Cache<K, S>,
    n: usize,
    c_id: PageId,
    a_id: PageId,
    s: usize,
) -> Result<bool, Error<S::Error>>
where
    K: Ord + Clone,
    S: PageStore<K>,
{
    let mut c = cache.read(c_id)?;
    let m_c = c.items.len();

    if s < m_c {
        // A right sibling exists at c.items[s].p; prefer borrowing from it.
        let b_id = c.items[s].p.expect("internal separator must carry a child");
        let mut b = cache.read(b_id)?;
        let m_b = b.items.len();
        let k = (m_b + 1 - n) / 2;

        let mut a = cache.read(a_id)?;
        let separator_key = c.items[s].k.clone();

        if k > 0 {
            trace!("delete: borrow {k} item(s) from right sibling {b_id} into {a_id}");
            let old_b_p0 = b.p0;
            a.items.push(Item::new(separator_key, old_b_p0));
            let moved: Vec<Item<K>> = b.items.drain(0..k - 1).collect();
            a.items.extend(moved);

            let ascending = b.items.remove(0);
            b.p0 = ascending.p;
            c.items[s] = Item::new(ascending.k, Some(b_id));

            cache.write(a_id, a);
            cache.write(b_id, b);
            cache.write(c_id, c);
            Ok(false)
        } else {
            trace!("delete: merge {b_id} into {a_id}, dropping separator at slot {s}");
            let old_b_p0 = b.p0;
            a.items.push(Item::new(separator_key, old_b_p0));
            a.items.append(&mut b.items);

            cache.write(a_id, a);
            cache.delete(b_id);

            c.items.remove(s);
            let c_underflowed = c.items.len() < n;
            cache.write(c_id, c);
            Ok(c_underflowed)
        }
    } else {
        // A is rightmost among C's children; rebalance against the left
        // sibling at slot s - 1 (c.p0 if s == 1).
        let sep_idx = s - 1;
        let b_id = c
            .child(sep_idx)
            .expect("left sibling must exist when no right sibling does");
        let mut b = cache.read(b_id)?;
        let m_b = b.items.len();
        let k = (m_b + 1 - n) / 2;

        let mut a = cache.read(a_id)?;
        let separator_key = c.items[sep_idx].k.clone();

        if k > 0 {
            trace!("delete: borrow {k} item(s) from left sibling {b_id} into {a_id}");
            let ascending_idx = m_b - k;
            let ascending = b.items[ascending_idx].clone();
            let moved: Vec<Item<K>> = b.items.drain(ascending_idx + 1..m_b).collect();

            let old_a_p0 = a.p0;
            a.p0 = ascending.p;

            let mut new_items = moved;
            new_items.push(Item::new(separator_key, old_a_p0));
            new_items.extend(std::mem::take(&mut a.items));
            a.items = new_items;

            b.items.truncate(ascending_idx);
            c.items[sep_idx] = Item::new(ascending.k, Some(a_id));

            cache.write(a_id, a);
            cache.write(b_id, b);
            cache.write(c_id, c);
            Ok(false)
        } else {
            trace!("delete: merge {a_id} into left sibling {b_id}, dropping separator at slot {sep_idx}");
            let old_a_p0 = a.p0;
            b.items.push(Item::new(separator_key, old_a_p0));
            b.items.extend(std::mem::take(&mut a.items));

            cache.write(b_id, b);
            cache.delete(a_id);

            c.items.remove(sep_idx);
            let c_underflowed = c.items.len() < n;
            cache.write(c_id, c);
            Ok(c_underflowed)
        }
    }
}
