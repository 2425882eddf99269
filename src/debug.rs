//! Integrity checker & printer: an optional debug surface over a tree.

use std::fmt::Debug;

use crate::error::Error;
use crate::page::{PageId, PageStore};
use crate::Tree;

/// Validate page sizing, leaf/internal uniformity, key ordering, subtree
/// bounds, and uniform leaf depth over the whole tree. Returns the first
/// violation found, if any, as a human-readable description; does not abort
/// the process itself — callers (typically tests) decide whether a
/// violation is fatal.
pub(crate) fn check<K, S>(store: &S, tree: &Tree) -> Result<(), Error<S::Error>>
where
    K: Ord + Clone,
    S: PageStore<K>,
{
    match tree.root {
        None => Ok(()),
        Some(root_id) => {
            check_page(store, tree.order, root_id, true, None, None)?;
            Ok(())
        }
    }
}

fn check_page<K, S>(
    store: &S,
    n: usize,
    id: PageId,
    is_root: bool,
    lower: Option<&K>,
    upper: Option<&K>,
) -> Result<(usize, bool), Error<S::Error>>
where
    K: Ord + Clone,
    S: PageStore<K>,
{
    let body = store.read(id).map_err(Error::Backend)?;
    let m = body.items.len();

    // Page sizing: every non-root page holds between N and 2N items; a
    // present root holds between 1 and 2N (an empty root is represented as
    // `Tree::root = None`, never as a zero-item page).
    if is_root {
        if m == 0 {
            return Err(Error::InvariantViolation(format!(
                "root page {id} has 0 items; an empty tree must have root = None"
            )));
        }
        if m > 2 * n {
            return Err(Error::InvariantViolation(format!(
                "root page {id} has {m} items, exceeds 2N = {}",
                2 * n
            )));
        }
    } else if !(n..=2 * n).contains(&m) {
        return Err(Error::InvariantViolation(format!(
            "page {id} has {m} items, outside [N, 2N] = [{n}, {}]",
            2 * n
        )));
    }

    // Leaf/internal uniformity: children are all-None or all-Some, never mixed.
    let leaf = body.is_leaf();
    if !leaf && body.items.iter().any(|it| it.p.is_none()) {
        return Err(Error::InvariantViolation(format!(
            "page {id} mixes leaf and internal children"
        )));
    }

    // Keys within a page are strictly ascending.
    for w in body.items.windows(2) {
        if !(w[0].k < w[1].k) {
            return Err(Error::InvariantViolation(format!(
                "page {id} keys out of order"
            )));
        }
    }

    // Subtree bounds, checked against the range passed down from the parent.
    if let Some(lo) = lower {
        if let Some(first) = body.items.first() {
            if !(*lo < first.k) {
                return Err(Error::InvariantViolation(format!(
                    "page {id}'s first key violates its lower subtree bound"
                )));
            }
        }
    }
    if let Some(hi) = upper {
        if let Some(last) = body.items.last() {
            if !(last.k < *hi) {
                return Err(Error::InvariantViolation(format!(
                    "page {id}'s last key violates its upper subtree bound"
                )));
            }
        }
    }

    if leaf {
        return Ok((0, true));
    }

    let mut child_depth = None;
    let mut lower_bound: Option<&K> = lower;

    for slot in 0..=body.items.len() {
        let child_id = body.child(slot).ok_or_else(|| {
            Error::InvariantViolation(format!("page {id} internal child at slot {slot} is NONE"))
        })?;

        let upper_bound = if slot < body.items.len() {
            Some(&body.items[slot].k)
        } else {
            upper
        };

        let (depth, _) = check_page(store, n, child_id, false, lower_bound, upper_bound)?;

        match child_depth {
            None => child_depth = Some(depth + 1),
            Some(d) => {
                if d != depth + 1 {
                    return Err(Error::InvariantViolation(format!(
                        "page {id}: leaves at unequal depth"
                    )));
                }
            }
        }

        lower_bound = upper_bound;
    }

    Ok((child_depth.unwrap_or(0), false))
}

/// Render the tree to a `String` for human inspection, one page per line,
/// indented by depth.
pub(crate) fn print<K, S>(store: &S, tree: &Tree) -> Result<String, Error<S::Error>>
where
    K: Ord + Clone + Debug,
    S: PageStore<K>,
{
    let mut out = String::new();
    match tree.root {
        None => out.push_str("(empty tree)\n"),
        Some(root_id) => print_page(store, root_id, 0, &mut out)?,
    }
    Ok(out)
}

fn print_page<K, S>(store: &S, id: PageId, depth: usize, out: &mut String) -> Result<(), Error<S::Error>>
where
    K: Ord + Clone + Debug,
    S: PageStore<K>,
{
    let body = store.read(id).map_err(Error::Backend)?;
    let indent = "  ".repeat(depth);
    let keys: Vec<&K> = body.items.iter().map(|it| &it.k).collect();
    out.push_str(&format!("{indent}page {id}: {keys:?}\n"));

    if let Some(p0) = body.p0 {
        print_page(store, p0, depth + 1, out)?;
    }
    for item in &body.items {
        if let Some(p) = item.p {
            print_page(store, p, depth + 1, out)?;
        }
    }
    Ok(())
}
