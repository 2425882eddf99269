//! A single-file, `memmap2`-backed `PageStore` for `u64` keys.
//!
//! Fixed-size pages within one `MmapMut`, sized with `page_size::get()`,
//! addressed by page number, mutated through a `RefCell` around the mapping.
//! Pages are pre-allocated in a fixed number of `page_size::get()`-sized
//! chunks up front, sized to the file's initial length.

use std::cell::RefCell;
use std::convert::TryInto;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use memmap2::MmapMut;

use crate::page::{Item, PageBody, PageId, PageStore};

const TAG_LEAF: u8 = 0;
const TAG_INTERNAL: u8 = 1;
const HEADER_LEN: usize = 1 + 4 + 2; // tag, p0, item count
const ITEM_LEN: usize = 8 + 4; // key (u64), child (u32, id + 1; 0 = NONE)

/// `None` is encoded as `0`; a real `PageId` is stored as `id + 1` so page 0
/// (reserved below for the metadata/free-counter slot) is never a valid
/// encoded id.
fn encode_id(id: Option<PageId>) -> u32 {
    match id {
        None => 0,
        Some(id) => id.checked_add(1).expect("page id overflow"),
    }
}

fn decode_id(raw: u32) -> Option<PageId> {
    if raw == 0 {
        None
    } else {
        Some(raw - 1)
    }
}

pub struct MmapStore {
    mmap: RefCell<MmapMut>,
    page_size: usize,
    max_items: usize,
    next_page: RefCell<u32>,
}

impl MmapStore {
    /// Create (or truncate) a backing file sized to hold `initial_pages`
    /// pages of `page_size::get()` bytes each, including the reserved page 0.
    pub fn create<P: AsRef<Path>>(path: P, initial_pages: u32) -> io::Result<Self> {
        let page_size = page_size::get();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        let len = page_size as u64 * initial_pages.max(1) as u64;
        file.set_len(len)?;

        let mmap = unsafe { MmapMut::map_mut(&file)? };
        let max_items = (page_size - HEADER_LEN) / ITEM_LEN;

        Ok(MmapStore {
            mmap: RefCell::new(mmap),
            page_size,
            max_items,
            next_page: RefCell::new(1), // page 0 is reserved
        })
    }

    /// Maximum `2*order` this store can hold per page, given its page size.
    pub fn max_items_per_page(&self) -> usize {
        self.max_items
    }

    fn page_bytes(&self, id: PageId) -> std::ops::Range<usize> {
        let start = (id as usize + 1) * self.page_size;
        start..start + self.page_size
    }

    fn grow_for(&self, id: PageId) {
        let needed_pages = id as usize + 2; // +1 for reservation, +1 so id is in range
        let needed_len = needed_pages * self.page_size;
        let mut mmap = self.mmap.borrow_mut();
        if needed_len > mmap.len() {
            // `MmapMut` cannot be resized in place; callers that need a page
            // beyond the initial allocation must recreate the store with a
            // larger `initial_pages`. This backend is a demonstration, not a
            // growable production store (see DESIGN.md).
            panic!(
                "MmapStore: page {id} is beyond the file's pre-allocated {} pages; \
                 recreate with a larger `initial_pages`",
                mmap.len() / self.page_size
            );
        }
    }

}

impl PageStore<u64> for MmapStore {
    type Error = io::Error;

    fn read(&self, id: PageId) -> Result<PageBody<u64>, io::Error> {
        self.grow_for(id);
        let range = self.page_bytes(id);
        let mmap = self.mmap.borrow();
        let buf = &mmap[range];

        let tag = buf[0];
        let p0_raw = u32::from_be_bytes(buf[1..5].try_into().unwrap());
        let count = u16::from_be_bytes(buf[5..7].try_into().unwrap()) as usize;

        let p0 = if tag == TAG_LEAF {
            None
        } else {
            decode_id(p0_raw)
        };

        let mut items = Vec::with_capacity(count);
        let mut offset = HEADER_LEN;
        for _ in 0..count {
            let key = u64::from_be_bytes(buf[offset..offset + 8].try_into().unwrap());
            let child_raw = u32::from_be_bytes(buf[offset + 8..offset + 12].try_into().unwrap());
            let p = if tag == TAG_LEAF {
                None
            } else {
                decode_id(child_raw)
            };
            items.push(Item::new(key, p));
            offset += ITEM_LEN;
        }

        Ok(PageBody { p0, items })
    }

    fn write(&self, id: PageId, body: &PageBody<u64>) -> Result<(), io::Error> {
        if body.items.len() > self.max_items {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "page body has {} items, exceeds this store's page capacity of {}",
                    body.items.len(),
                    self.max_items
                ),
            ));
        }

        self.grow_for(id);
        let range = self.page_bytes(id);
        let mut mmap = self.mmap.borrow_mut();
        let buf = &mut mmap[range];

        buf[0] = if body.is_leaf() { TAG_LEAF } else { TAG_INTERNAL };
        buf[1..5].copy_from_slice(&encode_id(body.p0).to_be_bytes());
        buf[5..7].copy_from_slice(&(body.items.len() as u16).to_be_bytes());

        let mut offset = HEADER_LEN;
        for item in &body.items {
            buf[offset..offset + 8].copy_from_slice(&item.k.to_be_bytes());
            buf[offset + 8..offset + 12].copy_from_slice(&encode_id(item.p).to_be_bytes());
            offset += ITEM_LEN;
        }

        Ok(())
    }

    fn allocate(&self) -> Result<PageId, io::Error> {
        let mut next = self.next_page.borrow_mut();
        let id = *next;
        *next += 1;
        Ok(id)
    }

    fn delete(&self, _id: PageId) -> Result<(), io::Error> {
        // No free list: this backend never recycles page numbers. Adequate
        // for demonstration and tests; a real deployment would track freed
        // pages and reuse them on the next `allocate`.
        Ok(())
    }
}
