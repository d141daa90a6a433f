//! Deduplicated string storage for the resource table.
//!
//! All String-typed content in the model indirects through a [`StringPool`] owned by the
//! table. Interning the same text twice hands back the same [`PoolRef`], so equal strings
//! are stored once and values compare by handle. A handle is a plain index with no
//! generation data: it is only meaningful against the pool that produced it and must not
//! be persisted across table boundaries. The codecs serialize the pool once as a shared
//! table and re-intern on decode, so handle values are not stable across a round-trip
//! (content is).

use std::collections::HashMap;

/// A stable handle to a string in the owning [`StringPool`].
///
/// Obtained from [`StringPool::make_ref`]; dereferenced with [`StringPool::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolRef(pub(crate) u32);

impl PoolRef {
    /// Returns the raw index of this handle
    #[must_use]
    pub fn index(&self) -> u32 {
        self.0
    }
}

#[derive(Debug)]
struct PoolEntry {
    text: String,
    refs: u32,
}

/// Deduplicated, reference-counted table of text values.
///
/// # Examples
///
/// ```rust
/// use restable::model::StringPool;
///
/// let mut pool = StringPool::new();
/// let a = pool.make_ref("hi");
/// let b = pool.make_ref("hi");
/// assert_eq!(a, b);
/// assert_eq!(pool.get(a), Some("hi"));
/// assert_eq!(pool.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StringPool {
    entries: Vec<PoolEntry>,
    lookup: HashMap<String, u32>,
}

impl StringPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        StringPool::default()
    }

    /// Intern `text`, returning a handle to its unique pool slot.
    ///
    /// Adding an equal string returns the existing handle and bumps its reference count.
    pub fn make_ref(&mut self, text: &str) -> PoolRef {
        if let Some(&index) = self.lookup.get(text) {
            self.entries[index as usize].refs += 1;
            return PoolRef(index);
        }

        // Pools are bounded by table size in practice, u32 cannot overflow here
        #[allow(clippy::cast_possible_truncation)]
        let index = self.entries.len() as u32;
        self.entries.push(PoolEntry {
            text: text.to_owned(),
            refs: 1,
        });
        self.lookup.insert(text.to_owned(), index);
        PoolRef(index)
    }

    /// Resolve a handle to its text, or `None` if the handle does not belong to this pool.
    #[must_use]
    pub fn get(&self, r: PoolRef) -> Option<&str> {
        self.entries.get(r.0 as usize).map(|e| e.text.as_str())
    }

    /// Number of references handed out for the string behind `r`.
    #[must_use]
    pub fn ref_count(&self, r: PoolRef) -> u32 {
        self.entries.get(r.0 as usize).map_or(0, |e| e.refs)
    }

    /// Number of unique strings in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the pool holds no strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the unique strings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_returns_same_handle() {
        let mut pool = StringPool::new();
        let a = pool.make_ref("one");
        let b = pool.make_ref("two");
        let c = pool.make_ref("one");

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.ref_count(a), 2);
        assert_eq!(pool.ref_count(b), 1);
    }

    #[test]
    fn get_unknown_handle() {
        let pool = StringPool::new();
        assert_eq!(pool.get(PoolRef(7)), None);
        assert_eq!(pool.ref_count(PoolRef(7)), 0);
    }

    #[test]
    fn insertion_order_is_stable() {
        let mut pool = StringPool::new();
        pool.make_ref("c");
        pool.make_ref("a");
        pool.make_ref("b");
        pool.make_ref("a");

        let order: Vec<&str> = pool.iter().collect();
        assert_eq!(order, ["c", "a", "b"]);
    }
}
