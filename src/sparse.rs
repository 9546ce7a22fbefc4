//! Trie-backed set of arbitrary `u64` keys.
//!
//! [`Sparse`] chops each 64-bit key into eight bytes, most significant
//! first, and descends a radix trie one byte per level. Interior levels
//! are [`Node`]s holding only their non-empty slots; the bottom level
//! stores the final byte in a 256-bit leaf block. Memory is roughly
//! proportional to the number of elements, so the full `u64` range is
//! usable without reserving the universe up front.

use std::fmt;
use std::ops::ControlFlow;

use crate::node::{Node, ROOT_SHIFT};

/// Set of `u64` keys backed by a compact radix trie.
///
/// An empty set owns no heap storage: the root node is created by the
/// first insertion and released again when the last key is removed.
/// Cloning produces an independent deep copy.
///
/// # Examples
/// ```
/// use bitset_rs::Sparse;
///
/// let mut s = Sparse::new();
/// s.add(9);
/// s.add(10_000);
/// s.add(99);
/// assert_eq!(s.len(), 3);
/// assert!(s.contains(99));
/// assert_eq!(s.to_string(), "{9, 99, 10000}");
///
/// s.remove(9);
/// s.remove(99);
/// s.remove(10_000);
/// assert!(s.is_empty());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Sparse {
    root: Option<Box<Node>>,
}

impl Sparse {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Creates a set holding the given keys.
    pub fn from_elements(els: &[u64]) -> Self {
        let mut s = Self::new();
        for &e in els {
            s.add(e);
        }
        s
    }

    fn new_root() -> Box<Node> {
        Box::new(Node::new(ROOT_SHIFT))
    }

    /// Adds `key` to the set.
    pub fn add(&mut self, key: u64) {
        self.root.get_or_insert_with(Self::new_root).add(key);
    }

    /// Removes `key` from the set. Removing a key that is not present is a
    /// no-op.
    pub fn remove(&mut self, key: u64) {
        if let Some(root) = self.root.as_deref_mut() {
            if root.remove(key) {
                self.root = None;
            }
        }
    }

    /// Reports whether `key` is a member.
    pub fn contains(&self, key: u64) -> bool {
        self.root.as_deref().map_or(false, |root| root.contains(key))
    }

    /// Reports whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Counts the members by summing the leaf populations.
    pub fn len(&self) -> usize {
        self.root.as_deref().map_or(0, Node::len)
    }

    /// Removes all members, releasing the trie.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Adds every key of `other`. Subtrees `self` lacks are deep-cloned;
    /// nothing is shared with `other` afterwards.
    pub fn union_in_place(&mut self, other: &Sparse) {
        let Some(other_root) = other.root.as_deref() else {
            return;
        };
        self.root
            .get_or_insert_with(Self::new_root)
            .union_in_place(other_root);
    }

    /// Removes every key of `other`.
    pub fn difference_in_place(&mut self, other: &Sparse) {
        let Some(other_root) = other.root.as_deref() else {
            return;
        };
        if let Some(root) = self.root.as_deref_mut() {
            if root.difference_in_place(other_root) {
                self.root = None;
            }
        }
    }

    /// Removes every key not in `other`.
    pub fn intersect_in_place(&mut self, other: &Sparse) {
        let Some(other_root) = other.root.as_deref() else {
            self.root = None;
            return;
        };
        if let Some(root) = self.root.as_deref_mut() {
            if root.intersect_in_place(other_root) {
                self.root = None;
            }
        }
    }

    /// Calls `visit` on each member in ascending order. Returning
    /// [`ControlFlow::Break`] stops the traversal promptly.
    ///
    /// # Examples
    /// ```
    /// use std::ops::ControlFlow;
    /// use bitset_rs::Sparse;
    ///
    /// let s = Sparse::from_elements(&[3, 17, 300]);
    /// let mut seen = Vec::new();
    /// s.for_each_element(|key| {
    ///     seen.push(key);
    ///     ControlFlow::Continue(())
    /// });
    /// assert_eq!(seen, vec![3, 17, 300]);
    /// ```
    pub fn for_each_element<F>(&self, mut visit: F)
    where
        F: FnMut(u64) -> ControlFlow<()>,
    {
        if let Some(root) = self.root.as_deref() {
            let _ = root.for_each(0, &mut visit);
        }
    }

    /// `add` on the platform's natural width; widens and delegates.
    pub fn add_usize(&mut self, key: usize) {
        self.add(key as u64);
    }

    /// `remove` on the platform's natural width; widens and delegates.
    pub fn remove_usize(&mut self, key: usize) {
        self.remove(key as u64);
    }

    /// `contains` on the platform's natural width; widens and delegates.
    pub fn contains_usize(&self, key: usize) -> bool {
        self.contains(key as u64)
    }

    /// Collects the members in ascending order; backs [`fmt::Display`].
    fn collect_elements(&self) -> Vec<u64> {
        let mut els = Vec::with_capacity(self.len());
        self.for_each_element(|e| {
            els.push(e);
            ControlFlow::Continue(())
        });
        els
    }

    /// Panics unless every trie invariant holds.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        if let Some(root) = self.root.as_deref() {
            root.check_invariants();
        }
    }

    /// Renders the trie structure for diagnostics.
    #[cfg(test)]
    pub(crate) fn dump(&self) -> String {
        let mut out = String::new();
        match self.root.as_deref() {
            None => out.push_str("empty\n"),
            Some(root) => root.dump(&mut out, 0),
        }
        out
    }
}

impl fmt::Display for Sparse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, e) in self.collect_elements().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for Sparse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
#[path = "sparse_tests.rs"]
mod sparse_tests;
