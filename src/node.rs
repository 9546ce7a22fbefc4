//! Interior node of the sparse trie.
//!
//! A [`Node`] behaves like a 256-element array of children indexed by one
//! byte of the key, but only the non-empty slots are stored: `presence`
//! records which slots are occupied and `children` holds exactly those
//! slots, packed and sorted by index. A child at slot `i` lives at position
//! `presence.rank(i)` in the packed vector; keeping that mapping intact is
//! the invariant every mutation below preserves.
//!
//! # Invariants
//! - `children.len() == presence.len()`, and the slot indices in
//!   `children` are the set bits of `presence` in ascending order.
//! - No child is empty. A mutation that would empty a child removes its
//!   slot instead; one that would empty the node reports that upward so
//!   the parent (ultimately [`Sparse`](crate::Sparse)) drops the node.

use std::ops::ControlFlow;

use crate::set256::Set256;

/// Shift of a root node: its byte is the most significant of a 64-bit key.
pub(crate) const ROOT_SHIFT: u32 = 56;

/// Shift at which children are leaf blocks rather than interior nodes.
const LEAF_SHIFT: u32 = 8;

/// Interior trie node: a presence bitmap plus the packed non-empty slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    /// Bit offset of this node's byte within a key.
    shift: u32,
    /// Which of the 256 child slots are occupied.
    presence: Set256,
    /// The occupied slots, sorted ascending by index.
    children: Vec<Slot>,
}

/// One occupied child slot.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Slot {
    /// Index in the conceptual 256-element child array.
    index: u8,
    child: Child,
}

/// A trie child: interior nodes above the bottom level, leaf blocks at it.
///
/// The two cases are distinguished statically by the parent's shift
/// (`Leaf` iff the parent sits at `LEAF_SHIFT`), so matching on a pair of
/// children at the same level can never see mixed variants.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Child {
    Interior(Node),
    Leaf(Set256),
}

impl Child {
    fn add(&mut self, key: u64) {
        match self {
            Child::Interior(node) => node.add(key),
            Child::Leaf(block) => block.add(key as u8),
        }
    }

    /// Removes `key`; reports whether the child is now empty.
    fn remove(&mut self, key: u64) -> bool {
        match self {
            Child::Interior(node) => node.remove(key),
            Child::Leaf(block) => {
                block.remove(key as u8);
                block.is_empty()
            }
        }
    }

    fn contains(&self, key: u64) -> bool {
        match self {
            Child::Interior(node) => node.contains(key),
            Child::Leaf(block) => block.contains(key as u8),
        }
    }

    fn len(&self) -> usize {
        match self {
            Child::Interior(node) => node.len(),
            Child::Leaf(block) => block.len(),
        }
    }

    fn union_in_place(&mut self, other: &Child) {
        match (self, other) {
            (Child::Interior(a), Child::Interior(b)) => a.union_in_place(b),
            (Child::Leaf(a), Child::Leaf(b)) => a.union_in_place(b),
            _ => unreachable!("children at the same trie level share one kind"),
        }
    }

    /// Reports whether the child is now empty.
    fn difference_in_place(&mut self, other: &Child) -> bool {
        match (self, other) {
            (Child::Interior(a), Child::Interior(b)) => a.difference_in_place(b),
            (Child::Leaf(a), Child::Leaf(b)) => a.difference_in_place(b),
            _ => unreachable!("children at the same trie level share one kind"),
        }
    }

    /// Reports whether the child is now empty.
    fn intersect_in_place(&mut self, other: &Child) -> bool {
        match (self, other) {
            (Child::Interior(a), Child::Interior(b)) => a.intersect_in_place(b),
            (Child::Leaf(a), Child::Leaf(b)) => a.intersect_in_place(b),
            _ => unreachable!("children at the same trie level share one kind"),
        }
    }

    fn for_each<F>(&self, high: u64, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(u64) -> ControlFlow<()>,
    {
        match self {
            Child::Interior(node) => node.for_each(high, visit),
            Child::Leaf(block) => block.for_each_element(high, visit),
        }
    }
}

impl Node {
    pub(crate) fn new(shift: u32) -> Self {
        debug_assert!(shift >= LEAF_SHIFT && shift <= ROOT_SHIFT && shift % 8 == 0);
        Self {
            shift,
            presence: Set256::empty(),
            children: Vec::new(),
        }
    }

    /// The byte of `key` this node dispatches on.
    #[inline]
    fn slot_index(&self, key: u64) -> u8 {
        (key >> self.shift) as u8
    }

    fn new_child(&self) -> Child {
        if self.shift == LEAF_SHIFT {
            Child::Leaf(Set256::empty())
        } else {
            Child::Interior(Node::new(self.shift - 8))
        }
    }

    pub(crate) fn add(&mut self, key: u64) {
        let index = self.slot_index(key);
        let (pos, present) = self.presence.rank(index);
        if !present {
            self.children.insert(
                pos,
                Slot {
                    index,
                    child: self.new_child(),
                },
            );
            self.presence.add(index);
        }
        self.children[pos].child.add(key);
    }

    /// Removes `key`; reports whether the node is now empty.
    ///
    /// When the last child empties, presence and children are left as they
    /// are: the caller drops the whole node, so there is nothing to tidy.
    pub(crate) fn remove(&mut self, key: u64) -> bool {
        let index = self.slot_index(key);
        let (pos, present) = self.presence.rank(index);
        if !present {
            return false;
        }
        if self.children[pos].child.remove(key) {
            if self.children.len() == 1 {
                return true;
            }
            self.children.remove(pos);
            self.presence.remove(index);
        }
        false
    }

    pub(crate) fn contains(&self, key: u64) -> bool {
        let index = self.slot_index(key);
        let (pos, present) = self.presence.rank(index);
        present && self.children[pos].child.contains(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.children.iter().map(|s| s.child.len()).sum()
    }

    /// Merges `other` into `self`: a sorted two-cursor walk over the slot
    /// arrays. Slots only `other` has are deep-cloned in at their rank
    /// position; shared slots union recursively.
    pub(crate) fn union_in_place(&mut self, other: &Node) {
        debug_assert_eq!(self.shift, other.shift);
        let mut i = 0;
        let mut j = 0;
        while i < self.children.len() && j < other.children.len() {
            let a = self.children[i].index;
            let b = other.children[j].index;
            if a < b {
                i += 1;
            } else if a > b {
                self.presence.add(b);
                self.children.insert(i, other.children[j].clone());
                i += 1;
                j += 1;
            } else {
                self.children[i].child.union_in_place(&other.children[j].child);
                i += 1;
                j += 1;
            }
        }
        for slot in &other.children[j..] {
            self.presence.add(slot.index);
            self.children.push(slot.clone());
        }
    }

    /// Removes every key of `other`; reports whether the node is now
    /// empty. Only shared slots do work; a child that empties loses its
    /// presence bit, and the slot array is compacted once at the end.
    pub(crate) fn difference_in_place(&mut self, other: &Node) -> bool {
        debug_assert_eq!(self.shift, other.shift);
        let mut i = 0;
        let mut j = 0;
        let mut dropped = false;
        while i < self.children.len() && j < other.children.len() {
            let a = self.children[i].index;
            let b = other.children[j].index;
            if a < b {
                i += 1;
            } else if a > b {
                j += 1;
            } else {
                if self.children[i]
                    .child
                    .difference_in_place(&other.children[j].child)
                {
                    self.presence.remove(a);
                    dropped = true;
                }
                i += 1;
                j += 1;
            }
        }
        if self.presence.is_empty() {
            return true;
        }
        if dropped {
            self.compact();
        }
        false
    }

    /// Removes every key not in `other`; reports whether the node is now
    /// empty. Slots `other` lacks are dropped wholesale; shared slots
    /// intersect recursively.
    pub(crate) fn intersect_in_place(&mut self, other: &Node) -> bool {
        debug_assert_eq!(self.shift, other.shift);
        let mut i = 0;
        let mut j = 0;
        let mut dropped = false;
        while i < self.children.len() && j < other.children.len() {
            let a = self.children[i].index;
            let b = other.children[j].index;
            if a < b {
                self.presence.remove(a);
                dropped = true;
                i += 1;
            } else if a > b {
                j += 1;
            } else {
                if self.children[i]
                    .child
                    .intersect_in_place(&other.children[j].child)
                {
                    self.presence.remove(a);
                    dropped = true;
                }
                i += 1;
                j += 1;
            }
        }
        while i < self.children.len() {
            self.presence.remove(self.children[i].index);
            dropped = true;
            i += 1;
        }
        if self.presence.is_empty() {
            return true;
        }
        if dropped {
            self.compact();
        }
        false
    }

    /// Rebuilds the slot array after presence bits were cleared.
    fn compact(&mut self) {
        let presence = &self.presence;
        self.children.retain(|s| presence.contains(s.index));
        debug_assert_eq!(self.children.len(), self.presence.len());
    }

    /// In-order traversal. `high` carries the key bits accumulated above
    /// this node; each slot contributes `index << shift`.
    pub(crate) fn for_each<F>(&self, high: u64, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(u64) -> ControlFlow<()>,
    {
        for slot in &self.children {
            let prefix = high | ((slot.index as u64) << self.shift);
            slot.child.for_each(prefix, visit)?;
        }
        ControlFlow::Continue(())
    }

    /// Walks the subtree checking every structural invariant, panicking on
    /// the first violation.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert!(
            self.shift >= LEAF_SHIFT && self.shift <= ROOT_SHIFT && self.shift % 8 == 0,
            "bad shift {}",
            self.shift
        );
        assert!(!self.children.is_empty(), "live node has no children");
        assert_eq!(
            self.children.len(),
            self.presence.len(),
            "presence population does not match slot count"
        );
        let mut prev = None;
        for slot in &self.children {
            if let Some(p) = prev {
                assert!(slot.index > p, "slot indices not strictly ascending");
            }
            prev = Some(slot.index);
            assert!(
                self.presence.contains(slot.index),
                "slot {} missing from presence",
                slot.index
            );
            match &slot.child {
                Child::Interior(node) => {
                    assert_eq!(node.shift, self.shift - 8, "child shift mismatch");
                    node.check_invariants();
                }
                Child::Leaf(block) => {
                    assert_eq!(self.shift, LEAF_SHIFT, "leaf above the bottom level");
                    assert!(!block.is_empty(), "empty leaf block");
                }
            }
        }
    }

    /// Renders the subtree structure, one line per slot, indented by
    /// depth. Test-only diagnostic for invariant failures.
    #[cfg(test)]
    pub(crate) fn dump(&self, out: &mut String, depth: usize) {
        use std::fmt::Write;

        let pad = "  ".repeat(depth);
        let _ = writeln!(
            out,
            "{pad}shift {} ({} slots, {} keys)",
            self.shift,
            self.children.len(),
            self.len()
        );
        for slot in &self.children {
            match &slot.child {
                Child::Interior(node) => {
                    let _ = writeln!(out, "{pad}  [{}]:", slot.index);
                    node.dump(out, depth + 2);
                }
                Child::Leaf(block) => {
                    let _ = writeln!(out, "{pad}  [{}]: leaf {} keys", slot.index, block.len());
                }
            }
        }
    }
}
