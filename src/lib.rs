//! Bitsets in three tiers, chosen to match the density and value range of
//! the set being stored.
//!
//! A bitset is a set of unsigned integers represented with one bit per
//! possible member. The three tiers trade memory for range:
//!
//! - [`Set64`] packs subsets of `[0, 64)` into a single machine word.
//!   Addition, removal, and membership are one or two instructions; use it
//!   when the largest possible value is 63.
//! - [`Dense`] stores subsets of a bounded range `[0, cap)` as a flat run
//!   of words. Operations stay word-fast and memory is proportional to the
//!   largest representable value, one bit each.
//! - [`Sparse`] stores arbitrary `u64` keys in a compact radix trie and
//!   uses memory roughly proportional to the number of elements rather
//!   than the universe. Per-operation cost is higher than [`Dense`], but a
//!   set like `{1000, 2000, …, 1_000_000}` occupies a few trie nodes
//!   instead of 125 KiB of mostly-zero words.
//!
//! # Module map
//! - `set64`: the one-word primitive the other tiers are built from.
//! - `dense`: the flat `[Set64]` bitset for known-capacity universes.
//! - `sparse`: the trie-backed bitset for arbitrary 64-bit keys.
//!
//! All structures are single-owner and synchronous: no interior
//! mutability, no background work, no I/O. Iteration is deterministic and
//! ascending. Cloning any tier produces an independent deep copy.

pub mod dense;
pub mod set64;
pub mod sparse;

mod node;
mod set256;

pub use dense::{Dense, DenseIter};
pub use set64::{Set64, Set64Iter};
pub use sparse::Sparse;
