//! Flat bitset over a bounded range `[0, cap)`.
//!
//! [`Dense`] is a resizable run of [`Set64`] words: one bit per possible
//! value, so memory tracks the capacity rather than the population. Use it
//! when the largest possible value is known; for wide-ranging keys see
//! [`Sparse`](crate::Sparse).

use std::fmt;
use std::ops::ControlFlow;

use crate::set64::{Set64, Set64Iter};

/// Words needed to cover `capacity` bits.
fn words_for_cap(capacity: usize) -> usize {
    capacity.div_ceil(64)
}

/// Flat bitset of `usize` values below a fixed capacity.
///
/// The capacity is rounded up to a multiple of 64; `add`, `remove`, and
/// `contains` panic when given a value at or beyond [`cap`](Dense::cap).
/// Cloning copies the backing words.
///
/// # Examples
/// ```
/// use bitset_rs::Dense;
///
/// let mut s = Dense::new(100);
/// assert_eq!(s.cap(), 128);
/// s.add(1);
/// s.add(99);
/// assert!(s.contains(99));
/// assert_eq!(s.iter().collect::<Vec<_>>(), vec![1, 99]);
/// ```
#[derive(Clone, Default)]
pub struct Dense {
    words: Vec<Set64>,
}

impl Dense {
    /// Creates a set for values in `[0, capacity)`, rounded up to the next
    /// multiple of 64. Zero capacity allocates no storage.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![Set64::empty(); words_for_cap(capacity)],
        }
    }

    /// Maximum number of values the set can hold; one greater than the
    /// largest representable value.
    pub fn cap(&self) -> usize {
        self.words.len() * Set64::CAP
    }

    /// Counts the members.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.len()).sum()
    }

    /// Reports whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_empty())
    }

    /// Adds `n` to the set.
    ///
    /// Panics if `n >= cap()`.
    #[inline]
    pub fn add(&mut self, n: usize) {
        self.words[n / 64].add((n % 64) as u8);
    }

    /// Removes `n` from the set.
    ///
    /// Panics if `n >= cap()`.
    #[inline]
    pub fn remove(&mut self, n: usize) {
        self.words[n / 64].remove((n % 64) as u8);
    }

    /// Reports whether `n` is a member.
    ///
    /// Panics if `n >= cap()`.
    #[inline]
    pub fn contains(&self, n: usize) -> bool {
        self.words[n / 64].contains((n % 64) as u8)
    }

    /// Removes all members; capacity is unchanged.
    pub fn clear(&mut self) {
        self.words.fill(Set64::empty());
    }

    /// Changes the capacity, preserving members below the smaller of the
    /// old and new capacities. Growing zero-extends; shrinking truncates.
    pub fn set_cap(&mut self, new_capacity: usize) {
        self.words.resize(words_for_cap(new_capacity), Set64::empty());
    }

    /// Replaces the set with its complement within the capacity.
    pub fn complement(&mut self) {
        for w in &mut self.words {
            w.complement();
        }
    }

    /// Adds every member of `other`, growing to `other.cap()` if needed.
    pub fn union_in_place(&mut self, other: &Dense) {
        if self.cap() < other.cap() {
            self.set_cap(other.cap());
        }
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            a.union_in_place(*b);
        }
    }

    /// Removes every member of `other`. Only the overlapping range does
    /// work; members beyond `other.cap()` are untouched.
    pub fn difference_in_place(&mut self, other: &Dense) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            a.difference_in_place(*b);
        }
    }

    /// Returns what `len()` would be after `difference_in_place(other)`,
    /// without modifying the set.
    pub fn len_difference(&self, other: &Dense) -> usize {
        let overlap = self.words.len().min(other.words.len());
        let mut n = 0;
        for (a, b) in self.words[..overlap].iter().zip(&other.words[..overlap]) {
            let mut w = *a;
            w.difference_in_place(*b);
            n += w.len();
        }
        for w in &self.words[overlap..] {
            n += w.len();
        }
        n
    }

    /// Removes every member not in `other`. Words beyond `other.cap()`
    /// cannot intersect anything, so the tail is zeroed.
    pub fn intersect_in_place(&mut self, other: &Dense) {
        let overlap = self.words.len().min(other.words.len());
        for (a, b) in self.words[..overlap].iter_mut().zip(&other.words[..overlap]) {
            a.intersect_in_place(*b);
        }
        for w in &mut self.words[overlap..] {
            w.clear();
        }
    }

    /// Calls `visit` with successive slices of members in ascending order,
    /// one slice per backing word. Slices may be empty, and the buffer is
    /// reused between calls. Returning [`ControlFlow::Break`] stops the
    /// scan.
    pub fn for_each_slice<F>(&self, mut visit: F)
    where
        F: FnMut(&[usize]) -> ControlFlow<()>,
    {
        let mut buf = [0usize; 64];
        for (i, w) in self.words.iter().enumerate() {
            let offset = i * 64;
            let mut n = 0;
            for e in w.iter() {
                buf[n] = offset + e as usize;
                n += 1;
            }
            if visit(&buf[..n]).is_break() {
                break;
            }
        }
    }

    /// Iterates the members in ascending order.
    pub fn iter(&self) -> DenseIter<'_> {
        DenseIter {
            words: &self.words,
            word_idx: 0,
            inner: self.words.first().copied().unwrap_or_default().iter(),
        }
    }
}

/// Iterator over the members of a [`Dense`] in ascending order.
pub struct DenseIter<'a> {
    words: &'a [Set64],
    word_idx: usize,
    inner: Set64Iter,
}

impl Iterator for DenseIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if let Some(e) = self.inner.next() {
                return Some(self.word_idx * 64 + e as usize);
            }
            self.word_idx += 1;
            if self.word_idx >= self.words.len() {
                return None;
            }
            self.inner = self.words[self.word_idx].iter();
        }
    }
}

/// Equality ignores capacity: two sets are equal when they have the same
/// members, even if one has trailing all-zero words the other lacks.
impl PartialEq for Dense {
    fn eq(&self, other: &Dense) -> bool {
        let (short, long) = if self.words.len() <= other.words.len() {
            (&self.words, &other.words)
        } else {
            (&other.words, &self.words)
        };
        short.iter().zip(long.iter()).all(|(a, b)| a == b)
            && long[short.len()..].iter().all(|w| w.is_empty())
    }
}

impl Eq for Dense {}

impl fmt::Display for Dense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for Dense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
#[path = "dense_tests.rs"]
mod dense_tests;
