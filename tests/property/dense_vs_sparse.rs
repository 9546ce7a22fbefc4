//! Differential tests: the flat and trie-backed tiers must agree.
//!
//! Any operation sequence confined to a bounded range is representable by
//! both [`Dense`] and [`Sparse`]; applying it to both and comparing every
//! observable result catches divergence in either tier without needing a
//! hand-written oracle.

use std::ops::ControlFlow;

use proptest::prelude::*;

use bitset_rs::{Dense, Sparse};

const RANGE: usize = 2048;

#[derive(Clone, Debug)]
enum Op {
    Add(usize),
    Remove(usize),
    Union(Vec<usize>),
    Difference(Vec<usize>),
    Intersect(Vec<usize>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let v = prop::collection::vec(0..RANGE, 0..40);
    prop_oneof![
        4 => (0..RANGE).prop_map(Op::Add),
        2 => (0..RANGE).prop_map(Op::Remove),
        1 => v.clone().prop_map(Op::Union),
        1 => v.clone().prop_map(Op::Difference),
        1 => v.prop_map(Op::Intersect),
    ]
}

fn dense_from(els: &[usize]) -> Dense {
    let mut d = Dense::new(RANGE);
    for &e in els {
        d.add(e);
    }
    d
}

fn sparse_from(els: &[usize]) -> Sparse {
    let mut s = Sparse::new();
    for &e in els {
        s.add_usize(e);
    }
    s
}

fn sparse_elements(s: &Sparse) -> Vec<usize> {
    let mut out = Vec::new();
    s.for_each_element(|e| {
        out.push(e as usize);
        ControlFlow::Continue(())
    });
    out
}

proptest! {
    #[test]
    fn tiers_agree_on_op_sequences(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut dense = Dense::new(RANGE);
        let mut sparse = Sparse::new();

        for op in ops {
            match op {
                Op::Add(n) => {
                    dense.add(n);
                    sparse.add_usize(n);
                }
                Op::Remove(n) => {
                    dense.remove(n);
                    sparse.remove_usize(n);
                }
                Op::Union(els) => {
                    dense.union_in_place(&dense_from(&els));
                    sparse.union_in_place(&sparse_from(&els));
                }
                Op::Difference(els) => {
                    dense.difference_in_place(&dense_from(&els));
                    sparse.difference_in_place(&sparse_from(&els));
                }
                Op::Intersect(els) => {
                    dense.intersect_in_place(&dense_from(&els));
                    sparse.intersect_in_place(&sparse_from(&els));
                }
            }
            prop_assert_eq!(dense.len(), sparse.len());
            prop_assert_eq!(dense.is_empty(), sparse.is_empty());
        }

        prop_assert_eq!(dense.iter().collect::<Vec<_>>(), sparse_elements(&sparse));
        prop_assert_eq!(dense.to_string(), sparse.to_string());
        for probe in [0, 1, 63, 64, RANGE - 1] {
            prop_assert_eq!(dense.contains(probe), sparse.contains_usize(probe));
        }
    }
}
