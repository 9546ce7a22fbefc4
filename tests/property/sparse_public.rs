//! Algebraic and representation laws on the public [`Sparse`] surface.

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use proptest::prelude::*;

use bitset_rs::Sparse;

fn key_strategy() -> impl Strategy<Value = u64> {
    // Full-range keys stress distinct root slots; clustered keys stress
    // shared prefixes and the merge walks.
    prop_oneof![any::<u64>(), 0u64..100_000]
}

fn keys_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(key_strategy(), 0..150)
}

fn elements(s: &Sparse) -> Vec<u64> {
    let mut out = Vec::new();
    s.for_each_element(|e| {
        out.push(e);
        ControlFlow::Continue(())
    });
    out
}

proptest! {
    #[test]
    fn iteration_is_sorted_and_deduplicated(keys in keys_strategy()) {
        let s = Sparse::from_elements(&keys);
        let want: Vec<u64> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(elements(&s), want);
    }

    #[test]
    fn len_matches_distinct_count(keys in keys_strategy()) {
        let s = Sparse::from_elements(&keys);
        let distinct: BTreeSet<u64> = keys.iter().copied().collect();
        prop_assert_eq!(s.len(), distinct.len());
        prop_assert_eq!(s.is_empty(), distinct.is_empty());
    }

    #[test]
    fn re_adding_iterated_elements_round_trips(keys in keys_strategy()) {
        let s = Sparse::from_elements(&keys);
        let rebuilt = Sparse::from_elements(&elements(&s));
        prop_assert_eq!(rebuilt, s);
    }

    #[test]
    fn string_is_canonical(keys in keys_strategy()) {
        let s = Sparse::from_elements(&keys);
        let distinct: BTreeSet<u64> = keys.iter().copied().collect();
        let rendered: Vec<String> = distinct.iter().map(|e| e.to_string()).collect();
        prop_assert_eq!(s.to_string(), format!("{{{}}}", rendered.join(", ")));
    }

    #[test]
    fn clone_does_not_alias(keys in keys_strategy(), extra in key_strategy()) {
        let original = Sparse::from_elements(&keys);
        let mut copy = original.clone();
        prop_assert_eq!(&copy, &original);

        copy.add(extra);
        for &k in &keys {
            copy.remove(k);
        }
        prop_assert_eq!(elements(&original),
            keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect::<Vec<_>>());

        let mut original = original;
        original.clear();
        prop_assert!(copy.contains(extra) || keys.contains(&extra));
    }

    #[test]
    fn union_is_idempotent_and_commutative(xs in keys_strategy(), ys in keys_strategy()) {
        let a = Sparse::from_elements(&xs);
        let b = Sparse::from_elements(&ys);

        let mut twice = a.clone();
        twice.union_in_place(&a.clone());
        prop_assert_eq!(&twice, &a);

        let mut ab = a.clone();
        ab.union_in_place(&b);
        let mut ba = b.clone();
        ba.union_in_place(&a);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn intersection_is_idempotent_and_commutative(xs in keys_strategy(), ys in keys_strategy()) {
        let a = Sparse::from_elements(&xs);
        let b = Sparse::from_elements(&ys);

        let mut with_self = a.clone();
        with_self.intersect_in_place(&a.clone());
        prop_assert_eq!(&with_self, &a);

        let mut ab = a.clone();
        ab.intersect_in_place(&b);
        let mut ba = b.clone();
        ba.intersect_in_place(&a);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn difference_with_self_empties(xs in keys_strategy()) {
        let a = Sparse::from_elements(&xs);
        let mut d = a.clone();
        d.difference_in_place(&a.clone());
        prop_assert!(d.is_empty());
        prop_assert_eq!(d, Sparse::new());
    }

    #[test]
    fn early_break_sees_a_prefix(keys in keys_strategy(), cutoff in 0usize..20) {
        let s = Sparse::from_elements(&keys);
        let full = elements(&s);
        let mut seen = Vec::new();
        s.for_each_element(|e| {
            seen.push(e);
            if seen.len() > cutoff {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        let want: Vec<u64> = full.iter().copied().take(cutoff + 1).collect();
        prop_assert_eq!(seen, want);
    }
}
