#![no_main]

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use libfuzzer_sys::fuzz_target;

use bitset_rs::Sparse;

// Interprets a byte stream as an operation sequence against `Sparse`,
// checking every result against a `BTreeSet<u64>` ground-truth model. A
// secondary set is built alongside so union/difference/intersection get
// exercised with arbitrary operand shapes.
//
// Byte layout: `(opcode, key_lo, key_hi)` triples.
// - `opcode % 10` selects the operation (see the match below).
// - The 16-bit key is used as-is, or avalanched across the full 64-bit
//   range when the opcode's top bit is set, so both shallow and deep trie
//   paths are covered.
fuzz_target!(|data: &[u8]| {
    let mut primary = Sparse::new();
    let mut primary_model = BTreeSet::new();
    let mut secondary = Sparse::new();
    let mut secondary_model = BTreeSet::new();

    let mut chunks = data.chunks_exact(3);
    for chunk in &mut chunks {
        let opcode = chunk[0];
        let base = u16::from_le_bytes([chunk[1], chunk[2]]) as u64;
        let key = if opcode & 0x80 != 0 {
            base.wrapping_mul(0x9e37_79b9_7f4a_7c15)
        } else {
            base
        };

        match opcode % 10 {
            0 => {
                primary.add(key);
                primary_model.insert(key);
            }
            1 => {
                primary.remove(key);
                primary_model.remove(&key);
            }
            2 => {
                assert_eq!(
                    primary.contains(key),
                    primary_model.contains(&key),
                    "contains({key}) mismatch"
                );
            }
            3 => {
                assert_eq!(primary.len(), primary_model.len(), "len mismatch");
                assert_eq!(primary.is_empty(), primary_model.is_empty());
            }
            4 => {
                secondary.add(key);
                secondary_model.insert(key);
            }
            5 => {
                primary.union_in_place(&secondary);
                primary_model.extend(secondary_model.iter().copied());
            }
            6 => {
                primary.difference_in_place(&secondary);
                primary_model.retain(|k| !secondary_model.contains(k));
            }
            7 => {
                primary.intersect_in_place(&secondary);
                primary_model.retain(|k| secondary_model.contains(k));
            }
            8 => {
                secondary.clear();
                secondary_model.clear();
            }
            _ => {
                secondary = primary.clone();
                secondary_model = primary_model.clone();
            }
        }
    }

    // Final consistency check: identical membership in identical order.
    let mut got = Vec::with_capacity(primary.len());
    primary.for_each_element(|e| {
        got.push(e);
        ControlFlow::Continue(())
    });
    let want: Vec<u64> = primary_model.iter().copied().collect();
    assert_eq!(got, want, "final iteration mismatch");
    assert_eq!(primary.len(), primary_model.len(), "final len mismatch");
});
