//! Per-window insertion evidence, aggregated separately from the ordinary
//! substitution/deletion pass since an insertion's reference anchor lies
//! between two reference coordinates. Grounded on `original_source`'s
//! `Insertions` (`Structures.h`) and the insertion half of
//! `FilesManipulator::getAlignments`.

use std::collections::{BTreeMap, BTreeSet};

use crate::alphabet::Symbol;
use crate::counter::BaseCounter;
use crate::variant::{Action, Candidate, CandidateMap, GroundTruthMap, NonErrors};

pub type InsertionBucket = BTreeMap<u64, (BaseCounter, BTreeSet<String>)>;

#[derive(Debug, Clone, Default)]
pub struct WindowInsertions {
    pub this_window: InsertionBucket,
    pub next_window: InsertionBucket,
    pub indices: BTreeSet<u64>,
}

impl WindowInsertions {
    pub fn with_carry_in(carried: InsertionBucket) -> Self {
        WindowInsertions {
            this_window: carried,
            next_window: InsertionBucket::new(),
            indices: BTreeSet::new(),
        }
    }

    /// `end`/`left` split an op's span between `this_window` (the first
    /// `left` offsets) and `next_window` (the rest), per SPEC_FULL.md §4.5.
    pub fn add_insertion(
        &mut self,
        ref_idx: u64,
        read_idx: usize,
        expanded: &str,
        name: &str,
        end: u32,
        left: u32,
        is_insertion: bool,
    ) {
        if left != end {
            self.add_values(ref_idx, read_idx, expanded, name, 0, left, is_insertion, true);
            self.add_values(ref_idx, read_idx, expanded, name, left, end, is_insertion, false);
        } else {
            self.add_values(ref_idx, read_idx, expanded, name, 0, end, is_insertion, true);
        }
    }

    fn add_values(
        &mut self,
        ref_idx: u64,
        read_idx: usize,
        expanded: &str,
        name: &str,
        start: u32,
        end: u32,
        is_insertion: bool,
        in_this_window: bool,
    ) {
        let bucket = if in_this_window { &mut self.this_window } else { &mut self.next_window };
        let bytes = expanded.as_bytes();
        for i in start..end {
            let pos = ref_idx + i as u64;
            let entry = bucket.entry(pos).or_insert_with(|| (BaseCounter::new(), BTreeSet::new()));
            if is_insertion {
                let sym = Symbol::from_char(bytes[read_idx + i as usize] as char);
                entry.0.increase(sym);
                entry.1.insert(name.to_string());
                self.indices.insert(pos);
            } else if !entry.1.contains(name) {
                entry.0.increase(Symbol::Gap);
            }
        }
    }

    /// Resolve a consensus insertion call at each position touched this
    /// window. Positions with no non-gap majority but a ground-truth
    /// insertion land in `non_errors` instead of being silently dropped.
    pub fn find_insertion_mutations(
        &self,
        min_reads: u64,
        ground_truth: &GroundTruthMap,
        non_errors: &mut NonErrors,
    ) -> CandidateMap {
        let mut out = CandidateMap::new();
        for &pos in &self.indices {
            let counter = match self.this_window.get(&pos) {
                Some((counter, _)) => counter.clone(),
                None => continue,
            };
            if counter.total() < min_reads {
                continue;
            }
            let symbol = counter.find_max(Symbol::Gap);
            if symbol != Symbol::Gap {
                out.entry(pos).or_default().push(Candidate {
                    symbol,
                    action: Action::Insertion,
                    evidence: counter,
                });
            } else if ground_truth
                .get(&pos)
                .map_or(false, |calls| calls.iter().any(|c| c.action == Action::Insertion))
            {
                non_errors.entry(pos).or_default().merge(&counter);
            }
        }
        out
    }
}
