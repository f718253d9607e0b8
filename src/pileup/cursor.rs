//! The live list of reads overlapping the current scan position. Advances
//! one reference position at a time, folding base evidence into a
//! [`BaseCounter`] and emitting a candidate call when the consensus departs
//! from the reference. Grounded on the read-retirement loop inside
//! `original_source`'s `FilesManipulator::getAlignments` main scan.

use std::collections::BTreeSet;

use crate::alphabet::Symbol;
use crate::counter::BaseCounter;
use crate::variant::{Action, Candidate, CandidateMap, NonErrors};

#[derive(Debug, Clone)]
pub struct ReadCursorEntry {
    pub index: usize,
    pub end_pos: u64,
    pub sequence: String,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReadsCursor {
    entries: Vec<ReadCursorEntry>,
}

impl ReadsCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.entries.len()
    }

    /// Advance the cursor by one reference position. `starting` is the set
    /// of `(insertion-free sequence, name)` pairs whose effective start is
    /// exactly `cur_pos`, if any.
    pub fn step(
        &mut self,
        cur_pos: u64,
        ref_base: Symbol,
        min_reads: usize,
        starting: Option<&BTreeSet<(String, String)>>,
        is_reported_mutation: bool,
        candidates: &mut CandidateMap,
        non_errors: &mut NonErrors,
    ) {
        if let Some(starting) = starting {
            for (sequence, name) in starting {
                let end_pos = cur_pos + sequence.chars().count() as u64 - 1;
                self.entries.push(ReadCursorEntry {
                    index: 0,
                    end_pos,
                    sequence: sequence.clone(),
                    name: name.clone(),
                });
            }
        }

        let relevant = self.entries.len() >= min_reads;
        let mut counter = BaseCounter::new();

        let mut i = 0;
        while i < self.entries.len() {
            let retire = {
                let entry = &self.entries[i];
                if relevant {
                    let ch = entry.sequence.as_bytes()[entry.index] as char;
                    counter.increase(Symbol::from_char(ch));
                }
                entry.end_pos == cur_pos
            };
            if retire {
                self.entries.remove(i);
            } else {
                self.entries[i].index += 1;
                i += 1;
            }
        }

        if !relevant {
            return;
        }

        let chosen = counter.find_max(ref_base);
        if chosen != ref_base {
            let action = if chosen == Symbol::Gap { Action::Deletion } else { Action::Substitution };
            candidates.entry(cur_pos).or_default().push(Candidate {
                symbol: chosen,
                action,
                evidence: counter,
            });
        } else if is_reported_mutation {
            non_errors.entry(cur_pos).or_default().merge(&counter);
        }
    }
}
