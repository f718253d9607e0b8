//! Candidate and ground-truth variant representations shared by the pileup
//! engine, insertion aggregator, and comparator.

use std::collections::BTreeMap;

use crate::alphabet::Symbol;
use crate::counter::BaseCounter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Substitution,
    Deletion,
    Insertion,
    /// A multi-base REF/ALT change too large to normalize to a single
    /// substitution/indel; ground-truth only, never produced as a candidate.
    Complex,
}

impl Action {
    pub fn as_char(self) -> char {
        match self {
            Action::Substitution => 'X',
            Action::Deletion => 'D',
            Action::Insertion => 'I',
            Action::Complex => 'C',
        }
    }
}

/// One call produced by this tool, with the base-count evidence that led to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub symbol: Symbol,
    pub action: Action,
    pub evidence: BaseCounter,
}

/// One call from the third-party ground-truth set. `symbol` is a raw
/// character rather than [`Symbol`] because the complex-change marker `U`
/// falls outside the five-symbol pileup alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundTruthCall {
    pub symbol: char,
    pub action: Action,
}

pub type CandidateMap = BTreeMap<u64, Vec<Candidate>>;
pub type GroundTruthMap = BTreeMap<u64, Vec<GroundTruthCall>>;

/// Positions where the chosen consensus agreed with the reference despite
/// the ground truth expecting a mutation there; carried through to the
/// comparator so a `missed` row can still report the supporting counts.
pub type NonErrors = BTreeMap<u64, BaseCounter>;

pub fn merge_candidate_maps(into: &mut CandidateMap, other: CandidateMap) {
    for (pos, mut calls) in other {
        into.entry(pos).or_default().append(&mut calls);
    }
}
