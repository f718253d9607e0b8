//! Reconciles the candidate call set against the ground-truth set,
//! producing missed/additional/mismatched lists with per-site evidence.
//! Grounded on SPEC_FULL.md §4.6, which departs from `original_source`'s
//! `Comparator` by iterating a sorted map with `continue` rather than
//! `break` on out-of-range positions (see DESIGN.md).

use crate::counter::BaseCounter;
use crate::variant::{Action, Candidate, CandidateMap, GroundTruthCall, GroundTruthMap, NonErrors};

#[derive(Debug, Clone, PartialEq)]
pub struct Missed {
    pub pos: u64,
    pub ground_truth: GroundTruthCall,
    pub evidence: BaseCounter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Additional {
    pub pos: u64,
    pub candidate: Candidate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mismatched {
    pub pos: u64,
    pub ground_truth: GroundTruthCall,
    pub candidate: Candidate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonResult {
    pub missed: Vec<Missed>,
    pub additional: Vec<Additional>,
    pub mismatched: Vec<Mismatched>,
}

impl ComparisonResult {
    pub fn merge(&mut self, other: ComparisonResult) {
        self.missed.extend(other.missed);
        self.additional.extend(other.additional);
        self.mismatched.extend(other.mismatched);
    }
}

pub fn compare(
    ground_truth: &GroundTruthMap,
    candidate: &CandidateMap,
    non_errors: &NonErrors,
    from: u64,
    to: u64,
) -> ComparisonResult {
    let mut result = ComparisonResult::default();
    let mut consumed: std::collections::HashSet<(u64, usize)> = std::collections::HashSet::new();

    for (&pos, truths) in ground_truth.range(from..to) {
        let candidates_at_pos = candidate.get(&pos);

        for truth in truths {
            let exact = candidates_at_pos.and_then(|calls| {
                calls.iter().enumerate().find(|(i, c)| {
                    !consumed.contains(&(pos, *i)) && c.symbol.as_char() == truth.symbol && c.action == truth.action
                })
            });

            if let Some((i, _)) = exact {
                consumed.insert((pos, i));
                continue;
            }

            let action_only = candidates_at_pos.and_then(|calls| {
                calls
                    .iter()
                    .enumerate()
                    .find(|(i, c)| !consumed.contains(&(pos, *i)) && c.action == truth.action)
            });

            if let Some((i, candidate)) = action_only {
                consumed.insert((pos, i));
                result.mismatched.push(Mismatched {
                    pos,
                    ground_truth: *truth,
                    candidate: candidate.clone(),
                });
                continue;
            }

            result.missed.push(Missed {
                pos,
                ground_truth: *truth,
                evidence: non_errors.get(&pos).cloned().unwrap_or_default(),
            });
        }
    }

    for (&pos, calls) in candidate.range(from..to) {
        for (i, call) in calls.iter().enumerate() {
            if !consumed.contains(&(pos, i)) {
                result.additional.push(Additional { pos, candidate: call.clone() });
            }
        }
    }

    result
}
