//! Per-position base-count accumulator and consensus selection.
//!
//! Grounded on `original_source`'s `NucleoCounter` (`Structures.h`,
//! `FilesReader.h`): a fixed five-slot tally with a `findMax` consensus rule
//! that prefers the reference base below a 50% majority, breaks exact ties
//! against the reference, and otherwise returns the alphabetically-lowest
//! winner.

use crate::alphabet::{Symbol, ALPHABET};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseCounter {
    counts: [u64; Symbol::COUNT],
}

impl BaseCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn increase(&mut self, symbol: Symbol) {
        self.counts[symbol.index()] += 1;
    }

    pub fn merge(&mut self, other: &BaseCounter) {
        for i in 0..Symbol::COUNT {
            self.counts[i] += other.counts[i];
        }
    }

    #[inline]
    pub fn count(&self, symbol: Symbol) -> u64 {
        self.counts[symbol.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Raw counts in alphabet order (gap, A, C, G, T), as written to the CSV report.
    pub fn counts(&self) -> [u64; Symbol::COUNT] {
        self.counts
    }

    /// Select a consensus symbol given `ref_base`. See module docs and
    /// SPEC_FULL.md §4.1 for the exact tie-break rule; calling this with
    /// `Symbol::Gap` as `ref_base` is how insertion evidence biases ties
    /// towards the non-gap winner, with no separate flag required.
    pub fn find_max(&self, ref_base: Symbol) -> Symbol {
        let total = self.total();
        if total == 0 {
            return ref_base;
        }

        let max = *self.counts.iter().max().unwrap();
        let mut winners: Vec<Symbol> = ALPHABET
            .iter()
            .copied()
            .filter(|s| self.count(*s) == max)
            .collect();
        winners.sort();

        // ratio = max / total, compared against 1/2 via integer arithmetic
        // to avoid floating point edge cases at the exact tie.
        if 2 * max < total {
            return ref_base;
        }
        if 2 * max > total || winners.len() == 1 {
            return winners[0];
        }
        // ratio == 0.5 and multiple winners: prefer a non-reference winner.
        for winner in &winners {
            if *winner != ref_base {
                return *winner;
            }
        }
        ref_base
    }
}
