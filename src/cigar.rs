//! Alignment operations, decoupled from `rust-htslib`'s `Cigar` type so the
//! pileup engine (see [`crate::pileup`]) can be exercised with synthetic op
//! lists in tests without constructing real BAM records.

use rust_htslib::bam::record::Cigar as HtsCigar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Match,
    Insert,
    Delete,
    SoftClip,
    HardClip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Op {
    pub kind: OpKind,
    pub len: u32,
}

impl Op {
    pub fn new(kind: OpKind, len: u32) -> Self {
        Op { kind, len }
    }
}

/// Convert an htslib CIGAR into our op list, folding `=`/`X` into `Match` and
/// silently dropping operations this spec does not model (`RefSkip`, `Pad`) —
/// per SPEC_FULL.md §4.2, the decoder never errors on an unrecognized op.
pub fn from_htslib(cigar: &[HtsCigar]) -> Vec<Op> {
    cigar
        .iter()
        .filter_map(|c| {
            let (kind, len) = match c {
                HtsCigar::Match(l) | HtsCigar::Equal(l) | HtsCigar::Diff(l) => (OpKind::Match, *l),
                HtsCigar::Ins(l) => (OpKind::Insert, *l),
                HtsCigar::Del(l) => (OpKind::Delete, *l),
                HtsCigar::SoftClip(l) => (OpKind::SoftClip, *l),
                HtsCigar::HardClip(l) => (OpKind::HardClip, *l),
                HtsCigar::RefSkip(_) | HtsCigar::Pad(_) => return None,
            };
            Some(Op::new(kind, len))
        })
        .collect()
}
