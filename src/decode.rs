//! Decodes one alignment record into its expanded-read form.
//!
//! Grounded on `original_source`'s `FilesManipulator::getRead` (4-bit base
//! decoding) and `FilesManipulator::getExpandedRead` (clip stripping and
//! deletion materialization). The insertion-free projection is deliberately
//! *not* produced here — see SPEC_FULL.md §4.2 — it is built by
//! [`crate::pileup`] while walking the same op list a second time.

use rust_htslib::bam;

use crate::cigar::{self, Op, OpKind};

#[derive(Debug, Clone)]
pub struct DecodedRead {
    pub start: i64,
    pub name: String,
    pub ops: Vec<Op>,
    /// Raw per-base characters, 4-bit codes decoded 1/2/4/8/15 -> A/C/G/T/N,
    /// anything else -> '?'.
    pub bases: Vec<u8>,
}

pub fn decode_record(record: &bam::Record) -> DecodedRead {
    let seq = record.seq();
    let bases: Vec<u8> = (0..seq.len())
        .map(|i| match seq.encoded_base(i) {
            1 => b'A',
            2 => b'C',
            4 => b'G',
            8 => b'T',
            15 => b'N',
            _ => b'?',
        })
        .collect();

    DecodedRead {
        start: record.pos(),
        name: String::from_utf8_lossy(record.qname()).into_owned(),
        ops: cigar::from_htslib(record.cigar().iter().as_slice()),
        bases,
    }
}

/// Strip leading/trailing clips and materialize deletions as gap
/// characters. Match and Insert ops both consume-and-append read characters
/// at this stage; the pileup engine splits insertions out later.
pub fn expand(ops: &[Op], bases: &[u8]) -> (Vec<Op>, String) {
    let mut ops = ops.to_vec();
    let mut bases_start = 0usize;
    let mut bases_end = bases.len();

    if let Some(first) = ops.first() {
        if matches!(first.kind, OpKind::SoftClip) {
            bases_start += first.len as usize;
            ops.remove(0);
        } else if matches!(first.kind, OpKind::HardClip) {
            ops.remove(0);
        }
    }
    if let Some(last) = ops.last() {
        if matches!(last.kind, OpKind::SoftClip) {
            bases_end -= last.len as usize;
            ops.pop();
        } else if matches!(last.kind, OpKind::HardClip) {
            ops.pop();
        }
    }

    let bases = &bases[bases_start..bases_end];
    let mut expanded = String::with_capacity(bases.len());
    let mut read_idx = 0usize;
    for op in &ops {
        match op.kind {
            OpKind::Delete => {
                expanded.extend(std::iter::repeat('-').take(op.len as usize));
            }
            OpKind::Match | OpKind::Insert => {
                let end = read_idx + op.len as usize;
                expanded.push_str(std::str::from_utf8(&bases[read_idx..end]).unwrap());
                read_idx = end;
            }
            OpKind::SoftClip | OpKind::HardClip => {
                // only possible if clips appear mid-list, which htslib never emits;
                // treated as a no-op read-consuming clip to stay total.
                if matches!(op.kind, OpKind::SoftClip) {
                    read_idx += op.len as usize;
                }
            }
        }
    }

    (ops, expanded)
}
