//! The windowed pileup engine: walks each record's op list against a
//! `[from, to)` reference window, building the insertion-free projection
//! that the reads cursor will later consume and routing insertion evidence
//! to the insertion aggregator. Grounded on `original_source`'s
//! `FilesManipulator::getAlignments`, with the algebraic `ref_idx` form
//! replaced by the explicit-cursor form (SPEC_FULL.md §9).

use std::collections::{BTreeMap, BTreeSet};

use crate::cigar::{Op, OpKind};
use crate::decode::{self, DecodedRead};
use crate::pileup::insertions::{InsertionBucket, WindowInsertions};
use crate::pileup::resume::{ResumeEntry, ResumeTable};

pub type StartingReads = BTreeMap<u64, BTreeSet<(String, String)>>;

/// A record after decoder-stage expansion: clips stripped, deletions
/// materialized as gaps, insertions still embedded in `expanded`.
#[derive(Debug, Clone)]
pub struct ExpandedRecord {
    pub start: u64,
    pub name: String,
    pub ops: Vec<Op>,
    pub expanded: String,
}

impl ExpandedRecord {
    pub fn from_decoded(read: &DecodedRead) -> Self {
        let (ops, expanded) = decode::expand(&read.ops, &read.bases);
        ExpandedRecord {
            start: read.start.max(0) as u64,
            name: read.name.clone(),
            ops,
            expanded,
        }
    }
}

pub fn get_alignments<'a, I>(
    records: I,
    from: u64,
    to: u64,
    resume_table: &mut ResumeTable,
    carried_insertions: InsertionBucket,
) -> (StartingReads, WindowInsertions)
where
    I: IntoIterator<Item = &'a ExpandedRecord>,
{
    let mut starting_reads = StartingReads::new();
    let mut insertions = WindowInsertions::with_carry_in(carried_insertions);

    for record in records {
        process_record(record, from, to, resume_table, &mut insertions, &mut starting_reads);
    }

    (starting_reads, insertions)
}

fn process_record(
    record: &ExpandedRecord,
    from: u64,
    to: u64,
    resume_table: &mut ResumeTable,
    insertions: &mut WindowInsertions,
    starting_reads: &mut StartingReads,
) {
    let (ops, expanded, mut start_pos, prior_spliced_ops, prior_spliced_read_chars);

    if let Some(resume) = resume_table.remove(&record.name) {
        let mut spliced_ops = record.ops[resume.op_index..].to_vec();
        if let Some(head) = spliced_ops.first_mut() {
            head.len -= resume.consumed_within_op;
        }
        ops = spliced_ops;
        expanded = record.expanded[resume.read_chars_consumed..].to_string();
        start_pos = from;
        prior_spliced_ops = resume.op_index;
        prior_spliced_read_chars = resume.read_chars_consumed;
    } else {
        if record.start < from {
            return;
        }
        ops = record.ops.clone();
        expanded = record.expanded.clone();
        start_pos = record.start;
        prior_spliced_ops = 0;
        prior_spliced_read_chars = 0;
    }

    let ref_start = start_pos;
    if let Some(first) = ops.first() {
        if matches!(first.kind, OpKind::Insert) {
            start_pos += first.len as u64;
        }
    }

    let mut ref_idx = ref_start;
    let mut read_idx: usize = 0;
    let mut read_from: usize = 0;
    let mut projection = String::new();

    for (i, op) in ops.iter().enumerate() {
        let len = op.len;
        let reaches_end = ref_idx + len as u64 >= to;

        match op.kind {
            OpKind::Insert => {
                let end = len;
                let left = if reaches_end { (to - ref_idx) as u32 } else { len };
                projection.push_str(&expanded[read_from..read_idx]);
                insertions.add_insertion(ref_idx, read_idx, &expanded, &record.name, end, left, true);
                read_from = read_idx + len as usize;
                read_idx += len as usize;
            }
            OpKind::Match | OpKind::Delete => {
                if reaches_end {
                    let left = (to - ref_idx) as u32;
                    insertions.add_insertion(ref_idx, read_idx, &expanded, &record.name, left, left, false);
                    resume_table.insert(
                        record.name.clone(),
                        ResumeEntry {
                            op_index: i + prior_spliced_ops,
                            consumed_within_op: left,
                            read_chars_consumed: read_idx + left as usize + prior_spliced_read_chars,
                        },
                    );
                    return;
                }
                insertions.add_insertion(ref_idx, read_idx, &expanded, &record.name, len, len, false);
                ref_idx += len as u64;
                read_idx += len as usize;
            }
            OpKind::SoftClip | OpKind::HardClip => {
                // the decoder already strips leading/trailing clips; none
                // should survive into this walk.
            }
        }
    }

    projection.push_str(&expanded[read_from..read_idx]);
    starting_reads
        .entry(start_pos)
        .or_default()
        .insert((projection, record.name.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(start: u64, name: &str, ops: Vec<Op>, expanded: &str) -> ExpandedRecord {
        ExpandedRecord {
            start,
            name: name.to_string(),
            ops,
            expanded: expanded.to_string(),
        }
    }

    #[test]
    fn record_fully_inside_window_projects_without_insertions() {
        let rec = record(0, "r1", vec![Op::new(OpKind::Match, 9)], "AAAAGAAAA");
        let mut resume = ResumeTable::new();
        let (starting, insertions) = get_alignments([&rec], 0, 100, &mut resume, InsertionBucket::new());
        let entry = starting.get(&0).unwrap();
        assert!(entry.contains(&("AAAAGAAAA".to_string(), "r1".to_string())));
        assert!(insertions.indices.is_empty());
        assert!(resume.is_empty());
    }

    #[test]
    fn deletion_gap_passes_through_projection() {
        let rec = record(
            0,
            "r1",
            vec![Op::new(OpKind::Match, 3), Op::new(OpKind::Delete, 1), Op::new(OpKind::Match, 4)],
            "ACG-ACGT",
        );
        let mut resume = ResumeTable::new();
        let (starting, _) = get_alignments([&rec], 0, 100, &mut resume, InsertionBucket::new());
        let entry = starting.get(&0).unwrap();
        assert!(entry.contains(&("ACG-ACGT".to_string(), "r1".to_string())));
    }

    #[test]
    fn insertion_is_excluded_from_projection_and_routed_to_aggregator() {
        let rec = record(
            0,
            "r1",
            vec![Op::new(OpKind::Match, 4), Op::new(OpKind::Insert, 2), Op::new(OpKind::Match, 4)],
            "ACGTGGACGT",
        );
        let mut resume = ResumeTable::new();
        let (starting, insertions) = get_alignments([&rec], 0, 100, &mut resume, InsertionBucket::new());
        let entry = starting.get(&0).unwrap();
        assert!(entry.contains(&("ACGTACGT".to_string(), "r1".to_string())));
        assert_eq!(insertions.indices.len(), 2);
        assert!(insertions.this_window.contains_key(&4));
        assert!(insertions.this_window.contains_key(&5));
    }

    #[test]
    fn leading_insertion_shifts_effective_start_but_not_insertion_anchor() {
        let rec = record(
            0,
            "r1",
            vec![Op::new(OpKind::Insert, 2), Op::new(OpKind::Match, 4)],
            "GGACGT",
        );
        let mut resume = ResumeTable::new();
        let (starting, insertions) = get_alignments([&rec], 0, 100, &mut resume, InsertionBucket::new());
        assert!(starting.get(&0).is_none());
        let entry = starting.get(&2).unwrap();
        assert!(entry.contains(&("ACGT".to_string(), "r1".to_string())));
        assert!(insertions.this_window.contains_key(&0));
        assert!(insertions.this_window.contains_key(&1));
    }

    #[test]
    fn record_crossing_boundary_resumes_in_next_window() {
        let rec = record(60, "r1", vec![Op::new(OpKind::Match, 80)], &"A".repeat(80));
        let mut resume = ResumeTable::new();
        let (starting, _) = get_alignments([&rec], 0, 100, &mut resume, InsertionBucket::new());
        assert!(starting.is_empty());
        let entry = resume.get("r1").unwrap();
        assert_eq!(entry.consumed_within_op, 40);
        assert_eq!(entry.read_chars_consumed, 40);

        let (starting2, _) = get_alignments([&rec], 100, 200, &mut resume, InsertionBucket::new());
        let entry2 = starting2.get(&100).unwrap();
        assert!(entry2.contains(&("A".repeat(40), "r1".to_string())));
        assert!(resume.is_empty());
    }
}
