//! The outer driver: advances the reference window by window, invoking the
//! pileup engine and reads cursor, merging candidate calls, and feeding the
//! comparator. Grounded on `original_source`'s `main.cpp` loop.

use std::path::Path;

use log::{debug, info};
use rust_htslib::bam::{self, Read as BamRead};

use crate::alphabet::Symbol;
use crate::compare::{compare, ComparisonResult};
use crate::decode;
use crate::errors::{Error, Result};
use crate::groundtruth;
use crate::pileup::{get_alignments, ExpandedRecord, InsertionBucket, ReadsCursor, ResumeTable, WindowInsertions};
use crate::reference::Reference;
use crate::variant::{merge_candidate_maps, Action, CandidateMap, NonErrors};

#[derive(Debug, Clone, Copy)]
pub struct Params {
    pub min_reads: usize,
    pub lines_per_window: usize,
}

pub fn run(alignment: &Path, reference: &Path, ground_truth: &Path, params: &Params) -> Result<ComparisonResult> {
    let mut bam = bam::IndexedReader::from_path(alignment).map_err(|source| Error::AlignmentOpen {
        path: alignment.to_path_buf(),
        source,
    })?;

    let tid = 0u32;
    let ref_name = String::from_utf8_lossy(
        bam.header()
            .target_names()
            .first()
            .ok_or(Error::MissingReferenceName)?,
    )
    .into_owned();
    let ref_len = bam.header().target_len(tid).ok_or(Error::MissingReferenceName)?;

    let mut reference_reader = Reference::open(reference)?;
    let window_size = (reference_reader.line_len * params.lines_per_window) as u64;
    if window_size == 0 {
        return Err(Error::EmptyReference { path: reference.to_path_buf() });
    }

    let ground_truth_map = groundtruth::load(ground_truth)?;

    let mut resume_table = ResumeTable::new();
    let mut carried_insertions = InsertionBucket::new();
    let mut cursor = ReadsCursor::new();
    let mut result = ComparisonResult::default();

    let mut window_start = 0u64;
    while window_start < ref_len {
        let window_end = (window_start + window_size).min(ref_len);

        bam.fetch((tid, window_start as i64, window_end as i64))
            .map_err(|source| Error::AlignmentRegionQuery {
                reference: ref_name.clone(),
                from: window_start,
                to: window_end,
                source,
            })?;

        let mut expanded_records = Vec::new();
        for record in bam.records() {
            let record = match record {
                Ok(record) => record,
                Err(source) => {
                    return Err(Error::AlignmentRegionQuery {
                        reference: ref_name.clone(),
                        from: window_start,
                        to: window_end,
                        source,
                    })
                }
            };
            if record.is_unmapped() {
                debug!("skipping unmapped record at window [{}, {})", window_start, window_end);
                continue;
            }
            let decoded = decode::decode_record(&record);
            expanded_records.push(ExpandedRecord::from_decoded(&decoded));
        }

        let (starting_reads, insertions) =
            get_alignments(&expanded_records, window_start, window_end, &mut resume_table, carried_insertions);

        let mut candidates = CandidateMap::new();
        let mut non_errors = NonErrors::new();

        let ref_seq = reference_reader.read_lines(params.lines_per_window)?;
        for (offset, base) in ref_seq.chars().enumerate() {
            let cur_pos = window_start + offset as u64;
            if cur_pos >= window_end {
                break;
            }
            let starting = starting_reads.get(&cur_pos);
            let is_reported_mutation = ground_truth_map
                .get(&cur_pos)
                .map_or(false, |calls| calls.iter().any(|c| c.action != Action::Insertion));
            cursor.step(
                cur_pos,
                Symbol::from_char(base),
                params.min_reads,
                starting,
                is_reported_mutation,
                &mut candidates,
                &mut non_errors,
            );
        }

        let insertion_candidates =
            insertions.find_insertion_mutations(params.min_reads as u64, &ground_truth_map, &mut non_errors);
        merge_candidate_maps(&mut candidates, insertion_candidates);

        let window_result = compare(&ground_truth_map, &candidates, &non_errors, window_start, window_end);
        info!(
            "window [{}, {}): {} starting reads, {} candidate positions, {} missed, {} additional, {} mismatched",
            window_start,
            window_end,
            starting_reads.len(),
            candidates.len(),
            window_result.missed.len(),
            window_result.additional.len(),
            window_result.mismatched.len(),
        );
        result.merge(window_result);

        carried_insertions = insertions.next_window;
        window_start = window_end;
    }

    if !carried_insertions.is_empty() {
        let residual = WindowInsertions::with_carry_in(carried_insertions);
        let mut non_errors = NonErrors::new();
        let residual_candidates =
            residual.find_insertion_mutations(params.min_reads as u64, &ground_truth_map, &mut non_errors);
        let tail_result = compare(&ground_truth_map, &residual_candidates, &non_errors, window_start, u64::MAX);
        result.merge(tail_result);
    }

    Ok(result)
}
