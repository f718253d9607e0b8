//! Loads and normalizes the third-party ground-truth variant set. Grounded
//! on `original_source`'s `FilesManipulator::readFreeBayesVCF` and
//! `getVCFInsertions`.

use std::path::Path;

use log::debug;
use rust_htslib::bcf::{self, Read as BcfRead};

use crate::errors::{Error, Result};
use crate::variant::{Action, GroundTruthCall, GroundTruthMap};

pub fn load(path: &Path) -> Result<GroundTruthMap> {
    let mut reader = bcf::Reader::from_path(path).map_err(|source| Error::VariantsOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut map = GroundTruthMap::new();
    let mut record = reader.empty_record();

    loop {
        match reader.read(&mut record) {
            None => break,
            Some(Ok(())) => {}
            Some(Err(source)) => return Err(Error::VariantRead { source }),
        }

        let pos = record.pos() as u64;
        let alleles = record.alleles();
        if alleles.len() < 2 {
            debug!("no ALT alleles at pos {}, skipping", pos);
            continue;
        }

        let reference = alleles[0];
        let alt = alleles[1];

        if let Some(call) = normalize(reference, alt) {
            map.entry(pos + call.0).or_default().push(call.1);
        }
    }

    Ok(map)
}

/// Returns `(position offset, call)`. The offset is 0 for plain
/// substitutions (anchored at the VCF position itself) and 1 for indel/
/// complex calls (anchored one base past it, matching `original_source`).
fn normalize(reference: &[u8], alt: &[u8]) -> Option<(u64, GroundTruthCall)> {
    if reference.len() == 1 && alt.len() == 1 {
        return Some((0, GroundTruthCall { symbol: alt[0] as char, action: Action::Substitution }));
    }

    let len_diff = reference.len().abs_diff(alt.len());
    if len_diff >= 2 {
        return Some((1, GroundTruthCall { symbol: 'U', action: Action::Complex }));
    }
    if reference.len() > alt.len() {
        return Some((1, GroundTruthCall { symbol: '-', action: Action::Deletion }));
    }
    if reference.len() < alt.len() {
        let inserted = xor_alleles(reference, alt);
        return Some((1, GroundTruthCall { symbol: inserted as char, action: Action::Insertion }));
    }
    None
}

/// Recovers the inserted base as the XOR of every REF and ALT character.
/// When exactly one base differs between an otherwise-equal-length-minus-one
/// pair, this cancels the shared bases and leaves the inserted one.
fn xor_alleles(reference: &[u8], alt: &[u8]) -> u8 {
    let mut diff = 0u8;
    for &b in reference {
        diff ^= b;
    }
    for &b in alt {
        diff ^= b;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_base_substitution() {
        let (offset, call) = normalize(b"A", b"G").unwrap();
        assert_eq!(offset, 0);
        assert_eq!(call.symbol, 'G');
        assert_eq!(call.action, Action::Substitution);
    }

    #[test]
    fn single_base_deletion() {
        let (offset, call) = normalize(b"AG", b"A").unwrap();
        assert_eq!(offset, 1);
        assert_eq!(call.symbol, '-');
        assert_eq!(call.action, Action::Deletion);
    }

    #[test]
    fn single_base_insertion_recovers_inserted_base() {
        let (offset, call) = normalize(b"A", b"AG").unwrap();
        assert_eq!(offset, 1);
        assert_eq!(call.symbol, 'G');
        assert_eq!(call.action, Action::Insertion);
    }

    #[test]
    fn multi_base_difference_is_complex() {
        let (offset, call) = normalize(b"ATG", b"A").unwrap();
        assert_eq!(offset, 1);
        assert_eq!(call.symbol, 'U');
        assert_eq!(call.action, Action::Complex);
    }
}
