//! CSV report writer. Grounded on `original_source`'s
//! `FilesManipulator::saveToCsv`: one row per discrepancy, base-count
//! columns in alphabet order, expected-symbol columns populated only on
//! `Error` rows.

use std::io::Write;
use std::path::Path;

use crate::alphabet::Symbol;
use crate::compare::ComparisonResult;
use crate::counter::BaseCounter;
use crate::errors::{Error, Result};

const HEADER: &[&str] = &["Type", "Index", "Action", "Symbol", "-", "A", "C", "G", "T", "Expected Nucleo", "Expected Action"];

pub fn write<W: Write>(writer: W, result: &ComparisonResult, report_path_for_errors: &Path) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let map_err = |source: csv::Error| Error::ReportWrite { path: report_path_for_errors.to_path_buf(), source };

    csv_writer.write_record(HEADER).map_err(map_err)?;

    let mut rows: Vec<(u64, Vec<String>)> = Vec::new();

    for missed in &result.missed {
        rows.push((
            missed.pos,
            row(
                "Missed",
                missed.pos,
                missed.ground_truth.action.as_char(),
                missed.ground_truth.symbol,
                &missed.evidence,
                None,
            ),
        ));
    }

    for additional in &result.additional {
        rows.push((
            additional.pos,
            row(
                "Additional",
                additional.pos,
                additional.candidate.action.as_char(),
                additional.candidate.symbol.as_char(),
                &additional.candidate.evidence,
                None,
            ),
        ));
    }

    for mismatched in &result.mismatched {
        rows.push((
            mismatched.pos,
            row(
                "Error",
                mismatched.pos,
                mismatched.candidate.action.as_char(),
                mismatched.candidate.symbol.as_char(),
                &mismatched.candidate.evidence,
                Some((mismatched.ground_truth.symbol, mismatched.ground_truth.action.as_char())),
            ),
        ));
    }

    rows.sort_by_key(|(pos, _)| *pos);

    for (_, fields) in rows {
        csv_writer.write_record(&fields).map_err(map_err)?;
    }

    csv_writer.flush().map_err(|source| Error::ReportWrite {
        path: report_path_for_errors.to_path_buf(),
        source: source.into(),
    })?;
    Ok(())
}

fn row(
    kind: &str,
    pos: u64,
    action: char,
    symbol: char,
    evidence: &BaseCounter,
    expected: Option<(char, char)>,
) -> Vec<String> {
    let counts = evidence.counts();
    let mut fields = vec![kind.to_string(), pos.to_string(), action.to_string(), symbol.to_string()];
    for symbol in [Symbol::Gap, Symbol::A, Symbol::C, Symbol::G, Symbol::T] {
        fields.push(counts[symbol.index()].to_string());
    }
    match expected {
        Some((symbol, action)) => {
            fields.push(symbol.to_string());
            fields.push(action.to_string());
        }
        None => {
            fields.push(String::new());
            fields.push(String::new());
        }
    }
    fields
}
