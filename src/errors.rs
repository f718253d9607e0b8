use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to open alignment file {path}: {source}")]
    AlignmentOpen {
        path: PathBuf,
        #[source]
        source: rust_htslib::errors::Error,
    },
    #[error("failed to query alignment region {reference}:{from}-{to}: {source}")]
    AlignmentRegionQuery {
        reference: String,
        from: u64,
        to: u64,
        #[source]
        source: rust_htslib::errors::Error,
    },
    #[error("failed to open reference fasta {path}: {source}")]
    ReferenceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("reference fasta {path} contains no sequence lines")]
    EmptyReference { path: PathBuf },
    #[error("failed to open ground-truth variant file {path}: {source}")]
    VariantsOpen {
        path: PathBuf,
        #[source]
        source: rust_htslib::errors::Error,
    },
    #[error("failed to read variant record: {source}")]
    VariantRead {
        #[source]
        source: rust_htslib::errors::Error,
    },
    #[error("failed to write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("alignment header does not name a reference sequence")]
    MissingReferenceName,
}

pub type Result<T> = std::result::Result<T, Error>;
