//! The streaming pileup engine: reconstructs per-reference-position read
//! contributions from alignment records and aggregates per-position call
//! evidence across a sliding window. See SPEC_FULL.md §4.3-§4.5.

pub mod cursor;
pub mod insertions;
pub mod resume;
pub mod window;

pub use cursor::{ReadCursorEntry, ReadsCursor};
pub use insertions::{InsertionBucket, WindowInsertions};
pub use resume::{ResumeEntry, ResumeTable};
pub use window::{get_alignments, ExpandedRecord, StartingReads};
