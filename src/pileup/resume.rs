//! Cross-window resume state for reads whose alignment straddles a window
//! boundary. Grounded on `original_source`'s `cigarIndices`, but threaded by
//! value through the orchestrator rather than kept as a process-wide static
//! (see SPEC_FULL.md §9).

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResumeEntry {
    pub op_index: usize,
    pub consumed_within_op: u32,
    pub read_chars_consumed: usize,
}

pub type ResumeTable = HashMap<String, ResumeEntry>;
