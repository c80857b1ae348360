use std::path::Path;

use crate::error::Result;
use crate::input::load_mutations;
use crate::model::records::MutationRecord;
use crate::model::wide::{WideRow, WideTable};

/// Long form to wide form: one row per position, one cell per code.
///
/// Codes outside A/C/G/T are kept as extra cells. Absent combinations stay
/// `None`; duplicates (not expected after normalization) are summed.
pub fn pivot_frequencies(records: &[MutationRecord]) -> WideTable {
    let mut table = WideTable::default();
    for record in records {
        table
            .rows
            .entry(record.pos)
            .or_insert_with(WideRow::default)
            .add(record.mutation, record.freq);
    }
    table
}

/// Loads, normalizes and pivots one mutation-frequency file.
pub fn load_wide_table(path: &Path) -> Result<WideTable> {
    let table = load_mutations(path)?;
    Ok(pivot_frequencies(&table.records))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_pivot.rs"]
mod tests;
