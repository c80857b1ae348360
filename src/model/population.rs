use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::model::nucleotide::Nucleotide;
use crate::model::wide::WideRow;

/// Outer join of the per-file wide tables on position.
///
/// `rows[pos][i]` holds the cells of training file `i`; a file that never
/// reported the position contributes an all-missing row. Column `X_i` of the
/// joined table is code `X` of file `i`.
#[derive(Debug, Clone, Default)]
pub struct PopulationMatrix {
    pub files: Vec<PathBuf>,
    pub rows: BTreeMap<i64, Vec<WideRow>>,
}

impl PopulationMatrix {
    pub fn n_files(&self) -> usize {
        self.files.len()
    }

    pub fn n_positions(&self) -> usize {
        self.rows.len()
    }

    /// Distinct `code_fileindex` columns with at least one value.
    pub fn n_columns(&self) -> usize {
        let mut columns = BTreeSet::new();
        for cells in self.rows.values() {
            for (file_idx, row) in cells.iter().enumerate() {
                for nt in Nucleotide::ALL {
                    if row.get(nt).is_some() {
                        columns.insert((nt.code(), file_idx));
                    }
                }
                for code in row.extra.keys() {
                    columns.insert((*code, file_idx));
                }
            }
        }
        columns.len()
    }

    pub fn present_cells(cells: &[WideRow]) -> usize {
        cells.iter().map(WideRow::present_cells).sum()
    }

    /// Values of one channel across all files at a position.
    pub fn channel_values(
        cells: &[WideRow],
        nt: Nucleotide,
    ) -> impl Iterator<Item = Option<f64>> + '_ {
        cells.iter().map(move |row| row.get(nt))
    }
}
