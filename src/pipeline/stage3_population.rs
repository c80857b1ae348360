use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::input::list_training_files;
use crate::model::population::PopulationMatrix;
use crate::model::thresholds::ThresholdProfile;
use crate::model::wide::{WideRow, WideTable};
use crate::pipeline::stage2_pivot::load_wide_table;

#[derive(Debug)]
pub struct Stage3Output {
    pub matrix: PopulationMatrix,
    pub n_positions_joined: usize,
}

/// Builds the training population from every `*.csv` in `training_dir`.
pub fn run_stage3(
    training_dir: &Path,
    exclude: Option<&Path>,
    thresholds: &ThresholdProfile,
) -> Result<Stage3Output> {
    let files = list_training_files(training_dir, exclude)?;
    let mut tables = Vec::with_capacity(files.len());
    for (idx, path) in files.iter().enumerate() {
        let table = load_wide_table(path)?;
        tracing::info!(
            "training file {}: {} ({} positions)",
            idx,
            path.display(),
            table.len()
        );
        tables.push(table);
    }

    let joined = join_population(files, tables);
    let n_positions_joined = joined.n_positions();
    let matrix = drop_sparse_positions(joined, thresholds.min_population_cells);
    tracing::info!(
        "population matrix: {} files, {} columns, {} of {} positions with at least {} values",
        matrix.n_files(),
        matrix.n_columns(),
        matrix.n_positions(),
        n_positions_joined,
        thresholds.min_population_cells
    );

    Ok(Stage3Output {
        matrix,
        n_positions_joined,
    })
}

/// Full outer join of the per-file tables on position. `tables[i]` becomes
/// the `_i` columns.
pub fn join_population(files: Vec<PathBuf>, tables: Vec<WideTable>) -> PopulationMatrix {
    let n_files = tables.len();
    let mut matrix = PopulationMatrix {
        files,
        ..PopulationMatrix::default()
    };
    for (file_idx, table) in tables.into_iter().enumerate() {
        for (pos, row) in table.rows {
            let cells = matrix
                .rows
                .entry(pos)
                .or_insert_with(|| vec![WideRow::default(); n_files]);
            cells[file_idx] = row;
        }
    }
    matrix
}

/// Keeps positions with at least `min_cells` non-missing values over all
/// columns of the joined table.
pub fn drop_sparse_positions(mut matrix: PopulationMatrix, min_cells: usize) -> PopulationMatrix {
    matrix
        .rows
        .retain(|_, cells| PopulationMatrix::present_cells(cells) >= min_cells);
    matrix
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_population.rs"]
mod tests;
