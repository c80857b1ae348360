use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, RunControlError};
use crate::model::nucleotide::Nucleotide;
use crate::model::reference::ReferenceTable;
use crate::model::thresholds::ThresholdProfile;
use crate::model::wide::{WideRow, WideTable};
use crate::pipeline::stage2_pivot::load_wide_table;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleScore {
    pub score: f64,
    pub valid_sample_points: usize,
    pub training_points: usize,
}

#[derive(Debug)]
pub struct Stage5Output {
    pub score: SampleScore,
    /// The sample cut down to the reference positions it covers.
    pub sample: WideTable,
    /// Reference positions present in the sample that passed the band check.
    pub passing: BTreeSet<i64>,
}

impl Stage5Output {
    /// `Some(true|false)` for reference positions present in the sample.
    pub fn pass_state(&self, pos: i64) -> Option<bool> {
        self.sample.get(pos)?;
        Some(self.passing.contains(&pos))
    }
}

/// Scores the sample file at `path` against the reference sites.
pub fn run_stage5(
    path: &Path,
    reference: &ReferenceTable,
    thresholds: &ThresholdProfile,
) -> Result<Stage5Output> {
    let sample = load_wide_table(path)?;
    tracing::info!("sample {}: {} positions", path.display(), sample.len());
    score_sample(sample, reference, thresholds)
}

/// Fraction of the sample's reference positions whose frequencies stay
/// strictly inside the band on every channel.
pub fn score_sample(
    sample: WideTable,
    reference: &ReferenceTable,
    thresholds: &ThresholdProfile,
) -> Result<Stage5Output> {
    let restricted = sample.restrict_to(|pos| reference.contains(pos));
    let training_points = restricted.len();
    if training_points == 0 {
        return Err(RunControlError::EmptyReferenceSet(format!(
            "sample shares none of the {} reference positions",
            reference.len()
        )));
    }

    let passing: BTreeSet<i64> = restricted
        .rows
        .iter()
        .filter(|(_, row)| row_in_band(row, thresholds))
        .map(|(pos, _)| *pos)
        .collect();
    let valid_sample_points = passing.len();
    let score = valid_sample_points as f64 / training_points as f64;

    tracing::info!(
        "{} of {} reference positions in band, score {:.6}",
        valid_sample_points,
        training_points,
        score
    );

    Ok(Stage5Output {
        score: SampleScore {
            score,
            valid_sample_points,
            training_points,
        },
        sample: restricted,
        passing,
    })
}

pub fn row_in_band(row: &WideRow, thresholds: &ThresholdProfile) -> bool {
    Nucleotide::ALL
        .iter()
        .all(|nt| channel_in_band(row.get(*nt), thresholds))
}

/// Strictly inside `(mean_min, mean_max)`, or missing.
pub fn channel_in_band(value: Option<f64>, thresholds: &ThresholdProfile) -> bool {
    match value {
        None => true,
        Some(v) => v > thresholds.mean_min && v < thresholds.mean_max,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_score.rs"]
mod tests;
