use serde::Serialize;

use crate::pipeline::stage4_reference::FilterCounts;
use crate::pipeline::stage5_score::SampleScore;

/// One-line machine-readable record of a run, written to the log.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummary {
    pub tool: &'static str,
    pub version: &'static str,
    pub sample: String,
    pub training_dir: String,
    pub training_files: usize,
    pub population_positions: usize,
    pub reference_filters: FilterCounts,
    #[serde(flatten)]
    pub score: SampleScore,
}

pub fn render_summary_json(summary: &ScoreSummary) -> String {
    serde_json::to_string(summary).unwrap_or_default()
}
