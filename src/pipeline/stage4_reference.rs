use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, RunControlError};
use crate::model::nucleotide::Nucleotide;
use crate::model::population::PopulationMatrix;
use crate::model::reference::{ChannelStats, ReferenceSite, ReferenceTable};
use crate::model::thresholds::ThresholdProfile;

/// Row counts after each filtering pass, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    pub raw: usize,
    pub after_saturated: usize,
    pub after_band: usize,
    pub after_variability: usize,
}

#[derive(Debug)]
pub struct Stage4Output {
    pub reference: ReferenceTable,
    pub counts: FilterCounts,
}

pub fn run_stage4(
    matrix: &PopulationMatrix,
    thresholds: &ThresholdProfile,
) -> Result<Stage4Output> {
    let stats = population_statistics(matrix, thresholds);
    let (sites, counts) = filter_variable_sites(stats, thresholds);

    tracing::info!(
        "reference sites: raw={}, unsaturated={}, in band={}, stable={}",
        counts.raw,
        counts.after_saturated,
        counts.after_band,
        counts.after_variability
    );

    if sites.is_empty() {
        return Err(RunControlError::EmptyReferenceSet(format!(
            "no position out of {} passed the population filters",
            counts.raw
        )));
    }

    Ok(Stage4Output {
        reference: ReferenceTable { sites },
        counts,
    })
}

/// Per-position mean and std of every channel over the training files.
pub fn population_statistics(
    matrix: &PopulationMatrix,
    thresholds: &ThresholdProfile,
) -> BTreeMap<i64, ReferenceSite> {
    let mut out = BTreeMap::new();
    for (&pos, cells) in &matrix.rows {
        let mut site = ReferenceSite::default();
        for nt in Nucleotide::ALL {
            let values = PopulationMatrix::channel_values(cells, nt);
            site.channels[nt.index()] = channel_stats(values, thresholds.nt_present_above);
        }
        out.insert(pos, site);
    }
    out
}

/// Mean and sample std (ddof = 1) of the present values, or missing when
/// no more than `present_above` values are present. A single value has no
/// std.
pub fn channel_stats<I>(values: I, present_above: usize) -> ChannelStats
where
    I: IntoIterator<Item = Option<f64>>,
{
    let present: Vec<f64> = values.into_iter().flatten().collect();
    let n = present.len();
    if n == 0 || n <= present_above {
        return ChannelStats::default();
    }
    let mean = present.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let ss: f64 = present.iter().map(|v| (v - mean) * (v - mean)).sum();
        (ss / (n - 1) as f64).sqrt()
    });
    ChannelStats {
        mean: Some(mean),
        std,
    }
}

/// Applies the three population filters in order, then floors zero stds.
pub fn filter_variable_sites(
    stats: BTreeMap<i64, ReferenceSite>,
    thresholds: &ThresholdProfile,
) -> (BTreeMap<i64, ReferenceSite>, FilterCounts) {
    let mut counts = FilterCounts {
        raw: stats.len(),
        ..FilterCounts::default()
    };

    let mut sites: BTreeMap<i64, ReferenceSite> = stats
        .into_iter()
        .filter(|(_, site)| !is_saturated(site))
        .collect();
    counts.after_saturated = sites.len();

    sites.retain(|_, site| within_band(site, thresholds));
    counts.after_band = sites.len();

    sites.retain(|_, site| has_stable_channel(site, thresholds));
    counts.after_variability = sites.len();

    for site in sites.values_mut() {
        floor_zero_std(site, thresholds.min_std);
    }
    (sites, counts)
}

/// Any channel mean of exactly 1.0 marks an invariant position.
pub fn is_saturated(site: &ReferenceSite) -> bool {
    site.means().any(|m| m == Some(1.0))
}

/// Every present mean lies in `[mean_min, mean_max]`; missing means pass.
pub fn within_band(site: &ReferenceSite, thresholds: &ThresholdProfile) -> bool {
    site.means()
        .flatten()
        .all(|m| (thresholds.mean_min..=thresholds.mean_max).contains(&m))
}

/// At least one present std is below `max_std`; missing stds never count.
pub fn has_stable_channel(site: &ReferenceSite, thresholds: &ThresholdProfile) -> bool {
    site.stds().flatten().any(|s| s < thresholds.max_std)
}

pub fn floor_zero_std(site: &mut ReferenceSite, min_std: f64) {
    for channel in site.channels.iter_mut() {
        if channel.std == Some(0.0) {
            channel.std = Some(min_std);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_reference.rs"]
mod tests;
