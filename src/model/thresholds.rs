#[derive(Debug, Clone)]
pub struct ThresholdProfile {
    /// Lower edge of the intermediate-frequency band.
    pub mean_min: f64,
    /// Upper edge of the intermediate-frequency band.
    pub mean_max: f64,
    /// A site is kept when at least one channel std is below this.
    pub max_std: f64,
    /// Replacement for a std of exactly zero.
    pub min_std: f64,
    /// Minimum non-missing cells per position across the joined training columns.
    pub min_population_cells: usize,
    /// Channel statistics need strictly more present values than this.
    pub nt_present_above: usize,
}

impl ThresholdProfile {
    pub fn default_v1() -> Self {
        Self {
            mean_min: 0.2,
            mean_max: 0.8,
            max_std: 0.25,
            min_std: 0.00001,
            min_population_cells: 32,
            nt_present_above: 4,
        }
    }
}

impl Default for ThresholdProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}
