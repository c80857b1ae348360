use std::path::{Path, PathBuf};

use crate::error::{Result, RunControlError};
use crate::model::thresholds::ThresholdProfile;

pub const TRAINING_DIR_NAME: &str = "runko_nt_csv_424736_training";
pub const TRAINING_DIR_ENV: &str = "RUNCONTROL_TRAINING_DIR";
pub const REPORT_FILE_NAME: &str = "score_report.txt";
pub const LOG_FILE_NAME: &str = "runko.log";

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub sample_path: PathBuf,
    pub training_dir: PathBuf,
    pub report_path: PathBuf,
    pub thresholds: ThresholdProfile,
}

impl RunConfig {
    pub fn resolve(sample_path: PathBuf) -> Result<Self> {
        let env_override = std::env::var_os(TRAINING_DIR_ENV).map(PathBuf::from);
        let exe = std::env::current_exe().ok();
        let training_dir = resolve_training_dir(env_override.as_deref(), exe.as_deref())?;
        Ok(Self {
            sample_path,
            training_dir,
            report_path: PathBuf::from(REPORT_FILE_NAME),
            thresholds: ThresholdProfile::default_v1(),
        })
    }
}

/// Locates the training directory shipped with the program.
///
/// An explicit override wins. Otherwise the directory is looked up next to
/// the executable, then one level above it.
pub fn resolve_training_dir(
    env_override: Option<&Path>,
    exe: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(dir) = env_override {
        if dir.is_dir() {
            return Ok(dir.to_path_buf());
        }
        return Err(RunControlError::MissingTrainingDirectory(dir.to_path_buf()));
    }

    let exe_dir = exe.and_then(Path::parent);
    let mut candidates = Vec::new();
    match exe_dir {
        Some(dir) => {
            candidates.push(dir.join(TRAINING_DIR_NAME));
            if let Some(parent) = dir.parent() {
                candidates.push(parent.join(TRAINING_DIR_NAME));
            }
        }
        None => candidates.push(PathBuf::from(TRAINING_DIR_NAME)),
    }

    for candidate in &candidates {
        if candidate.is_dir() {
            return Ok(candidate.clone());
        }
    }
    Err(RunControlError::MissingTrainingDirectory(candidates.swap_remove(0)))
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
