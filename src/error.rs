use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum RunControlError {
    #[error("malformed mutation field in {} (line {line}): `mut` is empty", .path.display())]
    MalformedMutationField { path: PathBuf, line: u64 },

    #[error("malformed record in {} (line {line}): {msg}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        msg: String,
    },

    #[error("missing column `{column}` in {}", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("no *.csv files found in training directory {}", .0.display())]
    EmptyTrainingSet(PathBuf),

    #[error("the training directory {} does not exist", .0.display())]
    MissingTrainingDirectory(PathBuf),

    #[error("empty reference set: {0}")]
    EmptyReferenceSet(String),

    #[error("IO error on {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl RunControlError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        RunControlError::FileIo {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RunControlError>;
