// crates/admdiv-core/src/error.rs
use thiserror::Error;

/// Errors that abort a run.
///
/// Per-row data problems are not errors; they are reported as
/// [`RowIssue`](crate::loader::RowIssue) values and counted in the
/// [`RunReport`](crate::common::RunReport).
#[derive(Debug, Error)]
pub enum AdmDivError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The selector was handed a group with no candidates.
    /// Groups are non-empty by construction, so this is always a bug upstream.
    #[error("empty name group for UFI {ufi} at level {level}")]
    EmptyGroup { ufi: i64, level: String },
}

pub type Result<T> = std::result::Result<T, AdmDivError>;
