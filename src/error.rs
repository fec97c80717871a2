//! Error and warning types shared by the loader and the pipeline.

use serde::Serialize;
use thiserror::Error;

/// Fatal errors raised while loading or shaping listings.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required field is missing or cannot be parsed. `row` is the 1-based
    /// data row (header excluded).
    #[error("malformed row {row}: field `{field}`: {reason}")]
    MalformedRow {
        row: u64,
        field: String,
        reason: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn malformed(row: u64, field: &str, reason: impl Into<String>) -> Self {
        PipelineError::MalformedRow {
            row,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// A filter or group-by produced no rows. Non-fatal: the view is rendered empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyResultWarning {
    pub view: String,
    pub brand: Option<String>,
}

impl std::fmt::Display for EmptyResultWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.brand {
            Some(brand) => write!(f, "view `{}` is empty for brand `{}`", self.view, brand),
            None => write!(f, "view `{}` is empty", self.view),
        }
    }
}
