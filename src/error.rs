use std::fmt;
use thiserror::Error;

/// A single rejected input record, identified by its position in the raw list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    pub index: usize,
    pub reason: String,
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.index, self.reason)
    }
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Unsupported roster format: {0}")]
    UnsupportedFormat(String),

    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    #[error("Session state lock poisoned: {0}")]
    Poisoned(String),

    #[error("Roster Validation Error: {} invalid record(s) [{}]", .offending.len(), list_indices(.offending))]
    Validation { offending: Vec<RecordIssue> },
}

impl RosterError {
    /// Indices of the rejected records, empty for non-validation errors.
    pub fn offending_indices(&self) -> Vec<usize> {
        match self {
            Self::Validation { offending } => offending.iter().map(|i| i.index).collect(),
            _ => Vec::new(),
        }
    }
}

fn list_indices(issues: &[RecordIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type RfResult<T> = Result<T, RosterError>;
