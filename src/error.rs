use serde_json::Value;
use std::{fmt, path::PathBuf};

/// The exchange a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Initialize,
    ResourcesList,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Initialize => f.write_str("initialize"),
            Stage::ResourcesList => f.write_str("resources/list"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Executable not found: {}", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("Server closed its output before answering {0}")]
    EndOfStream(Stage),

    #[error("Error in {stage}: {error}")]
    Protocol { stage: Stage, error: Value },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The line printed to the report for this failure
    pub fn report_line(&self) -> String {
        match self {
            Error::ExecutableNotFound(_) => "Error: Executable not found!".to_string(),
            Error::EndOfStream(Stage::Initialize) => {
                "Error: No response from server (EOF).".to_string()
            }
            Error::EndOfStream(Stage::ResourcesList) => {
                "Error: No response for resources/list.".to_string()
            }
            Error::Protocol { stage, error } => format!("Error in {stage}: {error}"),
            Error::Io(_) | Error::Json(_) => format!("Exception: {self}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
