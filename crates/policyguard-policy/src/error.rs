use crate::rules::SemanticViolation;
use crate::schema::SchemaViolations;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Schema violation:\n{0}")]
    Schema(SchemaViolations),

    #[error("Semantic violation: {0}")]
    Semantic(#[from] SemanticViolation),

    #[error("Schema build error: {0}")]
    SchemaBuild(String),
}

/// Coarse classification of a rejection, for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Schema,
    Semantic,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Io => "io",
            ErrorKind::Parse => "parse",
            ErrorKind::Schema => "schema",
            ErrorKind::Semantic => "semantic",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PolicyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolicyError::Io { .. } => ErrorKind::Io,
            PolicyError::Parse(_) => ErrorKind::Parse,
            PolicyError::Schema(_) => ErrorKind::Schema,
            PolicyError::Semantic(_) => ErrorKind::Semantic,
            PolicyError::SchemaBuild(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, PolicyError>;
