//! Semantic checks applied after the structural schema has passed.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The unrestricted resource value.
pub const WILDCARD_RESOURCE: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
    WildcardResource,
    WildcardResourceElement { index: usize },
    NonStringResourceElement { index: usize },
    InvalidResourceType,
    MissingResource,
    MissingStatements,
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationReason::WildcardResource => write!(f, "Resource grants \"*\""),
            ViolationReason::WildcardResourceElement { index } => {
                write!(f, "Resource[{}] grants \"*\"", index)
            }
            ViolationReason::NonStringResourceElement { index } => {
                write!(f, "Resource[{}] is not a string", index)
            }
            ViolationReason::InvalidResourceType => {
                write!(f, "Resource is neither a string nor an array")
            }
            ViolationReason::MissingResource => write!(f, "Resource is missing"),
            ViolationReason::MissingStatements => {
                write!(f, "PolicyDocument.Statement is missing or not an array")
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("statement {statement}: {reason}")]
pub struct SemanticViolation {
    /// Zero-based position of the statement in the document.
    pub statement: usize,
    pub reason: ViolationReason,
}

impl SemanticViolation {
    fn new(statement: usize, reason: ViolationReason) -> Self {
        Self { statement, reason }
    }
}

/// Whitespace for trimming purposes: Unicode `White_Space` plus the
/// information separators U+001C..=U+001F.
fn is_trim_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

pub fn is_wildcard(resource: &str) -> bool {
    resource.trim_matches(is_trim_space) == WILDCARD_RESOURCE
}

/// Check one statement's `Resource` value (`None` when absent).
pub fn check_resource(statement: usize, resource: Option<&Value>) -> Result<(), SemanticViolation> {
    match resource {
        None => Err(SemanticViolation::new(statement, ViolationReason::MissingResource)),
        Some(Value::String(s)) => {
            if is_wildcard(s) {
                Err(SemanticViolation::new(statement, ViolationReason::WildcardResource))
            } else {
                Ok(())
            }
        }
        Some(Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) if is_wildcard(s) => {
                        return Err(SemanticViolation::new(
                            statement,
                            ViolationReason::WildcardResourceElement { index },
                        ));
                    }
                    Value::String(_) => {}
                    _ => {
                        return Err(SemanticViolation::new(
                            statement,
                            ViolationReason::NonStringResourceElement { index },
                        ));
                    }
                }
            }
            Ok(())
        }
        Some(_) => Err(SemanticViolation::new(
            statement,
            ViolationReason::InvalidResourceType,
        )),
    }
}

/// Walk `PolicyDocument.Statement` in order, stopping at the first failure.
pub fn check_statements(document: &Value) -> Result<(), SemanticViolation> {
    let statements = document
        .get("PolicyDocument")
        .and_then(|body| body.get("Statement"))
        .and_then(Value::as_array)
        .ok_or_else(|| SemanticViolation::new(0, ViolationReason::MissingStatements))?;

    for (i, statement) in statements.iter().enumerate() {
        check_resource(i, statement.get("Resource"))?;
    }

    Ok(())
}
