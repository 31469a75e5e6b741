pub mod document;
pub mod error;
pub mod rules;
pub mod schema;
pub mod validator;

pub use document::{Effect, PolicyBody, PolicyDocument, Statement, StringOrList};
pub use error::{ErrorKind, PolicyError, Result};
pub use rules::{is_wildcard, SemanticViolation, ViolationReason, WILDCARD_RESOURCE};
pub use schema::{policy_schema, PolicySchema, SchemaViolation, SchemaViolations};
pub use validator::PolicyValidator;

use std::path::Path;

/// Verify the policy document at `path`.
///
/// Returns `true` if the file is valid JSON, conforms to the structural
/// schema, and no statement grants the `"*"` resource. Every failure,
/// including an unreadable file, yields `false`.
pub fn verify(path: impl AsRef<Path>) -> bool {
    match PolicyValidator::new() {
        Ok(validator) => validator.verify(path),
        Err(e) => {
            tracing::error!("Failed to build policy validator: {}", e);
            false
        }
    }
}
