use crate::document::PolicyDocument;
use crate::error::{PolicyError, Result};
use crate::rules;
use crate::schema::PolicySchema;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Validates policy documents in two stages: the structural schema, then
/// the semantic resource rules.
pub struct PolicyValidator {
    schema: PolicySchema,
}

impl PolicyValidator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            schema: PolicySchema::new()?,
        })
    }

    /// Run both stages against an already parsed document.
    pub fn validate_value(&self, document: &Value) -> Result<()> {
        self.schema.validate(document)?;
        debug!("Structural schema passed");

        rules::check_statements(document)?;
        debug!("Semantic resource checks passed");

        Ok(())
    }

    /// Parse and validate a JSON string.
    pub fn validate_str(&self, content: &str) -> Result<PolicyDocument> {
        let document: Value = serde_json::from_str(content)?;
        self.validate_value(&document)?;
        PolicyDocument::from_value(document)
    }

    /// Read and validate a policy file.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<PolicyDocument> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.validate_str(&content)
    }

    /// Returns `true` only if the file parses and passes both stages.
    pub fn verify(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.validate_file(path) {
            Ok(_) => true,
            Err(e) => {
                debug!("Policy {} rejected ({}): {}", path.display(), e.kind(), e);
                false
            }
        }
    }
}
