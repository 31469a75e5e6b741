//! Structural schema for policy documents.
//!
//! The schema is fixed and non-strict: unknown properties are permitted at
//! every level. Only shape, types and the `Effect` enum are enforced here;
//! resource wildcards are the business of [`crate::rules`].

use crate::error::{PolicyError, Result};
use jsonschema::Validator;
use serde_json::{json, Value};
use std::fmt;

/// Returns the JSON Schema (draft 7) every policy document must satisfy.
pub fn policy_schema() -> Value {
    let string_or_string_list = json!({
        "oneOf": [
            { "type": "string" },
            { "type": "array", "items": { "type": "string" } }
        ]
    });

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "PolicyName": { "type": "string" },
            "PolicyDocument": {
                "type": "object",
                "properties": {
                    "Version": { "type": "string" },
                    "Statement": {
                        "type": "array",
                        "minItems": 1,
                        "items": {
                            "type": "object",
                            "properties": {
                                "Sid": { "type": "string" },
                                "Effect": { "type": "string", "enum": ["Allow", "Deny"] },
                                "Action": string_or_string_list.clone(),
                                "Resource": string_or_string_list,
                                "Condition": { "type": "object" }
                            },
                            "required": ["Effect", "Action", "Resource"]
                        }
                    }
                },
                "required": ["Statement"]
            }
        },
        "required": ["PolicyName", "PolicyDocument"]
    })
}

/// A single structural violation.
#[derive(Debug, Clone)]
pub struct SchemaViolation {
    /// JSON Pointer to the offending value in the document.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

#[derive(Debug, Clone)]
pub struct SchemaViolations {
    violations: Vec<SchemaViolation>,
}

impl SchemaViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<SchemaViolation> {
        self.violations
    }
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Compiled form of [`policy_schema`].
pub struct PolicySchema {
    validator: Validator,
}

impl PolicySchema {
    pub fn new() -> Result<Self> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft7);

        let validator = opts
            .build(&policy_schema())
            .map_err(|e| PolicyError::SchemaBuild(e.to_string()))?;

        Ok(Self { validator })
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate `instance`, reporting every violation found.
    pub fn validate(&self, instance: &Value) -> Result<()> {
        let violations: Vec<SchemaViolation> = self
            .validator
            .iter_errors(instance)
            .map(|e| SchemaViolation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(PolicyError::Schema(SchemaViolations { violations }))
        }
    }
}
