use crate::Format;
use anyhow::Result;
use policyguard_policy::{PolicyError, PolicyValidator};
use serde_json::json;
use std::path::Path;

/// Validate a policy file and report which stage, if any, rejected it.
///
/// Returns the verdict so the caller can choose the exit status.
pub fn check(policy_file: &Path, format: Format) -> Result<bool> {
    let validator = PolicyValidator::new()?;
    let result = match validator.validate_file(policy_file) {
        Ok(doc) => json!({
            "file": policy_file.display().to_string(),
            "valid": true,
            "policy_name": doc.policy_name,
            "statements": doc.statement_count(),
        }),
        Err(e) => rejection(policy_file, &e),
    };

    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_check_result(&result);
    }

    Ok(result
        .get("valid")
        .and_then(|v| v.as_bool())
        .unwrap_or(false))
}

fn rejection(policy_file: &Path, error: &PolicyError) -> serde_json::Value {
    let reasons: Vec<String> = match error {
        PolicyError::Schema(violations) => violations
            .violations()
            .iter()
            .map(|v| v.to_string().trim().to_string())
            .collect(),
        other => vec![other.to_string()],
    };

    json!({
        "file": policy_file.display().to_string(),
        "valid": false,
        "stage": error.kind().as_str(),
        "reasons": reasons,
    })
}

fn print_check_result(result: &serde_json::Value) {
    let valid = result
        .get("valid")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let file = result
        .get("file")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");

    println!("=== Policy Check ===");
    println!("File: {}", file);
    println!("Verdict: {}", if valid { "✅ VALID" } else { "❌ INVALID" });

    if let Some(name) = result.get("policy_name").and_then(|v| v.as_str()) {
        println!("Policy: {}", name);
    }

    if let Some(count) = result.get("statements").and_then(|v| v.as_u64()) {
        println!("Statements: {}", count);
    }

    if let Some(stage) = result.get("stage").and_then(|v| v.as_str()) {
        println!("Failed stage: {}", stage);
    }

    if let Some(reasons) = result.get("reasons").and_then(|v| v.as_array()) {
        for reason in reasons.iter().filter_map(|v| v.as_str()) {
            println!("  - {}", reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policyguard_policy::ErrorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_policy(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_check_valid_policy() {
        let file = write_policy(
            r#"{"PolicyName":"root","PolicyDocument":{"Statement":[{"Effect":"Allow","Action":"s3:GetObject","Resource":"arn:aws:s3:::bucket/*"}]}}"#,
        );
        assert!(check(file.path(), Format::Json).unwrap());
    }

    #[test]
    fn test_check_wildcard_policy() {
        let file = write_policy(
            r#"{"PolicyName":"root","PolicyDocument":{"Statement":[{"Effect":"Allow","Action":"s3:GetObject","Resource":"*"}]}}"#,
        );
        assert!(!check(file.path(), Format::Text).unwrap());
    }

    #[test]
    fn test_rejection_lists_schema_violations() {
        let validator = PolicyValidator::new().unwrap();
        let file = write_policy(r#"{"PolicyDocument":{"Statement":[]}}"#);
        let err = validator.validate_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);

        let report = rejection(file.path(), &err);
        assert_eq!(report["valid"], false);
        assert_eq!(report["stage"], "schema");
        assert!(report["reasons"].as_array().unwrap().len() >= 2);
    }

    #[test]
    fn test_rejection_for_missing_file() {
        let validator = PolicyValidator::new().unwrap();
        let path = Path::new("/nonexistent/policyguard.json");
        let err = validator.validate_file(path).unwrap_err();

        let report = rejection(path, &err);
        assert_eq!(report["stage"], "io");
        assert_eq!(report["reasons"].as_array().unwrap().len(), 1);
    }
}
