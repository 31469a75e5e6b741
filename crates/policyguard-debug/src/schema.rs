use anyhow::Result;
use policyguard_policy::policy_schema;

/// Print the built-in policy schema
pub fn schema() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&policy_schema())?);
    Ok(())
}
