use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typed view of a policy document that has passed validation.
///
/// Unknown fields are ignored, matching the non-strict schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub policy_name: String,
    pub policy_document: PolicyBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub statement: Vec<Statement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    pub effect: Effect,

    pub action: StringOrList,

    pub resource: StringOrList,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// `Action` and `Resource` accept a bare string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    Single(String),
    List(Vec<String>),
}

impl StringOrList {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            StringOrList::Single(s) => std::slice::from_ref(s),
            StringOrList::List(list) => list,
        };
        items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        match self {
            StringOrList::Single(_) => 1,
            StringOrList::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PolicyDocument {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn statement_count(&self) -> usize {
        self.policy_document.statement.len()
    }
}
