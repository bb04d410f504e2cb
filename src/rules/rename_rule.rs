use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Table,
    Column,
}

/// A single rename of a legacy table or column to its current name.
///
/// Column renames carry the table they belong to, so identically named
/// columns on unrelated tables never collide. `owner_table` may be spelled
/// with either the legacy or the current table name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameRule {
    pub kind: RuleKind,
    pub old_name: String,
    pub new_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_table: Option<String>,
}

impl RenameRule {
    pub fn table(old_name: &str, new_name: &str) -> Self {
        Self {
            kind: RuleKind::Table,
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            owner_table: None,
        }
    }

    pub fn column(owner_table: &str, old_name: &str, new_name: &str) -> Self {
        Self {
            kind: RuleKind::Column,
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            owner_table: Some(owner_table.to_string()),
        }
    }
}
