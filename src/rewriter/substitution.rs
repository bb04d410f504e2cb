use serde::Serialize;

/// One rename applied during a rewrite, for auditing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Substitution {
    pub statement_index: usize,
    pub byte_offset: usize,
    pub old_name: String,
    pub new_name: String,
}

/// A reference that matched a rename rule but could not be tied to a table
/// introduced by the statement's `FROM`/`JOIN` clauses. The identifier is
/// left unchanged and the rest of the statement is still rewritten.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmbiguousAlias {
    pub statement_index: usize,
    pub byte_offset: usize,
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
}
