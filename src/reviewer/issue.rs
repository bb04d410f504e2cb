use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    SyntaxError,
    EmptyInput,
    MissingSelect,
    MissingFrom,
    UnbalancedParentheses,
    LegacyTable,
    LegacyColumn,
    JoinWithoutOn,
    StringComparison,
    RewriteFailed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    pub fn error(kind: IssueKind, message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, kind, message: message.into() }
    }

    pub fn warning(kind: IssueKind, message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, kind, message: message.into() }
    }

    pub fn info(kind: IssueKind, message: impl Into<String>) -> Self {
        Self { severity: Severity::Info, kind, message: message.into() }
    }
}
