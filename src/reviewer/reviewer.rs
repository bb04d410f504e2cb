use crate::parser::{Dialect, Tokenizer};
use crate::reviewer::{Issue, IssueKind, MappingScan, SemanticScan, StructureScan};
use crate::rules::RuleSet;

/// Runs the structural, mapping and semantic passes over one SQL text.
/// Never fails: input the lexer rejects degrades to an error-severity issue
/// and the text-level mapping scan still runs.
pub struct SqlReviewer {
    tokenizer: Tokenizer,
}

impl Default for SqlReviewer {
    fn default() -> Self {
        Self::new(Dialect::ansi())
    }
}

impl SqlReviewer {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            tokenizer: Tokenizer::new(dialect),
        }
    }

    pub fn review(&self, text: &str, rules: &RuleSet) -> Vec<Issue> {
        let mut issues: Vec<Issue> = vec![];

        match self.tokenizer.tokenize(text) {
            Ok(tokens) => {
                issues.extend(StructureScan::check(&tokens));
                issues.extend(MappingScan::check(text, rules));
                issues.extend(SemanticScan::check(&tokens));
            }
            Err(error) => {
                issues.push(Issue::error(IssueKind::SyntaxError, format!("SQL parsing failed: {error}")));
                issues.extend(MappingScan::check(text, rules));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use crate::reviewer::{IssueKind, Severity, SqlReviewer};
    use crate::rules::{RenameRule, RuleSet};

    fn rules() -> RuleSet {
        RuleSet::build(vec![RenameRule::table("orders_legacy", "orders")]).expect("Failed to build rule set")
    }

    #[test]
    pub fn test_all_phases_contribute() {
        let issues = SqlReviewer::default().review(
            "SELECT * FROM orders_legacy o JOIN payment_info WHERE o.status = 'paid'",
            &rules(),
        );

        let kinds: Vec<IssueKind> = issues.iter().map(|issue| issue.kind).collect();
        assert!(kinds.contains(&IssueKind::LegacyTable));
        assert!(kinds.contains(&IssueKind::JoinWithoutOn));
        assert!(kinds.contains(&IssueKind::StringComparison));
    }

    #[test]
    pub fn test_lexer_failure_degrades_to_issue() {
        let issues = SqlReviewer::default().review("SELECT 'open FROM orders_legacy", &rules());

        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].kind, IssueKind::SyntaxError);
        // the mapping scan still sees the legacy table name
        assert!(issues.iter().any(|issue| issue.kind == IssueKind::LegacyTable));
    }
}
