use crate::parser::Token;
use crate::reviewer::{Issue, IssueKind};

pub struct StructureScan;

impl StructureScan {
    pub fn check(tokens: &[Token]) -> Vec<Issue> {
        let mut issues: Vec<Issue> = vec![];

        if tokens.iter().all(|token| token.is_trivia()) {
            issues.push(Issue::error(IssueKind::EmptyInput, "Empty SQL input"));
            return issues;
        }

        if !tokens.iter().any(|token| token.is_keyword("SELECT")) {
            issues.push(Issue::error(IssueKind::MissingSelect, "Missing SELECT clause"));
        }
        if !tokens.iter().any(|token| token.is_keyword("FROM")) {
            issues.push(Issue::error(IssueKind::MissingFrom, "Missing FROM clause"));
        }

        let opens = tokens.iter().filter(|token| token.is_symbol('(')).count();
        let closes = tokens.iter().filter(|token| token.is_symbol(')')).count();
        if opens != closes {
            issues.push(Issue::error(IssueKind::UnbalancedParentheses, "Unbalanced parentheses"));
        }

        issues
    }
}
