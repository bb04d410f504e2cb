use crate::parser::{next_significant, prev_significant, Token, TokenKind};
use crate::reviewer::{Issue, IssueKind};

const CLAUSE_BREAKERS: [&str; 6] = ["WHERE", "GROUP", "ORDER", "HAVING", "LIMIT", "UNION"];

pub struct SemanticScan;

impl SemanticScan {
    pub fn check(tokens: &[Token]) -> Vec<Issue> {
        let mut issues: Vec<Issue> = vec![];
        Self::check_joins(tokens, &mut issues);
        Self::check_string_comparisons(tokens, &mut issues);
        issues
    }

    fn check_joins(tokens: &[Token], issues: &mut Vec<Issue>) {
        for (position, token) in tokens.iter().enumerate() {
            if !token.is_keyword("JOIN") {
                continue;
            }
            let is_cross = prev_significant(tokens, position, 0)
                .is_some_and(|previous| tokens[previous].is_keyword("CROSS"));
            if is_cross {
                continue;
            }
            if !Self::has_on_clause(tokens, position + 1) {
                issues.push(Issue::warning(IssueKind::JoinWithoutOn, "JOIN without ON clause detected"));
            }
        }
    }

    fn has_on_clause(tokens: &[Token], from: usize) -> bool {
        let mut position = from;
        while position < tokens.len() {
            let token = &tokens[position];
            if token.is_keyword("ON") {
                return true;
            }
            if token.is_symbol(';')
                || token.is_keyword("JOIN")
                || CLAUSE_BREAKERS.iter().any(|clause| token.is_keyword(clause))
            {
                return false;
            }
            position += 1;
        }

        false
    }

    fn check_string_comparisons(tokens: &[Token], issues: &mut Vec<Issue>) {
        for (position, token) in tokens.iter().enumerate() {
            if !token.is_symbol('=') {
                continue;
            }
            let Some(left) = prev_significant(tokens, position, 0) else {
                continue;
            };
            let Some(right) = next_significant(tokens, position + 1, tokens.len()) else {
                continue;
            };
            if tokens[left].kind != TokenKind::Identifier || tokens[right].kind != TokenKind::StringLiteral {
                continue;
            }
            let name = tokens[left].text.to_ascii_uppercase();
            // TIMESTAMP also contains TIME
            if name.contains("DATE") || name.contains("TIME") {
                continue;
            }
            issues.push(Issue::warning(
                IssueKind::StringComparison,
                format!(
                    "possible string-to-other type comparison: {} = {}",
                    tokens[left].text, tokens[right].text
                ),
            ));
        }
    }
}
