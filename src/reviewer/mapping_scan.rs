use regex::RegexBuilder;

use crate::reviewer::{Issue, IssueKind};
use crate::rules::{RuleKind, RuleSet};

/// Report-only pass: lists every legacy name still present in the text,
/// without touching it. Matches whole words, case-insensitively, so
/// `cust_id` never fires inside `cust_id_backup`.
pub struct MappingScan;

impl MappingScan {
    pub fn check(text: &str, rules: &RuleSet) -> Vec<Issue> {
        let mut issues: Vec<Issue> = vec![];

        for rule in rules.iter() {
            let pattern = format!(r"\b{}\b", regex::escape(&rule.old_name));
            let Ok(matcher) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
                continue;
            };
            if !matcher.is_match(text) {
                continue;
            }

            let issue = match rule.kind {
                RuleKind::Table => Issue::info(
                    IssueKind::LegacyTable,
                    format!("table '{}' should be '{}'", rule.old_name, rule.new_name),
                ),
                RuleKind::Column => Issue::info(
                    IssueKind::LegacyColumn,
                    format!(
                        "column '{}' should be '{}' (in table '{}')",
                        rule.old_name,
                        rule.new_name,
                        rule.owner_table.as_deref().unwrap_or_default()
                    ),
                ),
            };
            issues.push(issue);
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use crate::reviewer::{IssueKind, MappingScan};
    use crate::rules::{RenameRule, RuleSet};

    fn rules() -> RuleSet {
        RuleSet::build(vec![
            RenameRule::table("orders_legacy", "orders"),
            RenameRule::column("customers", "cust_id", "customer_id"),
        ])
        .expect("Failed to build rule set")
    }

    #[test]
    pub fn test_reports_present_legacy_names() {
        let issues = MappingScan::check("SELECT Cust_ID FROM ORDERS_LEGACY", &rules());

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].kind, IssueKind::LegacyTable);
        assert_eq!(issues[0].message, "table 'orders_legacy' should be 'orders'");
        assert_eq!(issues[1].kind, IssueKind::LegacyColumn);
    }

    #[test]
    pub fn test_word_boundaries_are_respected() {
        let issues = MappingScan::check("SELECT cust_id_backup FROM orders_legacy_archive", &rules());

        assert!(issues.is_empty());
    }
}
