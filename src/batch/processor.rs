use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::batch::{BatchReport, FileOutcome, SqlFile, Summary};
use crate::reviewer::{Issue, IssueKind, SqlReviewer};
use crate::rewriter::{RewriteOptions, Rewriter};
use crate::rules::RuleSet;

/// Reviews and rewrites a batch of SQL inputs against one rule set.
///
/// Inputs are independent of each other, so one file failing to lex never
/// stops the batch: the failure becomes an issue on that file and its text
/// is carried through unchanged.
pub struct BatchProcessor {
    rules: RuleSet,
    options: RewriteOptions,
}

impl BatchProcessor {
    pub fn new(rules: RuleSet) -> Self {
        Self::with_options(rules, RewriteOptions::default())
    }

    pub fn with_options(rules: RuleSet, options: RewriteOptions) -> Self {
        Self { rules, options }
    }

    pub fn process(&self, files: &[SqlFile]) -> BatchReport {
        let reviewer = SqlReviewer::new(self.options.dialect.clone());
        let rewriter = Rewriter::with_options(&self.rules, self.options.clone());

        let mut outcomes: Vec<FileOutcome> = Vec::with_capacity(files.len());
        for file in files {
            debug!(file = %file.name, "processing");
            let mut issues = reviewer.review(&file.content, &self.rules);

            let (rewritten, substitutions, ambiguities) = match rewriter.rewrite(&file.content) {
                Ok(rewrite) => (rewrite.text, rewrite.substitutions, rewrite.ambiguities),
                Err(error) => {
                    warn!(file = %file.name, %error, "rewrite failed, keeping original text");
                    issues.push(Issue::error(IssueKind::RewriteFailed, error.to_string()));
                    (file.content.clone(), vec![], vec![])
                }
            };

            outcomes.push(FileOutcome {
                name: file.name.clone(),
                issues,
                substitutions,
                ambiguities,
                rewritten,
            });
        }

        let summary = Summary {
            total_files: outcomes.len(),
            files_with_issues: outcomes.iter().filter(|outcome| !outcome.issues.is_empty()).count(),
            total_issues: outcomes.iter().map(|outcome| outcome.issues.len()).sum(),
            total_substitutions: outcomes.iter().map(|outcome| outcome.substitutions.len()).sum(),
        };

        BatchReport {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            summary,
            files: outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::batch::{BatchProcessor, SqlFile};
    use crate::reviewer::IssueKind;
    use crate::rules::{RenameRule, RuleSet};

    fn processor() -> BatchProcessor {
        let rules = RuleSet::build(vec![
            RenameRule::table("orders_legacy", "orders"),
            RenameRule::column("customers", "cust_id", "customer_id"),
        ])
        .expect("Failed to build rule set");
        BatchProcessor::new(rules)
    }

    #[test]
    pub fn test_batch_summary() {
        let files = vec![
            SqlFile::new("orders.sql", "SELECT o.id FROM orders_legacy o"),
            SqlFile::new("clean.sql", "SELECT name FROM doctors"),
        ];

        let report = processor().process(&files);

        assert_eq!(report.summary.total_files, 2);
        assert_eq!(report.summary.total_substitutions, 1);
        assert_eq!(report.files[0].rewritten, "SELECT o.id FROM orders o");
        assert_eq!(report.files[1].rewritten, "SELECT name FROM doctors");
        assert!(report.files[1].substitutions.is_empty());
    }

    #[test]
    pub fn test_failing_file_does_not_stop_the_batch() {
        let files = vec![
            SqlFile::new("broken.sql", "SELECT 'open FROM customers"),
            SqlFile::new("ok.sql", "SELECT c.cust_id FROM customers c"),
        ];

        let report = processor().process(&files);

        let broken = &report.files[0];
        assert_eq!(broken.rewritten, "SELECT 'open FROM customers");
        assert!(broken.issues.iter().any(|issue| issue.kind == IssueKind::RewriteFailed));

        assert_eq!(report.files[1].rewritten, "SELECT c.customer_id FROM customers c");
    }

    #[test]
    pub fn test_report_serializes_to_json() {
        let files = vec![SqlFile::new("orders.sql", "SELECT * FROM orders_legacy")];

        let report = processor().process(&files);
        let json = report.to_json().expect("Failed to serialize report");

        assert!(json.contains("\"total_files\": 1"));
        assert!(json.contains("\"orders_legacy\""));
        assert!(json.contains("run_id"));
    }
}
