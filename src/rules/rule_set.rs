use std::fmt::Display;

use indexmap::IndexMap;

use crate::rules::{RenameRule, RuleKind};

#[derive(Debug, Clone, PartialEq)]
pub enum RuleSetError {
    SameName { old_name: String },
    MissingOwnerTable { old_name: String },
    DuplicateRule { old_name: String },
    RenameCollision { old_name: String, new_name: String },
}

impl Display for RuleSetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleSetError::SameName { old_name } => {
                write!(f, "rule for '{old_name}' renames it to itself")
            }
            RuleSetError::MissingOwnerTable { old_name } => {
                write!(f, "column rule for '{old_name}' has no owner table")
            }
            RuleSetError::DuplicateRule { old_name } => {
                write!(f, "duplicate rule for '{old_name}'")
            }
            RuleSetError::RenameCollision { old_name, new_name } => {
                write!(f, "'{old_name}' renames to '{new_name}', which another rule still renames away")
            }
        }
    }
}

impl std::error::Error for RuleSetError {}

/// Validated set of rename rules with keyed lookup by lowercased old name.
/// Construction rejects self-renames, duplicate `(kind, old, owner)` keys
/// and renames onto a name another rule still maps away; the last check is
/// what makes repeated rewriting a no-op.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RenameRule>,
    tables: IndexMap<String, usize>,
    columns: IndexMap<String, Vec<usize>>,
}

impl RuleSet {
    pub fn build(rules: Vec<RenameRule>) -> Result<RuleSet, RuleSetError> {
        let mut tables: IndexMap<String, usize> = IndexMap::new();
        let mut columns: IndexMap<String, Vec<usize>> = IndexMap::new();

        for (position, rule) in rules.iter().enumerate() {
            let old = rule.old_name.to_lowercase();
            if old == rule.new_name.to_lowercase() {
                return Err(RuleSetError::SameName { old_name: rule.old_name.clone() });
            }

            match rule.kind {
                RuleKind::Table => {
                    if tables.insert(old, position).is_some() {
                        return Err(RuleSetError::DuplicateRule { old_name: rule.old_name.clone() });
                    }
                }
                RuleKind::Column => {
                    let Some(owner) = &rule.owner_table else {
                        return Err(RuleSetError::MissingOwnerTable { old_name: rule.old_name.clone() });
                    };
                    let owner = owner.to_lowercase();
                    let candidates = columns.entry(old).or_insert_with(Vec::new);
                    if candidates.iter().any(|other| owner_of(&rules[*other]) == owner) {
                        return Err(RuleSetError::DuplicateRule { old_name: rule.old_name.clone() });
                    }
                    candidates.push(position);
                }
            }
        }

        for rule in &rules {
            let new = rule.new_name.to_lowercase();
            // global per kind: a current name that is still someone's legacy
            // name would make a second pass rename it again
            let collides = match rule.kind {
                RuleKind::Table => tables.contains_key(&new),
                RuleKind::Column => columns.contains_key(&new),
            };
            if collides {
                return Err(RuleSetError::RenameCollision {
                    old_name: rule.old_name.clone(),
                    new_name: rule.new_name.clone(),
                });
            }
        }

        Ok(RuleSet { rules, tables, columns })
    }

    pub fn table_rule(&self, name: &str) -> Option<&RenameRule> {
        self.tables.get(&name.to_lowercase()).map(|position| &self.rules[*position])
    }

    pub fn column_rules(&self, name: &str) -> Vec<&RenameRule> {
        match self.columns.get(&name.to_lowercase()) {
            Some(candidates) => candidates.iter().map(|position| &self.rules[*position]).collect(),
            None => vec![],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenameRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn owner_of(rule: &RenameRule) -> String {
    rule.owner_table.as_deref().unwrap_or_default().to_lowercase()
}

#[cfg(test)]
mod tests {
    use crate::rules::{RenameRule, RuleSet, RuleSetError};

    #[test]
    pub fn test_lookup_is_case_insensitive() {
        let rules = RuleSet::build(vec![
            RenameRule::table("Orders_Legacy", "orders"),
            RenameRule::column("customers", "cust_id", "customer_id"),
        ])
        .expect("Failed to build rule set");

        assert!(rules.table_rule("ORDERS_LEGACY").is_some());
        assert_eq!(rules.column_rules("CUST_ID").len(), 1);
        assert!(rules.column_rules("unknown").is_empty());
    }

    #[test]
    pub fn test_same_owner_duplicate_is_rejected() {
        let result = RuleSet::build(vec![
            RenameRule::column("customers", "cust_id", "customer_id"),
            RenameRule::column("Customers", "CUST_ID", "client_id"),
        ]);

        match result {
            Ok(_) => panic!(),
            Err(error) => assert_eq!(error, RuleSetError::DuplicateRule { old_name: "CUST_ID".to_string() }),
        }
    }

    #[test]
    pub fn test_same_column_on_different_tables_is_allowed() {
        let rules = RuleSet::build(vec![
            RenameRule::column("customers", "created_at", "created_on"),
            RenameRule::column("orders_legacy", "created_at", "placed_at"),
        ])
        .expect("Failed to build rule set");

        assert_eq!(rules.column_rules("created_at").len(), 2);
    }

    #[test]
    pub fn test_self_rename_is_rejected() {
        let result = RuleSet::build(vec![RenameRule::table("customers", "CUSTOMERS")]);

        assert_eq!(result.err(), Some(RuleSetError::SameName { old_name: "customers".to_string() }));
    }

    #[test]
    pub fn test_column_rule_requires_owner() {
        let mut rule = RenameRule::column("customers", "cust_id", "customer_id");
        rule.owner_table = None;

        let result = RuleSet::build(vec![rule]);

        assert_eq!(result.err(), Some(RuleSetError::MissingOwnerTable { old_name: "cust_id".to_string() }));
    }

    #[test]
    pub fn test_rename_onto_another_old_name_is_rejected() {
        let result = RuleSet::build(vec![
            RenameRule::table("customers", "clients"),
            RenameRule::table("clients", "accounts"),
        ]);

        match result {
            Ok(_) => panic!(),
            Err(RuleSetError::RenameCollision { old_name, new_name }) => {
                assert_eq!(old_name, "customers");
                assert_eq!(new_name, "clients");
            }
            Err(_) => panic!(),
        }
    }

    #[test]
    pub fn test_column_rename_collision_crosses_owners() {
        let result = RuleSet::build(vec![
            RenameRule::column("customers", "cust_id", "customer_id"),
            RenameRule::column("orders_legacy", "customer_id", "client_id"),
        ]);

        match result {
            Ok(_) => panic!(),
            Err(RuleSetError::RenameCollision { old_name, new_name }) => {
                assert_eq!(old_name, "cust_id");
                assert_eq!(new_name, "customer_id");
            }
            Err(_) => panic!(),
        }
    }
}
