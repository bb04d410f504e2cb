// SELECT c.cust_id, o.order_total
// FROM customers c
// INNER JOIN orders_legacy o ON c.cust_id = o.customer_id
//
// under {customers -> clients} and {orders_legacy.customer_id -> client_id}:
//
// SELECT c.cust_id, o.order_total
// FROM clients c
// INNER JOIN orders o ON c.cust_id = o.client_id

use tracing::{debug, warn};

use crate::parser::{next_significant, prev_significant, StatementSplitter, Token, TokenKind, Tokenizer};
use crate::rewriter::{AmbiguousAlias, RewriteError, RewriteOptions, StatementContext, Substitution};
use crate::rules::{RenameRule, RuleSet};

/// Result of one rewrite pass: the new text plus everything that was (or
/// could not be) renamed.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    pub text: String,
    pub substitutions: Vec<Substitution>,
    pub ambiguities: Vec<AmbiguousAlias>,
}

#[derive(Debug)]
struct Replacement {
    from: usize,
    to: usize,
    text: String,
}

enum Qualifier {
    None,
    Visible(String),
    Opaque,
}

/// Rewrites legacy table and column references to their current names.
///
/// Pure text-in/text-out: no I/O, no shared state. Output is byte-identical
/// to the input outside the replaced identifier spans, and running the same
/// rule set over its own output changes nothing.
pub struct Rewriter<'a> {
    rules: &'a RuleSet,
    options: RewriteOptions,
    tokenizer: Tokenizer,
}

impl<'a> Rewriter<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self::with_options(rules, RewriteOptions::default())
    }

    pub fn with_options(rules: &'a RuleSet, options: RewriteOptions) -> Self {
        let tokenizer = Tokenizer::new(options.dialect.clone());
        Self { rules, options, tokenizer }
    }

    pub fn rewrite(&self, sql: &str) -> Result<Rewrite, RewriteError> {
        let tokens = self.tokenizer.tokenize(sql)?;
        let statements = StatementSplitter::split(&tokens);

        let mut replacements: Vec<Replacement> = vec![];
        let mut substitutions: Vec<Substitution> = vec![];
        let mut ambiguities: Vec<AmbiguousAlias> = vec![];

        for (statement_index, range) in statements.iter().enumerate() {
            let ctx = StatementContext::build(&tokens, range.clone());

            for table_ref in &ctx.table_refs {
                let Some(rule) = self.rules.table_rule(&table_ref.name) else {
                    continue;
                };
                let first = table_ref.token_positions[0];
                let last = table_ref.token_positions.last().copied().unwrap_or(first);
                debug!(old = %table_ref.name, new = %rule.new_name, "renaming table");
                replacements.push(Replacement { from: first, to: last, text: rule.new_name.clone() });
                substitutions.push(Substitution {
                    statement_index,
                    byte_offset: tokens[first].byte_start,
                    old_name: table_ref.name.clone(),
                    new_name: rule.new_name.clone(),
                });
            }

            let mut position = range.start;
            while position < range.end {
                let token = &tokens[position];
                if token.kind != TokenKind::Identifier
                    || ctx.is_table_position(position)
                    || ctx.is_alias_position(position)
                {
                    position += 1;
                    continue;
                }

                if let Some(next) = next_significant(&tokens, position + 1, range.end) {
                    // function names are never column references
                    if tokens[next].is_symbol('(') {
                        position += 1;
                        continue;
                    }
                    // owner part of a qualified reference; only the last
                    // component is a column
                    if tokens[next].is_symbol('.')
                        && next_significant(&tokens, next + 1, range.end)
                            .is_some_and(|after| tokens[after].kind == TokenKind::Identifier)
                    {
                        position += 1;
                        continue;
                    }
                }

                match qualifier_of(&tokens, position, range.start) {
                    Qualifier::Visible(qualifier) => self.rewrite_qualified(
                        &tokens, position, statement_index, &ctx, qualifier,
                        &mut replacements, &mut substitutions, &mut ambiguities,
                    ),
                    Qualifier::None => self.rewrite_unqualified(
                        &tokens, position, statement_index, &ctx,
                        &mut replacements, &mut substitutions, &mut ambiguities,
                    ),
                    Qualifier::Opaque => {}
                }

                position += 1;
            }
        }

        if self.options.strict && !ambiguities.is_empty() {
            return Err(RewriteError::AmbiguousAlias(ambiguities.remove(0)));
        }

        substitutions.sort_by_key(|substitution| (substitution.statement_index, substitution.byte_offset));

        Ok(Rewrite {
            text: assemble(&tokens, replacements),
            substitutions,
            ambiguities,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn rewrite_qualified(
        &self,
        tokens: &[Token],
        position: usize,
        statement_index: usize,
        ctx: &StatementContext,
        qualifier: String,
        replacements: &mut Vec<Replacement>,
        substitutions: &mut Vec<Substitution>,
        ambiguities: &mut Vec<AmbiguousAlias>,
    ) {
        let token = &tokens[position];

        if ctx.is_subquery_alias(&qualifier) {
            return;
        }

        match ctx.resolve(&qualifier) {
            Some(table) => {
                if let Some(rule) = self.match_column_rule(&token.text, table) {
                    debug!(old = %token.text, new = %rule.new_name, table, "renaming column");
                    replacements.push(Replacement { from: position, to: position, text: rule.new_name.clone() });
                    substitutions.push(Substitution {
                        statement_index,
                        byte_offset: token.byte_start,
                        old_name: token.text.clone(),
                        new_name: rule.new_name.clone(),
                    });
                }
            }
            None => {
                if !self.rules.column_rules(&token.text).is_empty() {
                    warn!(identifier = %token.text, alias = %qualifier, "alias not bound by any FROM/JOIN clause");
                    ambiguities.push(AmbiguousAlias {
                        statement_index,
                        byte_offset: token.byte_start,
                        identifier: token.text.clone(),
                        qualifier: Some(qualifier),
                    });
                }
            }
        }
    }

    fn rewrite_unqualified(
        &self,
        tokens: &[Token],
        position: usize,
        statement_index: usize,
        ctx: &StatementContext,
        replacements: &mut Vec<Replacement>,
        substitutions: &mut Vec<Substitution>,
        ambiguities: &mut Vec<AmbiguousAlias>,
    ) {
        let token = &tokens[position];
        let candidates = self.rules.column_rules(&token.text);
        if candidates.is_empty() {
            return;
        }

        let matched: Vec<&RenameRule> = candidates
            .into_iter()
            .filter(|rule| {
                let owner = rule.owner_table.as_deref().unwrap_or_default();
                ctx.bound_tables().any(|table| self.owner_matches(owner, table))
            })
            .collect();

        if matched.len() == 1 {
            let rule = matched[0];
            debug!(old = %token.text, new = %rule.new_name, "renaming unqualified column");
            replacements.push(Replacement { from: position, to: position, text: rule.new_name.clone() });
            substitutions.push(Substitution {
                statement_index,
                byte_offset: token.byte_start,
                old_name: token.text.clone(),
                new_name: rule.new_name.clone(),
            });
            return;
        }

        warn!(identifier = %token.text, matches = matched.len(), "column cannot be tied to a single table");
        ambiguities.push(AmbiguousAlias {
            statement_index,
            byte_offset: token.byte_start,
            identifier: token.text.clone(),
            qualifier: None,
        });
    }

    fn match_column_rule(&self, column: &str, table: &str) -> Option<&RenameRule> {
        self.rules
            .column_rules(column)
            .into_iter()
            .find(|rule| self.owner_matches(rule.owner_table.as_deref().unwrap_or_default(), table))
    }

    /// A rule owner matches a bound table spelled either the legacy way or
    /// the way it reads after its own table rule is applied.
    fn owner_matches(&self, owner: &str, table: &str) -> bool {
        if owner.eq_ignore_ascii_case(table) {
            return true;
        }
        self.rules
            .table_rule(table)
            .is_some_and(|rule| rule.new_name.eq_ignore_ascii_case(owner))
    }
}

fn qualifier_of(tokens: &[Token], position: usize, start: usize) -> Qualifier {
    let Some(dot) = prev_significant(tokens, position, start) else {
        return Qualifier::None;
    };
    if !tokens[dot].is_symbol('.') {
        return Qualifier::None;
    }

    let mut parts: Vec<String> = vec![];
    let mut before_dot = dot;
    loop {
        let Some(part) = prev_significant(tokens, before_dot, start) else {
            return Qualifier::Opaque;
        };
        if tokens[part].kind != TokenKind::Identifier {
            return Qualifier::Opaque;
        }
        parts.push(tokens[part].text.clone());

        match prev_significant(tokens, part, start) {
            Some(next_dot) if tokens[next_dot].is_symbol('.') => before_dot = next_dot,
            _ => break,
        }
    }

    parts.reverse();
    Qualifier::Visible(parts.join("."))
}

fn assemble(tokens: &[Token], mut replacements: Vec<Replacement>) -> String {
    replacements.sort_by_key(|replacement| replacement.from);

    let mut output = String::new();
    let mut next_replacement = 0;
    let mut position = 0;

    while position < tokens.len() {
        if next_replacement < replacements.len() && replacements[next_replacement].from == position {
            let replacement = &replacements[next_replacement];
            output.push_str(&replacement.text);
            position = replacement.to + 1;
            next_replacement += 1;
            continue;
        }
        output.push_str(&tokens[position].text);
        position += 1;
    }

    output
}
