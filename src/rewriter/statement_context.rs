use std::collections::HashSet;
use std::ops::Range;

use indexmap::IndexMap;

use crate::parser::{next_significant, Token, TokenKind};

/// One table named by a `FROM`/`JOIN` clause, with the token positions it
/// spans (several for a dotted `schema.table` name).
#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    pub token_positions: Vec<usize>,
    pub name: String,
}

/// Per-statement view of the `FROM`/`JOIN` clauses: what every visible name
/// resolves to, which tokens name a table and which define an alias.
/// Rebuilt for each statement, never shared across statements.
#[derive(Debug, Clone, Default)]
pub struct StatementContext {
    /// map visible name (lowercased) -> table as written in the statement
    bindings: IndexMap<String, String>,
    subquery_aliases: HashSet<String>,
    pub table_refs: Vec<TableRef>,
    table_positions: HashSet<usize>,
    alias_positions: HashSet<usize>,
}

impl StatementContext {
    pub fn build(tokens: &[Token], range: Range<usize>) -> Self {
        let mut ctx = StatementContext::default();

        let mut position = range.start;
        while position < range.end {
            let token = &tokens[position];
            if token.is_keyword("FROM") {
                position = ctx.collect_table_list(tokens, position + 1, range.end);
                continue;
            }
            if token.is_keyword("JOIN") {
                position = ctx.collect_table_ref(tokens, position + 1, range.end);
                continue;
            }
            position += 1;
        }

        ctx
    }

    pub fn resolve(&self, visible: &str) -> Option<&str> {
        self.bindings.get(&visible.to_lowercase()).map(|table| table.as_str())
    }

    pub fn is_subquery_alias(&self, visible: &str) -> bool {
        self.subquery_aliases.contains(&visible.to_lowercase())
    }

    pub fn is_table_position(&self, position: usize) -> bool {
        self.table_positions.contains(&position)
    }

    pub fn is_alias_position(&self, position: usize) -> bool {
        self.alias_positions.contains(&position)
    }

    pub fn bound_tables(&self) -> impl Iterator<Item = &str> {
        self.bindings.values().map(|table| table.as_str())
    }

    fn collect_table_list(&mut self, tokens: &[Token], from: usize, end: usize) -> usize {
        let mut position = self.collect_table_ref(tokens, from, end);

        while let Some(next) = next_significant(tokens, position, end) {
            if !tokens[next].is_symbol(',') {
                break;
            }
            position = self.collect_table_ref(tokens, next + 1, end);
        }

        position
    }

    fn collect_table_ref(&mut self, tokens: &[Token], from: usize, end: usize) -> usize {
        let Some(mut position) = next_significant(tokens, from, end) else {
            return end;
        };

        if tokens[position].is_symbol('(') {
            let after_group = skip_group(tokens, position, end);
            self.collect_alias(tokens, after_group, end, None);
            // dive into the group so nested FROM clauses are scanned too
            return position + 1;
        }

        if tokens[position].kind != TokenKind::Identifier {
            return position;
        }

        let mut token_positions = vec![position];
        let mut name = tokens[position].text.clone();
        // dotted names (schema.table) count only when written without gaps
        while position + 2 < end
            && tokens[position + 1].is_symbol('.')
            && tokens[position + 2].kind == TokenKind::Identifier
            && tokens[position].end == tokens[position + 1].start
            && tokens[position + 1].end == tokens[position + 2].start
        {
            name.push('.');
            name.push_str(&tokens[position + 2].text);
            token_positions.push(position + 2);
            position += 2;
        }

        for table_position in &token_positions {
            self.table_positions.insert(*table_position);
        }
        self.table_refs.push(TableRef { token_positions, name: name.clone() });

        self.collect_alias(tokens, position + 1, end, Some(name))
    }

    fn collect_alias(&mut self, tokens: &[Token], from: usize, end: usize, table: Option<String>) -> usize {
        let Some(next) = next_significant(tokens, from, end) else {
            if let Some(name) = table {
                self.bindings.insert(name.to_lowercase(), name);
            }
            return end;
        };

        let mut alias_at = next;
        if tokens[next].is_keyword("AS") {
            let Some(after) = next_significant(tokens, next + 1, end) else {
                return end;
            };
            alias_at = after;
        }

        if tokens[alias_at].kind != TokenKind::Identifier {
            if let Some(name) = table {
                self.bindings.insert(name.to_lowercase(), name);
            }
            return from;
        }

        self.alias_positions.insert(alias_at);
        let visible = tokens[alias_at].text.to_lowercase();
        match table {
            Some(name) => {
                self.bindings.insert(visible, name);
            }
            None => {
                self.subquery_aliases.insert(visible);
            }
        }

        alias_at + 1
    }
}

fn skip_group(tokens: &[Token], open: usize, end: usize) -> usize {
    let mut depth = 0usize;
    let mut position = open;

    while position < end {
        if tokens[position].is_symbol('(') {
            depth += 1;
        }
        if tokens[position].is_symbol(')') {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return position + 1;
            }
        }
        position += 1;
    }

    end
}

#[cfg(test)]
mod tests {
    use crate::parser::Tokenizer;
    use crate::rewriter::StatementContext;

    fn context(text: &str) -> StatementContext {
        let tokens = Tokenizer::default().tokenize(text).expect("Failed to tokenize");
        let range = 0..tokens.len();
        StatementContext::build(&tokens, range)
    }

    #[test]
    pub fn test_alias_binding() {
        let ctx = context("SELECT * FROM customers c");

        assert_eq!(ctx.resolve("c"), Some("customers"));
        assert_eq!(ctx.resolve("customers"), None);
    }

    #[test]
    pub fn test_table_without_alias_binds_itself() {
        let ctx = context("SELECT * FROM customers WHERE id = 1");

        assert_eq!(ctx.resolve("customers"), Some("customers"));
    }

    #[test]
    pub fn test_as_alias_and_join() {
        let ctx = context("SELECT * FROM customers AS c INNER JOIN orders_legacy o ON c.id = o.cid");

        assert_eq!(ctx.resolve("c"), Some("customers"));
        assert_eq!(ctx.resolve("o"), Some("orders_legacy"));
    }

    #[test]
    pub fn test_comma_separated_from_list() {
        let ctx = context("SELECT * FROM customers c, orders_legacy o, doctors");

        assert_eq!(ctx.resolve("c"), Some("customers"));
        assert_eq!(ctx.resolve("o"), Some("orders_legacy"));
        assert_eq!(ctx.resolve("doctors"), Some("doctors"));
    }

    #[test]
    pub fn test_dotted_table_name() {
        let ctx = context("SELECT * FROM prod.inventory i");

        assert_eq!(ctx.resolve("i"), Some("prod.inventory"));
    }

    #[test]
    pub fn test_subquery_alias_is_known_but_unresolvable() {
        let ctx = context("SELECT * FROM (SELECT id FROM customers) q WHERE q.id = 1");

        assert!(ctx.is_subquery_alias("q"));
        assert_eq!(ctx.resolve("q"), None);
        // the inner FROM is still scanned
        assert_eq!(ctx.resolve("customers"), Some("customers"));
    }

    #[test]
    pub fn test_alias_case_is_insensitive() {
        let ctx = context("SELECT * FROM customers C WHERE C.id = 1");

        assert_eq!(ctx.resolve("c"), Some("customers"));
    }
}
