use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::parser::{Dialect, LexError, MarkerComparer, SqlParser, Token, TokenKind};

static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "SELECT", "FROM", "WHERE", "GROUP", "BY", "ORDER", "HAVING", "LIMIT", "OFFSET",
        "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "CROSS", "OUTER", "ON", "AS",
        "AND", "OR", "NOT", "IN", "IS", "NULL", "LIKE", "BETWEEN", "UNION", "ALL",
        "DISTINCT", "CASE", "WHEN", "THEN", "ELSE", "END", "EXISTS", "ASC", "DESC",
        "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE",
    ]
    .into_iter()
    .collect()
});

/// Splits SQL text into classified spans without losing a single byte.
/// Strings, quoted identifiers and comments are opaque; everything the
/// dialect does not claim falls through as a one-char symbol.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    dialect: Dialect,
    line_comment: MarkerComparer,
    block_open: MarkerComparer,
    block_close: MarkerComparer,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Dialect::ansi())
    }
}

impl Tokenizer {
    pub fn new(dialect: Dialect) -> Self {
        let line_comment = MarkerComparer::new(&dialect.line_comment);
        let block_open = MarkerComparer::new(&dialect.block_comment_open);
        let block_close = MarkerComparer::new(&dialect.block_comment_close);

        Self {
            dialect,
            line_comment,
            block_open,
            block_close,
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, LexError> {
        let mut parser = SqlParser::new(text);
        let mut tokens: Vec<Token> = vec![];
        let mut statement = 0;

        while !parser.eof() {
            let pivot = parser.position;
            let current = parser.current();

            if current.is_whitespace() {
                while !parser.eof() && parser.current().is_whitespace() {
                    parser.next();
                }
                tokens.push(make_token(&parser, TokenKind::Whitespace, pivot));
                continue;
            }

            if self.line_comment.compare(&parser) {
                while !parser.eof() && !MarkerComparer::is_break_line(parser.current()) {
                    parser.next();
                }
                tokens.push(make_token(&parser, TokenKind::LineComment, pivot));
                continue;
            }

            if self.block_open.compare(&parser) {
                // an unclosed block comment runs to end of input
                parser.jump(self.block_open.length);
                while !parser.eof() && !self.block_close.compare(&parser) {
                    parser.next();
                }
                parser.jump(self.block_close.length);
                tokens.push(make_token(&parser, TokenKind::BlockComment, pivot));
                continue;
            }

            if self.dialect.string_delimiters.contains(&current) {
                collect_quoted(&mut parser, current, statement)?;
                tokens.push(make_token(&parser, TokenKind::StringLiteral, pivot));
                continue;
            }

            if self.dialect.quoted_identifier_delimiters.contains(&current) {
                collect_quoted(&mut parser, current, statement)?;
                tokens.push(make_token(&parser, TokenKind::QuotedIdentifier, pivot));
                continue;
            }

            if current.is_alphabetic() || current == '_' {
                while !parser.eof() && is_word_char(parser.current()) {
                    parser.next();
                }
                let word = parser.text_from_pivot(pivot);
                let kind = if KEYWORDS.contains(word.to_ascii_uppercase().as_str()) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                };
                tokens.push(make_token(&parser, kind, pivot));
                continue;
            }

            if current.is_ascii_digit() {
                while !parser.eof() && (parser.current().is_ascii_alphanumeric() || parser.current() == '.') {
                    parser.next();
                }
                tokens.push(make_token(&parser, TokenKind::Number, pivot));
                continue;
            }

            if current == ';' {
                statement += 1;
            }
            parser.next();
            tokens.push(make_token(&parser, TokenKind::Symbol(current), pivot));
        }

        Ok(tokens)
    }
}

fn make_token(parser: &SqlParser, kind: TokenKind, pivot: usize) -> Token {
    Token {
        kind,
        start: pivot,
        end: parser.position,
        byte_start: parser.byte_offset(pivot),
        text: parser.text_from_pivot(pivot),
    }
}

fn collect_quoted(parser: &mut SqlParser, delimiter: char, statement: usize) -> Result<(), LexError> {
    let pivot = parser.position;
    parser.next();

    while !parser.eof() {
        if parser.current() == delimiter {
            // a doubled delimiter is an escaped one
            if parser.peek(1) == delimiter {
                parser.jump(2);
                continue;
            }
            parser.next();
            return Ok(());
        }
        parser.next();
    }

    Err(LexError::UnterminatedLiteral {
        statement,
        offset: parser.byte_offset(pivot),
    })
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}
