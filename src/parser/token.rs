#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    QuotedIdentifier,
    StringLiteral,
    Number,
    Symbol(char),
    Whitespace,
    LineComment,
    BlockComment,
}

impl TokenKind {
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// A classified span of the source text. `start`/`end` are char positions,
/// `byte_start` the byte offset, and `text` the exact source slice, so a
/// token stream reassembles to the original input byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub byte_start: usize,
    pub text: String,
}

impl Token {
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(word)
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol(symbol)
    }
}

pub fn next_significant(tokens: &[Token], from: usize, end: usize) -> Option<usize> {
    let mut position = from;
    while position < end.min(tokens.len()) {
        if !tokens[position].is_trivia() {
            return Some(position);
        }
        position += 1;
    }

    None
}

pub fn prev_significant(tokens: &[Token], from: usize, start: usize) -> Option<usize> {
    let mut position = from;
    while position > start {
        position -= 1;
        if !tokens[position].is_trivia() {
            return Some(position);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use crate::parser::{next_significant, prev_significant, Dialect, Tokenizer};

    #[test]
    pub fn test_significant_navigation() {
        let tokens = Tokenizer::new(Dialect::ansi())
            .tokenize("a /* x */ , b")
            .expect("Failed to tokenize");

        let comma = next_significant(&tokens, 1, tokens.len()).expect("Missing comma");
        assert!(tokens[comma].is_symbol(','));

        let back = prev_significant(&tokens, comma, 0).expect("Missing identifier");
        assert_eq!(tokens[back].text, "a");
    }
}
