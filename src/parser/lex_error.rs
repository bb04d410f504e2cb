use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    UnterminatedLiteral { statement: usize, offset: usize },
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::UnterminatedLiteral { statement, offset } => write!(
                f,
                "unterminated string or quoted identifier at byte {offset} (statement {statement})"
            ),
        }
    }
}

impl std::error::Error for LexError {}
