pub mod sql_parser;
pub use sql_parser::*;

pub mod dialect;
pub use dialect::*;

pub mod marker_comparer;
pub use marker_comparer::*;

pub mod token;
pub use token::*;

pub mod lex_error;
pub use lex_error::*;

pub mod tokenizer;
pub use tokenizer::*;

pub mod statement;
pub use statement::*;
