pub mod statement_context;
pub use statement_context::*;

pub mod substitution;
pub use substitution::*;

pub mod rewrite_error;
pub use rewrite_error::*;

pub mod rewrite_options;
pub use rewrite_options::*;

pub mod rewriter;
pub use rewriter::*;
