pub mod parser;

pub mod rules;
pub use rules::{RenameRule, RuleKind, RuleSet, RuleSetError};

pub mod rewriter;
pub use rewriter::{Rewrite, RewriteError, RewriteOptions, Rewriter};

pub mod reviewer;

pub mod batch;
