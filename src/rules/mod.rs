pub mod rename_rule;
pub use rename_rule::*;

pub mod rule_set;
pub use rule_set::*;
