use crate::parser::Dialect;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewriteOptions {
    pub dialect: Dialect,
    /// When set, an unresolvable alias fails the rewrite instead of being
    /// collected into the report.
    pub strict: bool,
}

impl RewriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}
