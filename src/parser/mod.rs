//! Condition parsing
//!
//! Turns predicate text into expression trees. The grammar is the
//! boolean fragment of SQL: comparisons between columns and literals,
//! `IS [NOT] NULL` tests, `NOT`, `AND`, `OR`, and parentheses. Every
//! string produced by [`Expression::to_sql`](crate::expression::Expression::to_sql)
//! parses back to an equivalent tree.

pub mod keywords;
pub mod parser;
pub mod tokenizer;

pub use keywords::*;
pub use parser::*;
pub use tokenizer::*;

use crate::common::error::SieveResult;
use crate::expression::BoxedExpression;

/// Main parser interface
pub struct ConditionParser {
    tokenizer: Tokenizer,
}

impl ConditionParser {
    /// Create a new condition parser
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    /// Parse a condition string into an expression tree
    pub fn parse(&self, input: &str) -> SieveResult<BoxedExpression> {
        let tokens = self.tokenizer.tokenize(input)?;
        let mut parser = Parser::new(tokens);
        parser.parse_condition()
    }
}

impl Default for ConditionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a condition string (convenience function)
pub fn parse_condition(input: &str) -> SieveResult<BoxedExpression> {
    ConditionParser::new().parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_condition_helper() -> SieveResult<()> {
        let expr = parse_condition("id = 1 AND name IS NULL")?;
        assert_eq!(expr.to_sql(), "((id = 1) AND (name IS NULL))");
        Ok(())
    }
}
