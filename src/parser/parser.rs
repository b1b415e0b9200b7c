//! Predicate parser
//!
//! Parses tokens into predicate expression trees.

use crate::common::error::{SieveError, SieveResult};
use crate::expression::{
    BoxedExpression, ComparisonExpression, ComparisonOp, ConjunctionExpression,
    ConstantExpression, NotExpression,
};
use crate::parser::keywords::Keyword;
use crate::parser::tokenizer::{Token, TokenType};
use crate::types::{TruthValue, Value};

/// Predicate parser
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Create a new parser with the given tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse a single condition
    pub fn parse_condition(&mut self) -> SieveResult<BoxedExpression> {
        let condition = self.parse_or_expression()?;

        if !self.current_token().is_eof() {
            return Err(SieveError::Parse(format!(
                "Unexpected token after condition: {:?}",
                self.current_token().token_type
            )));
        }

        Ok(condition)
    }

    /// Parse OR expression
    fn parse_or_expression(&mut self) -> SieveResult<BoxedExpression> {
        let mut left = self.parse_and_expression()?;

        while self.consume_keyword(Keyword::Or).is_ok() {
            let right = self.parse_and_expression()?;
            left = Box::new(ConjunctionExpression::or(left, right));
        }

        Ok(left)
    }

    /// Parse AND expression
    fn parse_and_expression(&mut self) -> SieveResult<BoxedExpression> {
        let mut left = self.parse_not_expression()?;

        while self.consume_keyword(Keyword::And).is_ok() {
            let right = self.parse_not_expression()?;
            left = Box::new(ConjunctionExpression::and(left, right));
        }

        Ok(left)
    }

    /// Parse NOT expression
    fn parse_not_expression(&mut self) -> SieveResult<BoxedExpression> {
        if self.consume_keyword(Keyword::Not).is_ok() {
            let expression = self.parse_not_expression()?;
            Ok(Box::new(NotExpression::new(expression)))
        } else {
            self.parse_primary_expression()
        }
    }

    /// Parse a parenthesized condition, a boolean constant, or a comparison
    fn parse_primary_expression(&mut self) -> SieveResult<BoxedExpression> {
        match &self.current_token().token_type {
            TokenType::LeftParen => {
                self.consume_token(&TokenType::LeftParen)?;
                let inner = self.parse_or_expression()?;
                self.consume_token(&TokenType::RightParen)?;
                Ok(inner)
            }
            TokenType::Keyword(Keyword::True) => {
                self.consume_keyword(Keyword::True)?;
                Ok(Box::new(ConstantExpression::new(TruthValue::True)))
            }
            TokenType::Keyword(Keyword::False) => {
                self.consume_keyword(Keyword::False)?;
                Ok(Box::new(ConstantExpression::new(TruthValue::False)))
            }
            TokenType::Keyword(Keyword::Null) => {
                self.consume_keyword(Keyword::Null)?;
                Ok(Box::new(ConstantExpression::new(TruthValue::Unknown)))
            }
            TokenType::Identifier(_) => self.parse_comparison_expression(),
            other => Err(SieveError::Parse(format!("Unexpected token: {:?}", other))),
        }
    }

    /// Parse a column reference compared against a literal
    fn parse_comparison_expression(&mut self) -> SieveResult<BoxedExpression> {
        let first = self.consume_identifier()?;
        let (table, column) = if self.consume_token(&TokenType::Dot).is_ok() {
            (Some(first), self.consume_identifier()?)
        } else {
            (None, first)
        };

        if self.consume_keyword(Keyword::Is).is_ok() {
            let negated = self.consume_keyword(Keyword::Not).is_ok();
            self.consume_keyword(Keyword::Null)?;
            let comparison = if negated {
                ComparisonExpression::is_not_null(table.as_deref(), &column)
            } else {
                ComparisonExpression::is_null(table.as_deref(), &column)
            };
            return Ok(Box::new(comparison));
        }

        let op = self.parse_comparison_operator()?;
        let value = self.parse_literal()?;
        Ok(Box::new(ComparisonExpression::new(
            table.as_deref(),
            &column,
            op,
            value,
        )))
    }

    /// Parse a comparison operator token
    fn parse_comparison_operator(&mut self) -> SieveResult<ComparisonOp> {
        let op = match self.current_token().token_type {
            TokenType::Equals => ComparisonOp::Equal,
            TokenType::NotEquals => ComparisonOp::NotEqual,
            TokenType::LessThan => ComparisonOp::LessThan,
            TokenType::LessThanOrEqual => ComparisonOp::LessThanOrEqual,
            TokenType::GreaterThan => ComparisonOp::GreaterThan,
            TokenType::GreaterThanOrEqual => ComparisonOp::GreaterThanOrEqual,
            _ => {
                return Err(SieveError::Parse(format!(
                    "Expected comparison operator, found {:?}",
                    self.current_token().token_type
                )))
            }
        };
        self.position += 1;
        Ok(op)
    }

    /// Parse a literal value
    fn parse_literal(&mut self) -> SieveResult<Value> {
        if self.consume_token(&TokenType::Minus).is_ok() {
            let text = self.consume_numeric_literal()?;
            // negate in the text so i64::MIN parses
            let value = format!("-{}", text)
                .parse::<i64>()
                .map_err(|_| SieveError::Parse(format!("Invalid integer literal -{}", text)))?;
            return Ok(Value::Integer(value));
        }

        match self.current_token().token_type.clone() {
            TokenType::NumericLiteral(text) => {
                self.position += 1;
                let value = text
                    .parse::<i64>()
                    .map_err(|_| SieveError::Parse(format!("Invalid integer literal {}", text)))?;
                Ok(Value::Integer(value))
            }
            TokenType::StringLiteral(text) => {
                self.position += 1;
                Ok(Value::Varchar(text))
            }
            TokenType::Keyword(Keyword::True) => {
                self.position += 1;
                Ok(Value::Boolean(true))
            }
            TokenType::Keyword(Keyword::False) => {
                self.position += 1;
                Ok(Value::Boolean(false))
            }
            TokenType::Keyword(Keyword::Null) => {
                self.position += 1;
                Ok(Value::Null)
            }
            other => Err(SieveError::Parse(format!(
                "Expected literal, found {:?}",
                other
            ))),
        }
    }

    fn current_token(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn consume_token(&mut self, token_type: &TokenType) -> SieveResult<&Token> {
        if self.current_token().token_type == *token_type {
            let token = &self.tokens[self.position];
            self.position += 1;
            Ok(token)
        } else {
            Err(SieveError::Parse(format!(
                "Expected token {:?}, found '{}'",
                token_type,
                self.current_token().text
            )))
        }
    }

    fn consume_keyword(&mut self, keyword: Keyword) -> SieveResult<&Token> {
        if self.current_token().is_keyword(keyword) {
            let token = &self.tokens[self.position];
            self.position += 1;
            Ok(token)
        } else {
            Err(SieveError::Parse(format!(
                "Expected keyword '{}', found '{}'",
                keyword,
                self.current_token().text
            )))
        }
    }

    fn consume_identifier(&mut self) -> SieveResult<String> {
        match &self.current_token().token_type {
            TokenType::Identifier(name) => {
                let name = name.clone();
                self.position += 1;
                Ok(name)
            }
            _ => Err(SieveError::Parse(format!(
                "Expected identifier, found {:?}",
                self.current_token().token_type
            ))),
        }
    }

    fn consume_numeric_literal(&mut self) -> SieveResult<String> {
        match &self.current_token().token_type {
            TokenType::NumericLiteral(text) => {
                let text = text.clone();
                self.position += 1;
                Ok(text)
            }
            _ => Err(SieveError::Parse(format!(
                "Expected number, found {:?}",
                self.current_token().token_type
            ))),
        }
    }
}
