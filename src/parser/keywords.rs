//! Keywords recognized by the predicate grammar

use std::fmt;

/// Reserved words of the predicate grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    And,
    Or,
    Not,
    Is,
    True,
    False,
    Null,
}

impl Keyword {
    /// All keywords, for building the tokenizer lookup table
    pub fn all() -> &'static [Keyword] {
        &[
            Keyword::And,
            Keyword::Or,
            Keyword::Not,
            Keyword::Is,
            Keyword::True,
            Keyword::False,
            Keyword::Null,
        ]
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::Is => "IS",
            Keyword::True => "TRUE",
            Keyword::False => "FALSE",
            Keyword::Null => "NULL",
        };
        write!(f, "{}", text)
    }
}
