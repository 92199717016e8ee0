//! WHERE clause elements
//!
//! A WHERE expression is a flat sequence of conditions rendered in insertion
//! order. Connectives and parentheses are conditions of their own, so the
//! caller decides the boolean structure; nothing here checks its balance.

use crate::query_builder::statement::Fragment;
use crate::token::Token;

/// Comparison operators that bind one value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,          // =
    NotEqual,       // !=
    Greater,        // >
    GreaterOrEqual, // >=
    Less,           // <
    LessOrEqual,    // <=
    Like,           // like
}

impl Comparison {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Comparison::Equal => "=",
            Comparison::NotEqual => "!=",
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Like => "like",
        }
    }
}

/// Logical connectives, rendered with surrounding spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
    Not,
}

impl LogicalOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            LogicalOperator::And => " and ",
            LogicalOperator::Or => " or ",
            LogicalOperator::Not => " not ",
        }
    }
}

/// Explicit grouping marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parenthesis {
    Open,
    Close,
}

impl Parenthesis {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Parenthesis::Open => "(",
            Parenthesis::Close => ")",
        }
    }
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Bound value, referenced through its token
    Param(Token),
    /// Another field, emitted verbatim as trusted clause text
    Field(String),
}

/// Single element of the WHERE sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field op operand`
    Compare {
        field: String,
        comparison: Comparison,
        operand: Operand,
    },
    /// `field in (:a, :b)` or `field not in (...)`, one token per element
    In {
        field: String,
        tokens: Vec<Token>,
        negated: bool,
    },
    /// `field in :tok`, one token bound to a whole collection
    InList { field: String, token: Token },
    /// ` field is null ` or ` field is not null `
    Null { field: String, negated: bool },
    /// `field[:key] = :value`
    MapEntry {
        field: String,
        key: Token,
        value: Token,
    },
    Logical(LogicalOperator),
    Parenthesis(Parenthesis),
    /// Rendered nested statement, tokens already renamed into this builder
    SubQuery {
        field: Option<String>,
        fragments: Vec<Fragment>,
    },
}

impl Condition {
    /// Field the condition applies to, `None` for connectives and marks
    pub fn field(&self) -> Option<&str> {
        match self {
            Condition::Compare { field, .. }
            | Condition::In { field, .. }
            | Condition::InList { field, .. }
            | Condition::Null { field, .. }
            | Condition::MapEntry { field, .. } => Some(field),
            Condition::SubQuery { field, .. } => field.as_deref(),
            Condition::Logical(_) | Condition::Parenthesis(_) => None,
        }
    }

    /// Tokens referenced by this condition, in render order
    pub fn tokens(&self) -> Vec<&Token> {
        match self {
            Condition::Compare {
                operand: Operand::Param(token),
                ..
            } => vec![token],
            Condition::Compare { .. } => Vec::new(),
            Condition::In { tokens, .. } => tokens.iter().collect(),
            Condition::InList { token, .. } => vec![token],
            Condition::MapEntry { key, value, .. } => vec![key, value],
            Condition::SubQuery { fragments, .. } => fragments
                .iter()
                .filter_map(|fragment| match fragment {
                    Fragment::Param(token) => Some(token),
                    Fragment::Text(_) => None,
                })
                .collect(),
            Condition::Null { .. } | Condition::Logical(_) | Condition::Parenthesis(_) => {
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_to_sql() {
        assert_eq!(Comparison::Equal.to_sql(), "=");
        assert_eq!(Comparison::NotEqual.to_sql(), "!=");
        assert_eq!(Comparison::GreaterOrEqual.to_sql(), ">=");
        assert_eq!(Comparison::Like.to_sql(), "like");
    }

    #[test]
    fn test_connectives_carry_spacing() {
        assert_eq!(LogicalOperator::And.to_sql(), " and ");
        assert_eq!(LogicalOperator::Or.to_sql(), " or ");
        assert_eq!(LogicalOperator::Not.to_sql(), " not ");
        assert_eq!(Parenthesis::Open.to_sql(), "(");
        assert_eq!(Parenthesis::Close.to_sql(), ")");
    }

    #[test]
    fn test_condition_field_and_tokens() {
        let condition = Condition::MapEntry {
            field: "u.attributes".to_string(),
            key: Token::Local(0),
            value: Token::Local(1),
        };
        assert_eq!(condition.field(), Some("u.attributes"));
        assert_eq!(condition.tokens().len(), 2);

        let logical = Condition::Logical(LogicalOperator::And);
        assert_eq!(logical.field(), None);
        assert!(logical.tokens().is_empty());

        let field_compare = Condition::Compare {
            field: "u.id".to_string(),
            comparison: Comparison::NotEqual,
            operand: Operand::Field("r.owner".to_string()),
        };
        assert!(field_compare.tokens().is_empty());
    }
}
