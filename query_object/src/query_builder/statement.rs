//! Rendered statements
//!
//! A statement is kept as a list of fragments: literal text and token
//! references. Text output, token renaming and positional conversion all
//! walk the fragments, so no placeholder is ever found by searching text.

use crate::errors::QueryError;
use crate::token::Token;
use indexmap::IndexMap;
use std::collections::HashMap;
use type_mapping::BoundValue;

/// Mapping from token name to the value bound to it
pub type ParameterTable = IndexMap<String, BoundValue>;

/// Piece of a rendered statement
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    Param(Token),
}

impl Fragment {
    /// Swap the token for its renamed form, if it has one
    pub fn rename(self, renames: &HashMap<Token, Token>) -> Fragment {
        match self {
            Fragment::Param(token) => match renames.get(&token) {
                Some(renamed) => Fragment::Param(renamed.clone()),
                None => Fragment::Param(token),
            },
            text => text,
        }
    }
}

/// Append-only fragment list that coalesces adjacent text
#[derive(Debug, Clone, Default)]
pub(crate) struct FragmentBuffer {
    fragments: Vec<Fragment>,
}

impl FragmentBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.fragments.last_mut() {
            Some(Fragment::Text(last)) => last.push_str(text),
            _ => self.fragments.push(Fragment::Text(text.to_string())),
        }
    }

    pub(crate) fn push_param(&mut self, token: &Token) {
        self.fragments.push(Fragment::Param(token.clone()));
    }

    pub(crate) fn extend(&mut self, fragments: &[Fragment]) {
        for fragment in fragments {
            match fragment {
                Fragment::Text(text) => self.push_str(text),
                Fragment::Param(token) => self.push_param(token),
            }
        }
    }

    /// Start a new top-level clause, separated from the previous one by a space
    pub(crate) fn push_clause(&mut self, clause: &str) {
        if !self.fragments.is_empty() {
            self.push_str(" ");
        }
        self.push_str(clause);
    }

    pub(crate) fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }
}

/// Render fragments to text with `:token` placeholders
pub fn render_text(fragments: &[Fragment]) -> String {
    let mut text = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Text(s) => text.push_str(s),
            Fragment::Param(token) => {
                text.push(':');
                text.push_str(&token.name());
            }
        }
    }
    text
}

/// Statement text plus the parameter table it references
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    fragments: Vec<Fragment>,
    parameters: ParameterTable,
}

/// Statement rewritten for drivers with `$n` placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalStatement {
    pub sql: String,
    pub values: Vec<BoundValue>,
}

impl Statement {
    pub fn new(fragments: Vec<Fragment>, parameters: ParameterTable) -> Self {
        Self {
            fragments,
            parameters,
        }
    }

    pub fn text(&self) -> String {
        render_text(&self.fragments)
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    pub fn into_parts(self) -> (String, ParameterTable) {
        (render_text(&self.fragments), self.parameters)
    }

    /// Convert named placeholders to `$1..$n` in order of appearance.
    ///
    /// List values expand to `($i, $j, ...)`. A token referenced twice
    /// reuses its positions.
    pub fn to_positional(&self, max_parameters: usize) -> Result<PositionalStatement, QueryError> {
        let mut sql = String::new();
        let mut values: Vec<BoundValue> = Vec::with_capacity(self.parameters.len());
        let mut placed: HashMap<&Token, String> = HashMap::new();

        for fragment in &self.fragments {
            match fragment {
                Fragment::Text(text) => sql.push_str(text),
                Fragment::Param(token) => {
                    if let Some(placeholder) = placed.get(token) {
                        sql.push_str(placeholder);
                        continue;
                    }

                    let name = token.name();
                    let value = self
                        .parameters
                        .get(&name)
                        .ok_or_else(|| QueryError::MissingParameter(name.clone()))?;

                    let placeholder = match value {
                        BoundValue::List(items) => {
                            let positions: Vec<String> = items
                                .iter()
                                .map(|item| {
                                    values.push(item.clone());
                                    format!("${}", values.len())
                                })
                                .collect();
                            format!("({})", positions.join(", "))
                        }
                        scalar => {
                            values.push(scalar.clone());
                            format!("${}", values.len())
                        }
                    };

                    sql.push_str(&placeholder);
                    placed.insert(token, placeholder);
                }
            }
        }

        if values.len() > max_parameters {
            return Err(QueryError::TooManyParameters {
                count: values.len(),
                max: max_parameters,
            });
        }

        Ok(PositionalStatement { sql, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(fragments: Vec<Fragment>, params: &[(&str, BoundValue)]) -> Statement {
        let parameters = params
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        Statement::new(fragments, parameters)
    }

    #[test]
    fn test_buffer_coalesces_text() {
        let mut buffer = FragmentBuffer::new();
        buffer.push_clause("SELECT u");
        buffer.push_clause("FROM User");
        buffer.push_str("");
        buffer.push_param(&Token::Local(0));
        buffer.push_str(" x");

        let fragments = buffer.into_fragments();
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0], Fragment::Text("SELECT u FROM User".to_string()));
    }

    #[test]
    fn test_render_text_writes_placeholders() {
        let fragments = vec![
            Fragment::Text("u.name = ".to_string()),
            Fragment::Param(Token::Local(3)),
        ];
        assert_eq!(render_text(&fragments), "u.name = :_3");
    }

    #[test]
    fn test_rename_only_touches_known_tokens() {
        let mut renames = HashMap::new();
        renames.insert(Token::Local(0), Token::Local(0).merged(4));

        let renamed = Fragment::Param(Token::Local(0)).rename(&renames);
        assert_eq!(renamed, Fragment::Param(Token::Local(0).merged(4)));

        let untouched = Fragment::Param(Token::Local(1)).rename(&renames);
        assert_eq!(untouched, Fragment::Param(Token::Local(1)));
    }

    #[test]
    fn test_to_positional_numbers_in_order() {
        let stmt = statement(
            vec![
                Fragment::Text("a = ".to_string()),
                Fragment::Param(Token::Local(1)),
                Fragment::Text(" and b = ".to_string()),
                Fragment::Param(Token::Local(0)),
            ],
            &[("_0", BoundValue::from("zero")), ("_1", BoundValue::from(1))],
        );

        let positional = stmt.to_positional(100).unwrap();
        assert_eq!(positional.sql, "a = $1 and b = $2");
        assert_eq!(
            positional.values,
            vec![BoundValue::Integer(1), BoundValue::from("zero")]
        );
    }

    #[test]
    fn test_to_positional_expands_lists() {
        let stmt = statement(
            vec![
                Fragment::Text("u.id in ".to_string()),
                Fragment::Param(Token::Local(0)),
            ],
            &[("_0", BoundValue::from(vec![7, 8, 9]))],
        );

        let positional = stmt.to_positional(100).unwrap();
        assert_eq!(positional.sql, "u.id in ($1, $2, $3)");
        assert_eq!(positional.values.len(), 3);
    }

    #[test]
    fn test_to_positional_reuses_repeated_tokens() {
        let stmt = statement(
            vec![
                Fragment::Param(Token::Local(0)),
                Fragment::Text(" = ".to_string()),
                Fragment::Param(Token::Local(0)),
            ],
            &[("_0", BoundValue::from(5))],
        );

        let positional = stmt.to_positional(100).unwrap();
        assert_eq!(positional.sql, "$1 = $1");
        assert_eq!(positional.values.len(), 1);
    }

    #[test]
    fn test_to_positional_missing_parameter() {
        let stmt = statement(vec![Fragment::Param(Token::Local(2))], &[]);
        assert_eq!(
            stmt.to_positional(100),
            Err(QueryError::MissingParameter("_2".to_string()))
        );
    }

    #[test]
    fn test_to_positional_parameter_limit() {
        let stmt = statement(
            vec![Fragment::Param(Token::Local(0))],
            &[("_0", BoundValue::from(vec![1, 2, 3]))],
        );
        assert_eq!(
            stmt.to_positional(2),
            Err(QueryError::TooManyParameters { count: 3, max: 2 })
        );
    }
}
