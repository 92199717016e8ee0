//! Expression builder
//!
//! Accumulates sources, joins, conditions and trailing clauses in any call
//! order and renders them through [`SqlGenerator`]. Every literal value is
//! stored in the parameter table under a freshly allocated token; statement
//! text only ever contains the token's placeholder.
//!
//! The builder is a single-owner accumulator. It does not check the boolean
//! structure of the WHERE sequence: connectives and parentheses are emitted
//! exactly where the caller put them.

use crate::query_builder::aggregation::{SelectClause, SelectMode};
use crate::query_builder::filter::{Comparison, Condition, LogicalOperator, Operand, Parenthesis};
use crate::query_builder::grouping::Grouping;
use crate::query_builder::join::{JoinClause, JoinType};
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::source::Sources;
use crate::query_builder::sql_generation::SqlGenerator;
use crate::query_builder::statement::{render_text, Fragment, ParameterTable, Statement};
use crate::token::{Token, TokenCounter};
use indexmap::IndexMap;
use std::collections::HashMap;
use type_mapping::BoundValue;

/// Builder for parameterized query statements
#[derive(Debug, Clone, Default)]
pub struct ExpressionBuilder {
    pub(crate) sources: Sources,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) conditions: Vec<Condition>,
    pub(crate) select: Option<SelectClause>,
    pub(crate) distinct: bool,
    pub(crate) order_by: IndexMap<String, SortOrder>,
    pub(crate) grouping: Grouping,
    pub(crate) parameters: IndexMap<Token, BoundValue>,
    pub(crate) tokens: TokenCounter,
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- sources and joins ----

    /// Register a FROM source; registering a name again replaces its alias
    pub fn register_source(mut self, name: impl Into<String>, alias: Option<&str>) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            debug_log!("[QUERY_BUILDER] Ignoring source with empty name");
            return self;
        }
        self.sources.register(name, alias.map(str::to_string));
        self
    }

    /// Add a join; joins render in call order
    pub fn join(mut self, join: JoinClause) -> Self {
        self.joins.push(join);
        self
    }

    /// Add `LEFT JOIN source as alias`
    pub fn left_join(self, source: impl Into<String>, alias: impl Into<String>) -> Self {
        self.join(JoinClause::new(JoinType::LeftOuter, source).with_alias(alias))
    }

    /// Add `INNER JOIN source as alias`
    pub fn inner_join(self, source: impl Into<String>, alias: impl Into<String>) -> Self {
        self.join(JoinClause::new(JoinType::Inner, source).with_alias(alias))
    }

    // ---- value comparisons ----

    /// `field = :tok`
    pub fn eq(self, field: &str, value: impl Into<BoundValue>) -> Self {
        self.compare(field, Comparison::Equal, value.into())
    }

    /// `field != :tok`
    pub fn neq(self, field: &str, value: impl Into<BoundValue>) -> Self {
        self.compare(field, Comparison::NotEqual, value.into())
    }

    /// `field > :tok`
    pub fn gt(self, field: &str, value: impl Into<BoundValue>) -> Self {
        self.compare(field, Comparison::Greater, value.into())
    }

    /// `field >= :tok`
    pub fn ge(self, field: &str, value: impl Into<BoundValue>) -> Self {
        self.compare(field, Comparison::GreaterOrEqual, value.into())
    }

    /// `field < :tok`
    pub fn lt(self, field: &str, value: impl Into<BoundValue>) -> Self {
        self.compare(field, Comparison::Less, value.into())
    }

    /// `field <= :tok`
    pub fn le(self, field: &str, value: impl Into<BoundValue>) -> Self {
        self.compare(field, Comparison::LessOrEqual, value.into())
    }

    /// `field like :tok`; wildcards belong in the pattern value
    pub fn like(self, field: &str, pattern: impl Into<BoundValue>) -> Self {
        self.compare(field, Comparison::Like, pattern.into())
    }

    /// `field = other_field`. The other field is clause text, not a value.
    pub fn eq_field(self, field: &str, other_field: &str) -> Self {
        self.compare_field(field, Comparison::Equal, other_field)
    }

    /// `field != other_field`. The other field is clause text, not a value.
    pub fn neq_field(self, field: &str, other_field: &str) -> Self {
        self.compare_field(field, Comparison::NotEqual, other_field)
    }

    /// `field in (:a, :b, ...)`, one token per element
    ///
    /// An empty input renders `field in ()`.
    pub fn in_values<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<BoundValue>,
    {
        self.in_condition(field, values, false)
    }

    /// `field not in (:a, :b, ...)`, one token per element
    pub fn not_in_values<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<BoundValue>,
    {
        self.in_condition(field, values, true)
    }

    /// `field in :tok`, binding the whole collection to one token
    pub fn in_list<I, V>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<BoundValue>,
    {
        let list = BoundValue::List(values.into_iter().map(Into::into).collect());
        let token = self.bind(list);
        self.conditions.push(Condition::InList {
            field: field.to_string(),
            token,
        });
        self
    }

    /// `field[:key] = :value`
    pub fn map_eq(
        mut self,
        field: &str,
        key: impl Into<BoundValue>,
        value: impl Into<BoundValue>,
    ) -> Self {
        let key = self.bind(key.into());
        let value = self.bind(value.into());
        self.conditions.push(Condition::MapEntry {
            field: field.to_string(),
            key,
            value,
        });
        self
    }

    pub fn is_null(mut self, field: &str) -> Self {
        self.conditions.push(Condition::Null {
            field: field.to_string(),
            negated: false,
        });
        self
    }

    pub fn is_not_null(mut self, field: &str) -> Self {
        self.conditions.push(Condition::Null {
            field: field.to_string(),
            negated: true,
        });
        self
    }

    // ---- structure ----

    pub fn and(self) -> Self {
        self.logical(LogicalOperator::And)
    }

    pub fn or(self) -> Self {
        self.logical(LogicalOperator::Or)
    }

    pub fn not(self) -> Self {
        self.logical(LogicalOperator::Not)
    }

    pub fn open(mut self) -> Self {
        self.conditions.push(Condition::Parenthesis(Parenthesis::Open));
        self
    }

    pub fn close(mut self) -> Self {
        self.conditions.push(Condition::Parenthesis(Parenthesis::Close));
        self
    }

    // ---- sub-queries ----

    /// Merge a nested builder as `(<nested statement>)`
    ///
    /// The nested builder is only read. Its tokens are renamed into this
    /// builder's namespace and its values copied into this parameter table.
    pub fn sub_query(mut self, nested: &ExpressionBuilder) -> Self {
        let fragments = self.merge_nested(nested);
        self.conditions.push(Condition::SubQuery {
            field: None,
            fragments,
        });
        self
    }

    /// Merge a nested builder as `field in (<nested statement>)`
    pub fn in_sub_query(mut self, field: &str, nested: &ExpressionBuilder) -> Self {
        let fragments = self.merge_nested(nested);
        self.conditions.push(Condition::SubQuery {
            field: Some(field.to_string()),
            fragments,
        });
        self
    }

    // ---- select modes ----

    /// `SELECT field`
    pub fn select(mut self, field: impl Into<String>) -> Self {
        self.select = Some(SelectClause::with_operand(SelectMode::Select, field));
        self
    }

    /// `SELECT count(*)`
    pub fn select_count(mut self) -> Self {
        self.select = Some(SelectClause::new(SelectMode::Count));
        self
    }

    /// `SELECT count(field)`
    pub fn select_count_of(mut self, field: impl Into<String>) -> Self {
        self.select = Some(SelectClause::with_operand(SelectMode::Count, field));
        self
    }

    pub fn select_sum(mut self, field: impl Into<String>) -> Self {
        self.select = Some(SelectClause::with_operand(SelectMode::Sum, field));
        self
    }

    pub fn select_avg(mut self, field: impl Into<String>) -> Self {
        self.select = Some(SelectClause::with_operand(SelectMode::Avg, field));
        self
    }

    pub fn select_min(mut self, field: impl Into<String>) -> Self {
        self.select = Some(SelectClause::with_operand(SelectMode::Min, field));
        self
    }

    pub fn select_max(mut self, field: impl Into<String>) -> Self {
        self.select = Some(SelectClause::with_operand(SelectMode::Max, field));
        self
    }

    /// Prefix the select operand with DISTINCT
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Turn the statement into a `DELETE`
    pub fn delete(mut self) -> Self {
        self.select = Some(SelectClause::new(SelectMode::Delete));
        self
    }

    /// `SELECT new map(field as alias, ...)`
    ///
    /// Fields and aliases are written into the statement as given.
    #[deprecated(note = "map projection text is not parameterized; use select with explicit fields")]
    pub fn select_map(mut self, mapping: &[(&str, &str)]) -> Self {
        let operand = mapping
            .iter()
            .map(|(field, alias)| format!("{} as {}", field, alias))
            .collect::<Vec<_>>()
            .join(", ");
        self.select = Some(SelectClause::with_operand(SelectMode::Map, operand));
        self
    }

    // ---- trailing clauses ----

    /// Add ordering; a repeated field keeps its position and takes the new direction
    pub fn order_by(mut self, field: &str, order: impl Into<SortOrder>) -> Self {
        self.order_by.insert(field.to_string(), order.into());
        self
    }

    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.grouping = self.grouping.group_by(field);
        self
    }

    pub fn having(mut self, expression: impl Into<String>) -> Self {
        self.grouping = self.grouping.having(expression);
        self
    }

    // ---- output ----

    /// Copy of the parameter table, keyed by token name
    pub fn injection_parameters(&self) -> ParameterTable {
        self.parameters
            .iter()
            .map(|(token, value)| (token.name(), value.clone()))
            .collect()
    }

    /// Render the statement text. Repeatable, leaves state untouched.
    pub fn build(&self) -> String {
        let text = render_text(&SqlGenerator::render(self));
        debug_log!(
            "[QUERY_BUILDER] Built statement with {} parameters: {}",
            self.parameters.len(),
            text
        );
        text
    }

    /// Render the statement with its parameter table for execution
    pub fn statement(&self) -> Statement {
        Statement::new(SqlGenerator::render(self), self.injection_parameters())
    }

    /// Number of tokens allocated since creation or the last [`clear`](Self::clear)
    pub fn token_count(&self) -> u32 {
        self.tokens.allocated()
    }

    /// Reset every structure and restart the token sequence
    pub fn clear(&mut self) -> &mut Self {
        self.sources.clear();
        self.joins.clear();
        self.conditions.clear();
        self.select = None;
        self.distinct = false;
        self.order_by.clear();
        self.grouping = Grouping::new();
        self.parameters.clear();
        self.tokens.reset();
        self
    }

    // ---- internals ----

    fn bind(&mut self, value: BoundValue) -> Token {
        let token = self.tokens.next_token();
        trace_log!("[QUERY_BUILDER] Bound {} value to token {}", value.kind(), token);
        self.parameters.insert(token.clone(), value);
        token
    }

    fn compare(mut self, field: &str, comparison: Comparison, value: BoundValue) -> Self {
        let token = self.bind(value);
        self.conditions.push(Condition::Compare {
            field: field.to_string(),
            comparison,
            operand: Operand::Param(token),
        });
        self
    }

    fn compare_field(mut self, field: &str, comparison: Comparison, other_field: &str) -> Self {
        self.conditions.push(Condition::Compare {
            field: field.to_string(),
            comparison,
            operand: Operand::Field(other_field.to_string()),
        });
        self
    }

    fn in_condition<I, V>(mut self, field: &str, values: I, negated: bool) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<BoundValue>,
    {
        let tokens: Vec<Token> = values
            .into_iter()
            .map(|value| self.bind(value.into()))
            .collect();
        self.conditions.push(Condition::In {
            field: field.to_string(),
            tokens,
            negated,
        });
        self
    }

    fn logical(mut self, operator: LogicalOperator) -> Self {
        self.conditions.push(Condition::Logical(operator));
        self
    }

    /// Render `nested` and rename its tokens into this builder
    fn merge_nested(&mut self, nested: &ExpressionBuilder) -> Vec<Fragment> {
        let mut renames: HashMap<Token, Token> = HashMap::with_capacity(nested.parameters.len());

        for (token, value) in &nested.parameters {
            let renamed = token.clone().merged(self.tokens.next_slot());
            trace_log!("[QUERY_BUILDER] Merged token {} as {}", token, renamed);
            self.parameters.insert(renamed.clone(), value.clone());
            renames.insert(token.clone(), renamed);
        }

        debug_log!(
            "[QUERY_BUILDER] Merging sub-query with {} parameters",
            renames.len()
        );

        SqlGenerator::render(nested)
            .into_iter()
            .map(|fragment| fragment.rename(&renames))
            .collect()
    }
}
