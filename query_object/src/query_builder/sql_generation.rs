//! Statement assembly
//!
//! Renders accumulated builder state in a fixed clause order: select, FROM,
//! JOINs, WHERE, ORDER BY, GROUP BY, HAVING. Call order only matters for the
//! WHERE sequence, the join list and the FROM/ORDER BY maps.

use crate::query_builder::aggregation::SelectClause;
use crate::query_builder::builder::ExpressionBuilder;
use crate::query_builder::filter::{Condition, Operand};
use crate::query_builder::grouping::Grouping;
use crate::query_builder::join::JoinClause;
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::source::Sources;
use crate::query_builder::statement::{Fragment, FragmentBuffer};
use indexmap::IndexMap;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Render the whole statement
    pub fn render(builder: &ExpressionBuilder) -> Vec<Fragment> {
        let mut buffer = FragmentBuffer::new();

        if let Some(select) = &builder.select {
            buffer.push_clause(&Self::build_select_clause(select, builder.distinct));
        }

        let from_clause = Self::build_from_clause(&builder.sources);
        if !from_clause.is_empty() {
            buffer.push_clause(&from_clause);
        }

        let join_clause = Self::build_join_clause(&builder.joins);
        if !join_clause.is_empty() {
            buffer.push_clause(&join_clause);
        }

        if !builder.conditions.is_empty() {
            buffer.push_clause("WHERE ");
            Self::build_where_clause(&builder.conditions, &mut buffer);
        }

        let order_clause = Self::build_order_clause(&builder.order_by);
        if !order_clause.is_empty() {
            buffer.push_clause(&order_clause);
        }

        let group_by_clause = Self::build_group_by_clause(&builder.grouping);
        if !group_by_clause.is_empty() {
            buffer.push_clause(&group_by_clause);
        }

        let having_clause = Self::build_having_clause(&builder.grouping);
        if !having_clause.is_empty() {
            buffer.push_clause(&having_clause);
        }

        buffer.into_fragments()
    }

    /// Build the leading SELECT/DELETE clause
    pub fn build_select_clause(select: &SelectClause, distinct: bool) -> String {
        let keyword = select.mode.keyword();
        let distinct_part = if distinct { "DISTINCT " } else { "" };

        match select.mode.function() {
            Some(function) => format!(
                "{} {}({}{})",
                keyword,
                function,
                distinct_part,
                select.operand()
            ),
            None if select.operand().is_empty() => keyword.to_string(),
            None => format!("{} {}{}", keyword, distinct_part, select.operand()),
        }
    }

    /// Build FROM clause from registered sources
    pub fn build_from_clause(sources: &Sources) -> String {
        if sources.is_empty() {
            return "".to_string();
        }

        let entries: Vec<String> = sources
            .iter()
            .map(|(name, alias)| match alias {
                Some(alias) if !alias.is_empty() => format!("{} as {}", name, alias),
                _ => name.to_string(),
            })
            .collect();

        format!("FROM {}", entries.join(", "))
    }

    /// Build JOIN clauses
    pub fn build_join_clause(joins: &[JoinClause]) -> String {
        if joins.is_empty() {
            return "".to_string();
        }

        joins
            .iter()
            .map(|join| {
                let mut clause = join.join_type.to_sql().to_string();
                if join.fetch {
                    clause.push_str(" FETCH");
                }
                clause.push(' ');
                clause.push_str(&join.source);
                if let Some(alias) = &join.alias {
                    clause.push_str(" as ");
                    clause.push_str(alias);
                }
                if let Some(with) = join.effective_with() {
                    clause.push_str(&format!(
                        " WITH {} {} {}",
                        with.left,
                        with.operator.to_sql(),
                        with.right
                    ));
                }
                clause
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Append the WHERE body: conditions concatenated in insertion order
    pub(crate) fn build_where_clause(conditions: &[Condition], buffer: &mut FragmentBuffer) {
        for condition in conditions {
            Self::build_condition(condition, buffer);
        }
    }

    fn build_condition(condition: &Condition, buffer: &mut FragmentBuffer) {
        match condition {
            Condition::Compare {
                field,
                comparison,
                operand,
            } => {
                buffer.push_str(&format!("{} {} ", field, comparison.to_sql()));
                match operand {
                    Operand::Param(token) => buffer.push_param(token),
                    Operand::Field(other) => buffer.push_str(other),
                }
            }
            Condition::In {
                field,
                tokens,
                negated,
            } => {
                let keyword = if *negated { "not in" } else { "in" };
                buffer.push_str(&format!("{} {} (", field, keyword));
                for (i, token) in tokens.iter().enumerate() {
                    if i > 0 {
                        buffer.push_str(", ");
                    }
                    buffer.push_param(token);
                }
                buffer.push_str(")");
            }
            Condition::InList { field, token } => {
                buffer.push_str(&format!("{} in ", field));
                buffer.push_param(token);
            }
            Condition::Null { field, negated } => {
                if *negated {
                    buffer.push_str(&format!(" {} is not null ", field));
                } else {
                    buffer.push_str(&format!(" {} is null ", field));
                }
            }
            Condition::MapEntry { field, key, value } => {
                buffer.push_str(&format!("{}[", field));
                buffer.push_param(key);
                buffer.push_str("] = ");
                buffer.push_param(value);
            }
            Condition::Logical(operator) => buffer.push_str(operator.to_sql()),
            Condition::Parenthesis(mark) => buffer.push_str(mark.to_sql()),
            Condition::SubQuery { field, fragments } => {
                if let Some(field) = field {
                    buffer.push_str(&format!("{} in ", field));
                }
                buffer.push_str("(");
                buffer.extend(fragments);
                buffer.push_str(")");
            }
        }
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(order_by: &IndexMap<String, SortOrder>) -> String {
        if order_by.is_empty() {
            return "".to_string();
        }

        let order_items: Vec<String> = order_by
            .iter()
            .map(|(field, order)| format!("{} {}", field, order.to_sql()))
            .collect();

        format!("ORDER BY {}", order_items.join(", "))
    }

    /// Build GROUP BY clause
    pub fn build_group_by_clause(grouping: &Grouping) -> String {
        match &grouping.group_by {
            Some(field) if !field.is_empty() => format!("GROUP BY {}", field),
            _ => "".to_string(),
        }
    }

    /// Build HAVING clause
    pub fn build_having_clause(grouping: &Grouping) -> String {
        match &grouping.having {
            Some(expression) if !expression.is_empty() => format!("HAVING {}", expression),
            _ => "".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::aggregation::SelectMode;
    use crate::query_builder::join::{JoinType, WithOperator};

    #[test]
    fn test_select_clause_shapes() {
        let plain = SelectClause::with_operand(SelectMode::Select, "u");
        assert_eq!(SqlGenerator::build_select_clause(&plain, false), "SELECT u");
        assert_eq!(
            SqlGenerator::build_select_clause(&plain, true),
            "SELECT DISTINCT u"
        );

        let count = SelectClause::new(SelectMode::Count);
        assert_eq!(
            SqlGenerator::build_select_clause(&count, false),
            "SELECT count(*)"
        );

        let distinct_count = SelectClause::with_operand(SelectMode::Count, "u.id");
        assert_eq!(
            SqlGenerator::build_select_clause(&distinct_count, true),
            "SELECT count(DISTINCT u.id)"
        );

        let avg = SelectClause::with_operand(SelectMode::Avg, "o.total");
        assert_eq!(
            SqlGenerator::build_select_clause(&avg, false),
            "SELECT avg(o.total)"
        );

        let delete = SelectClause::new(SelectMode::Delete);
        assert_eq!(SqlGenerator::build_select_clause(&delete, false), "DELETE");
    }

    #[test]
    fn test_from_clause() {
        let mut sources = Sources::new();
        assert_eq!(SqlGenerator::build_from_clause(&sources), "");

        sources.register("User".to_string(), Some("u".to_string()));
        sources.register("Role".to_string(), None);
        assert_eq!(
            SqlGenerator::build_from_clause(&sources),
            "FROM User as u, Role"
        );
    }

    #[test]
    fn test_join_clause_rendering() {
        let joins = vec![
            JoinClause::new(JoinType::LeftOuter, "u.roles")
                .with_alias("r")
                .fetch(),
            JoinClause::new(JoinType::Inner, "u.group")
                .with_alias("g")
                .with_condition("g.active", WithOperator::Equal, "true"),
        ];

        assert_eq!(
            SqlGenerator::build_join_clause(&joins),
            "LEFT JOIN FETCH u.roles as r INNER JOIN u.group as g WITH g.active = true"
        );
    }

    #[test]
    fn test_join_clause_skips_partial_with() {
        let joins = vec![JoinClause::new(JoinType::Full, "u.group")
            .with_alias("g")
            .with_condition("", WithOperator::NotEqual, "g.owner")];

        assert_eq!(
            SqlGenerator::build_join_clause(&joins),
            "FULL JOIN u.group as g"
        );
    }

    #[test]
    fn test_order_clause_keeps_insertion_order() {
        let mut order_by = IndexMap::new();
        order_by.insert("u.name".to_string(), SortOrder::Asc);
        order_by.insert("u.created".to_string(), SortOrder::Desc);

        assert_eq!(
            SqlGenerator::build_order_clause(&order_by),
            "ORDER BY u.name asc, u.created desc"
        );
        assert_eq!(SqlGenerator::build_order_clause(&IndexMap::new()), "");
    }

    #[test]
    fn test_group_and_having() {
        let grouping = Grouping::new().group_by("u.country").having("count(u) > 1");
        assert_eq!(
            SqlGenerator::build_group_by_clause(&grouping),
            "GROUP BY u.country"
        );
        assert_eq!(
            SqlGenerator::build_having_clause(&grouping),
            "HAVING count(u) > 1"
        );
        assert_eq!(SqlGenerator::build_having_clause(&Grouping::new()), "");
    }
}
