//! Query expression building
//!
//! Clause model, the expression builder and the statement assembler.

pub mod aggregation;
pub mod builder;
pub mod filter;
pub mod grouping;
pub mod join;
pub mod ordering;
pub mod source;
pub mod sql_generation;
pub mod statement;



pub use aggregation::{SelectClause, SelectMode};
pub use builder::ExpressionBuilder;
pub use filter::{Comparison, Condition, LogicalOperator, Operand, Parenthesis};
pub use grouping::Grouping;
pub use join::{JoinClause, JoinType, WithCondition, WithOperator};
pub use ordering::SortOrder;
pub use statement::{Fragment, ParameterTable, PositionalStatement, Statement};
