//! Convenience re-exports for common query-object usage

// Builder and output
pub use crate::query_builder::{ExpressionBuilder, ParameterTable, PositionalStatement, Statement};

// Clause model
pub use crate::query_builder::{JoinClause, JoinType, SelectMode, SortOrder, WithOperator};

// Error types
pub use crate::errors::QueryError;

// Values
pub use type_mapping::BoundValue;
