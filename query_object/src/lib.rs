//! Query Object - parameterized query expression builder
//!
//! This crate assembles query statements from chained builder calls. Literal
//! values are always bound through placeholder tokens and returned in a
//! parameter table next to the statement text; nested builders merge in
//! under renamed tokens.

#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod errors;
pub mod prelude;
pub mod query_builder;
pub mod token;

pub use errors::QueryError;
pub use query_builder::{
    ExpressionBuilder, JoinClause, JoinType, ParameterTable, PositionalStatement, SortOrder,
    Statement, WithOperator,
};
pub use token::Token;
pub use type_mapping::BoundValue;
