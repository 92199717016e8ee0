//! # QueryHaus
//!
//! Parameterized query expressions for PostgreSQL: build a statement from
//! chained calls, get back statement text plus a parameter table, and
//! execute it with every literal bound as data.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use queryhaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "queryhaus".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let haus = QueryHaus::new(config, QueryConfig::default()).await?;
//!
//!     let banned = ExpressionBuilder::new()
//!         .register_source("bans", Some("b"))
//!         .select("b.user_id")
//!         .eq("b.reason", "spam");
//!
//!     let query = ExpressionBuilder::new()
//!         .register_source("users", Some("u"))
//!         .select("u.name")
//!         .eq("u.country", "NO")
//!         .and()
//!         .not()
//!         .in_sub_query("u.id", &banned)
//!         .order_by("u.name", SortOrder::Asc);
//!
//!     let rows = haus.fetch_all_from(&query).await?;
//!     println!("Found {} users", rows.len());
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::{QueryHaus, StatementExecutor};
pub use errors::QueryHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, QueryConfig};

// Re-export internal crates
pub use query_object;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
