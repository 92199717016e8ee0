//! Convenience re-exports for common QueryHaus usage
//!
//! # Example
//!
//! ```rust
//! use queryhaus::prelude::*;
//!
//! let builder = ExpressionBuilder::new()
//!     .register_source("User", Some("u"))
//!     .select("u")
//!     .eq("u.name", "Alice");
//! assert_eq!(builder.build(), "SELECT u FROM User as u WHERE u.name = :_0");
//! ```

// Core QueryHaus components
pub use crate::core::{QueryHaus, StatementExecutor};
pub use crate::errors::QueryHausError;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig, QueryConfig};

// Builder, clause model and values
pub use query_object::prelude::*;
pub use type_mapping::bound_value_from_json;

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;

// Commonly used sqlx types
pub use sqlx::{PgPool, Row};
