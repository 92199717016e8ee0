//! Core QueryHaus functionality
//!
//! This module contains the PostgreSQL executor that receives a rendered
//! statement and its parameter table and binds every value as data.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres};
use std::time::Duration;

use crate::errors::QueryHausError;
use config::{AppConfig, DatabaseConfig, QueryConfig};
use query_object::{ExpressionBuilder, PositionalStatement, Statement};
use type_mapping::BoundValue;

/// Executes rendered statements.
///
/// Implementations must bind every parameter table entry as a value and
/// never splice it into statement text.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    type Row: Send;

    /// Run a query and collect all rows
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Self::Row>, QueryHausError>;

    /// Run a query and return the first row, if any
    async fn fetch_optional(
        &self,
        statement: &Statement,
    ) -> Result<Option<Self::Row>, QueryHausError>;

    /// Run a data-modifying statement and return the affected row count
    async fn execute(&self, statement: &Statement) -> Result<u64, QueryHausError>;
}

/// PostgreSQL executor backed by a connection pool
pub struct QueryHaus {
    pool: PgPool,
    query_config: QueryConfig,
}

impl QueryHaus {
    /// Create new QueryHaus with database connection
    pub async fn new(
        config: DatabaseConfig,
        query_config: QueryConfig,
    ) -> Result<Self, QueryHausError> {
        let connection_string = config.connection_string();

        let mut pool_options = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        debug_log!(
            "[QUERYHAUS] Connected to {}:{}/{}",
            config.host,
            config.port,
            config.database
        );

        Ok(Self { pool, query_config })
    }

    /// Create QueryHaus from a loaded application configuration
    pub async fn from_config(config: AppConfig) -> Result<Self, QueryHausError> {
        Self::new(config.database, config.query).await
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool, query_config: QueryConfig) -> Self {
        Self { pool, query_config }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn query_config(&self) -> &QueryConfig {
        &self.query_config
    }

    /// Convert a statement to positional form, logging it if configured
    pub fn prepare(&self, statement: &Statement) -> Result<PositionalStatement, QueryHausError> {
        let prepared = statement.to_positional(self.query_config.max_bound_parameters)?;

        if self.query_config.log_statements {
            tracing::debug!(
                "[QUERYHAUS] SQL: {} ({} bound values)",
                prepared.sql,
                prepared.values.len()
            );
        }
        if self.query_config.log_parameters {
            for (position, value) in prepared.values.iter().enumerate() {
                tracing::debug!(
                    "[QUERYHAUS] ${} = {} ({})",
                    position + 1,
                    value.to_json(),
                    value.kind()
                );
            }
        }

        Ok(prepared)
    }

    /// Render a builder and run it as a query
    pub async fn fetch_all_from(
        &self,
        builder: &ExpressionBuilder,
    ) -> Result<Vec<PgRow>, QueryHausError> {
        self.fetch_all(&builder.statement()).await
    }

    /// Render a builder and run it as a data-modifying statement
    pub async fn execute_from(&self, builder: &ExpressionBuilder) -> Result<u64, QueryHausError> {
        self.execute(&builder.statement()).await
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), QueryHausError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl StatementExecutor for QueryHaus {
    type Row = PgRow;

    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<PgRow>, QueryHausError> {
        let prepared = self.prepare(statement)?;
        let mut query = sqlx::query(&prepared.sql);
        for value in prepared.values {
            query = bind_value(query, value);
        }

        let rows = query.fetch_all(&self.pool).await?;
        debug_log!("[QUERYHAUS] Query returned {} rows", rows.len());
        Ok(rows)
    }

    async fn fetch_optional(&self, statement: &Statement) -> Result<Option<PgRow>, QueryHausError> {
        let prepared = self.prepare(statement)?;
        let mut query = sqlx::query(&prepared.sql);
        for value in prepared.values {
            query = bind_value(query, value);
        }

        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, QueryHausError> {
        let prepared = self.prepare(statement)?;
        let mut query = sqlx::query(&prepared.sql);
        for value in prepared.values {
            query = bind_value(query, value);
        }

        let result = query.execute(&self.pool).await?;
        debug_log!("[QUERYHAUS] Statement affected {} rows", result.rows_affected());
        Ok(result.rows_affected())
    }
}

/// Bind one value to the next positional parameter
fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: BoundValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        BoundValue::Text(s) => query.bind(s),
        BoundValue::Integer(i) => query.bind(i),
        BoundValue::BigInt(i) => query.bind(i),
        BoundValue::Float(f) => query.bind(f),
        BoundValue::Boolean(b) => query.bind(b),
        BoundValue::Uuid(u) => query.bind(u),
        BoundValue::Date(d) => query.bind(d),
        BoundValue::Timestamp(ts) => query.bind(ts),
        BoundValue::Json(v) => query.bind(sqlx::types::Json(v)),
        // Top-level lists are expanded by to_positional; nested ones travel as JSON
        list @ BoundValue::List(_) => query.bind(sqlx::types::Json(list.to_json())),
        BoundValue::Null => query.bind(Option::<String>::None),
    }
}
