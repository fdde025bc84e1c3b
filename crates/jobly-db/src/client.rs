//! Generic client trait for unified database access.

use crate::error::{ModelError, ModelResult};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A trait that unifies database clients and transactions.
///
/// Model operations accept either a direct client connection or a
/// transaction, so they compose within transaction boundaries.
pub trait GenericClient: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = ModelResult<Vec<Row>>> + Send;

    /// Execute a query and return the first row, if any.
    fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = ModelResult<Option<Row>>> + Send;

    /// Execute a query and return the first row.
    ///
    /// Returns [`ModelError::NotFound`] if no rows are returned.
    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = ModelResult<Row>> + Send {
        async move {
            self.query_opt(sql, params)
                .await?
                .ok_or_else(|| ModelError::not_found("Expected 1 row, got 0"))
        }
    }

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = ModelResult<u64>> + Send;
}

fn log_sql(sql: &str, param_count: usize) {
    tracing::debug!(target: "jobly.sql", sql = %sql, param_count, "executing");
}

impl GenericClient for tokio_postgres::Client {
    async fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> ModelResult<Vec<Row>> {
        log_sql(sql, params.len());
        tokio_postgres::Client::query(self, sql, params)
            .await
            .map_err(ModelError::from_db_error)
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> ModelResult<Option<Row>> {
        log_sql(sql, params.len());
        tokio_postgres::Client::query_opt(self, sql, params)
            .await
            .map_err(ModelError::from_db_error)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> ModelResult<u64> {
        log_sql(sql, params.len());
        tokio_postgres::Client::execute(self, sql, params)
            .await
            .map_err(ModelError::from_db_error)
    }
}

impl GenericClient for tokio_postgres::Transaction<'_> {
    async fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> ModelResult<Vec<Row>> {
        log_sql(sql, params.len());
        tokio_postgres::Transaction::query(self, sql, params)
            .await
            .map_err(ModelError::from_db_error)
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> ModelResult<Option<Row>> {
        log_sql(sql, params.len());
        tokio_postgres::Transaction::query_opt(self, sql, params)
            .await
            .map_err(ModelError::from_db_error)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> ModelResult<u64> {
        log_sql(sql, params.len());
        tokio_postgres::Transaction::execute(self, sql, params)
            .await
            .map_err(ModelError::from_db_error)
    }
}
