//! Row mapping traits and utilities

use crate::error::{ModelError, ModelResult};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Trait for converting a database row into a Rust struct.
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> ModelResult<Self>;
}

/// Extension methods for [`Row`].
pub trait RowExt {
    /// Get a column by name, converting decode failures into
    /// [`ModelError::Decode`] with the column name attached.
    fn get_col<'a, T: FromSql<'a>>(&'a self, column: &str) -> ModelResult<T>;
}

impl RowExt for Row {
    fn get_col<'a, T: FromSql<'a>>(&'a self, column: &str) -> ModelResult<T> {
        self.try_get(column)
            .map_err(|e| ModelError::decode(column, e.to_string()))
    }
}
