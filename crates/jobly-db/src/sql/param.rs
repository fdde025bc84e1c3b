//! Bound-value storage for the clause builders.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A single bound value, reference-counted so a [`crate::sql::PartialUpdate`]
/// can be built more than once without copying the values it holds.
#[derive(Clone)]
pub struct Param(Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Wrap any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    fn as_dyn(&self) -> &(dyn ToSql + Sync) {
        // Dropping Send from the trait-object bounds is fine for a shared
        // reference; tokio-postgres only asks for ToSql + Sync.
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Param(<sql value>)")
    }
}

/// The value sequence behind a built clause.
///
/// The value at position N backs the `$N` placeholder, so appending returns
/// the 1-based index the new placeholder should use.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create an empty value sequence.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Append a value and return its 1-based placeholder index.
    pub fn push(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Number of bound values.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if no values are bound.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Borrow the values in placeholder order, shaped for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_dyn()).collect()
    }
}
