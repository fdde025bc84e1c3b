//! WHERE clause builder for optional-filter lookups.
//!
//! List endpoints take a handful of optional filters. Each filter that is
//! present contributes one condition, in a fixed order, so placeholder
//! numbering stays deterministic.

use crate::sql::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// Accumulates AND-joined conditions with `$n` placeholders.
#[derive(Clone, Debug, Default)]
pub struct WhereClause {
    /// Conditions (without leading AND)
    conditions: Vec<String>,
    params: ParamList,
}

impl WhereClause {
    /// Create an empty WHERE clause with param numbering starting at `$1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any conditions have been added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn add_condition<T>(&mut self, col: &str, op: &str, value: T)
    where
        T: ToSql + Send + Sync + 'static,
    {
        let idx = self.params.push(Param::new(value));
        self.conditions.push(format!("{} {} ${}", col, op, idx));
    }

    /// Add AND ILIKE condition.
    pub fn and_ilike<T>(&mut self, col: &str, pattern: T)
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_condition(col, "ILIKE", pattern);
    }

    /// Add AND >= condition.
    pub fn and_gte<T>(&mut self, col: &str, value: T)
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_condition(col, ">=", value);
    }

    /// Add AND <= condition.
    pub fn and_lte<T>(&mut self, col: &str, value: T)
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_condition(col, "<=", value);
    }

    /// Add a raw condition without params.
    ///
    /// # Safety
    /// This directly concatenates SQL. The caller must ensure safety.
    pub fn and_raw(&mut self, sql: &str) {
        self.conditions.push(sql.to_string());
    }

    // ==================== Option-friendly helpers ====================

    pub fn and_ilike_opt<T>(&mut self, col: &str, pattern: Option<T>)
    where
        T: ToSql + Send + Sync + 'static,
    {
        if let Some(p) = pattern {
            self.and_ilike(col, p);
        }
    }

    pub fn and_gte_opt<T>(&mut self, col: &str, value: Option<T>)
    where
        T: ToSql + Send + Sync + 'static,
    {
        if let Some(v) = value {
            self.and_gte(col, v);
        }
    }

    pub fn and_lte_opt<T>(&mut self, col: &str, value: Option<T>)
    where
        T: ToSql + Send + Sync + 'static,
    {
        if let Some(v) = value {
            self.and_lte(col, v);
        }
    }

    // ==================== Build ====================

    /// Append ` WHERE ...` to `sql` if any conditions were added.
    pub fn append_to(&self, sql: &mut String) {
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
    }

    /// The bound values, in placeholder order.
    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// Consume the builder and return its parameter list.
    pub fn into_params(self) -> ParamList {
        self.params
    }
}
