//! Partial-update SET clause builder.
//!
//! A PATCH body touches only a subset of an entity's fields. [`PartialUpdate`]
//! collects that subset in insertion order and renders it as a
//! `"column"=$n, ...` clause plus the matching value sequence, ready to be
//! spliced into a parameterized `UPDATE ... SET ...` statement.

use crate::error::{ModelError, ModelResult};
use crate::sql::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// Mapping from logical (API) field names to physical column names.
///
/// Fields without an entry fall back to the logical name unchanged, so maps
/// only need to list the names that actually differ
/// (e.g. `firstName -> first_name`).
pub type FieldMap<'a> = &'a [(&'a str, &'a str)];

fn resolve<'a>(field_map: FieldMap<'a>, field: &'a str) -> &'a str {
    field_map
        .iter()
        .find(|(logical, _)| *logical == field)
        .map(|(_, column)| *column)
        .unwrap_or(field)
}

/// Render a column name as a quoted SQL identifier.
///
/// Embedded `"` is escaped as `""`. Empty names and names containing NUL are
/// rejected rather than interpolated into the statement.
pub(crate) fn quote_column(name: &str) -> ModelResult<String> {
    if name.is_empty() {
        return Err(ModelError::validation("Empty column name"));
    }
    if name.contains('\0') {
        return Err(ModelError::validation(
            "Column name cannot contain NUL character",
        ));
    }
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    Ok(out)
}

/// An ordered set of field changes for a partial update.
///
/// Insertion order determines positional-parameter order in the built clause.
///
/// # Example
/// ```ignore
/// let set = PartialUpdate::new()
///     .set("firstName", "Aliya")
///     .set("age", 32i32)
///     .build(&[("firstName", "first_name")])?;
/// assert_eq!(set.clause(), r#""first_name"=$1, "age"=$2"#);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PartialUpdate {
    fields: Vec<(String, Param)>,
}

impl PartialUpdate {
    /// Create an empty partial update.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field change.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, field: &str, value: T) -> Self {
        self.fields.push((field.to_string(), Param::new(value)));
        self
    }

    /// Add an optional field change (None => field untouched).
    pub fn set_opt<T: ToSql + Send + Sync + 'static>(self, field: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.set(field, v)
        } else {
            self
        }
    }

    /// Number of field changes collected so far.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field changes have been collected.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build the SET clause and its value sequence.
    ///
    /// For each field in insertion order, the physical column is resolved via
    /// `field_map` and an assignment fragment `"column"=$n` is emitted, with
    /// `n` the field's 1-based position. Fragments are joined with `", "`.
    ///
    /// Errors with [`ModelError::BadRequest`] if no fields were set; retrying
    /// with the same input cannot succeed, the caller must supply data.
    pub fn build(&self, field_map: FieldMap<'_>) -> ModelResult<SetClause> {
        if self.fields.is_empty() {
            return Err(ModelError::bad_request("No data"));
        }

        let mut params = ParamList::new();
        let mut parts = Vec::with_capacity(self.fields.len());
        for (field, value) in &self.fields {
            let column = quote_column(resolve(field_map, field))?;
            let idx = params.push(value.clone());
            parts.push(format!("{}=${}", column, idx));
        }

        Ok(SetClause {
            clause: parts.join(", "),
            params,
        })
    }
}

/// A built SET clause: the assignment string plus its bound values.
///
/// The value at position N backs the `$N` placeholder of the clause.
#[derive(Clone, Debug)]
pub struct SetClause {
    clause: String,
    params: ParamList,
}

impl SetClause {
    /// The assignment clause, e.g. `"first_name"=$1, "age"=$2`.
    pub fn clause(&self) -> &str {
        &self.clause
    }

    /// The bound values, in placeholder order.
    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// The next unused positional parameter index.
    ///
    /// Callers scoping the update append their key condition here, e.g.
    /// `WHERE id = ${next_placeholder}`.
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }

    /// Split into the clause string and the parameter list.
    pub fn into_parts(self) -> (String, ParamList) {
        (self.clause, self.params)
    }
}
