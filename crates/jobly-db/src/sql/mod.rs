//! SQL clause builders.
//!
//! Two small builders cover the dynamic SQL this crate needs:
//!
//! - [`PartialUpdate`] renders a PATCH body's changed-field subset as a
//!   `"column"=$n, ...` SET clause with a matching value sequence.
//! - [`WhereClause`] renders optional list filters as an AND-joined WHERE
//!   clause.
//!
//! Placeholder indices are computed at build time, not via string
//! replacement, and values are always bound positionally; the builders never
//! escape or coerce values themselves.

mod param;
mod set_clause;
mod where_clause;

pub use param::{Param, ParamList};
pub use set_clause::{FieldMap, PartialUpdate, SetClause};
pub use where_clause::WhereClause;
