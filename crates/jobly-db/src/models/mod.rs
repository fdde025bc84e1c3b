//! Entity models.
//!
//! Each model owns its table's SQL: creation, filtered listings, lookups,
//! partial updates via [`crate::sql::PartialUpdate`], and removal. Updates
//! append the row key as the next positional parameter after the SET values,
//! execute with `RETURNING`, and treat zero returned rows as not-found.

mod application;
mod company;
mod job;
mod user;

pub use application::Application;
pub use company::{Company, CompanyFilter, CompanyPatch, CompanyWithJobs, NewCompany};
pub use job::{Job, JobDetail, JobFilter, JobPatch, JobWithCompany, NewJob};
pub use user::{User, UserDetail, UserPatch};
