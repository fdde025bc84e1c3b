//! # jobly-db
//!
//! PostgreSQL data layer for the Jobly job board.
//!
//! ## Features
//!
//! - **SQL explicit**: statements are plain parameterized SQL; the only
//!   dynamic pieces are the SET clause for partial updates and the WHERE
//!   clause for optional list filters
//! - **Type-safe mapping**: Row → Struct via the `FromRow` trait
//! - **Transaction-friendly**: pass a transaction anywhere a
//!   [`GenericClient`] is expected
//! - **400 vs 404**: empty updates and bad filters are `BadRequest`; missing
//!   rows are `NotFound` — the API layer maps them directly to status codes
//!
//! ## Partial updates
//!
//! ```ignore
//! use jobly_db::{models::Job, models::JobPatch};
//!
//! let patch = JobPatch { salary: Some(120_000), ..Default::default() };
//! let job = Job::update(&client, job_id, &patch).await?;
//! ```

pub mod client;
pub mod db;
pub mod error;
pub mod models;
pub mod row;
pub mod sql;

pub use client::GenericClient;
pub use db::{connect, connect_from_env};
pub use error::{ModelError, ModelResult};
pub use row::{FromRow, RowExt};
pub use sql::{FieldMap, Param, ParamList, PartialUpdate, SetClause, WhereClause};
