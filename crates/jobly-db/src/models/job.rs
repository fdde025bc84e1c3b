//! Job model.

use crate::client::GenericClient;
use crate::error::{ModelError, ModelResult};
use crate::models::company::{COMPANY_COLS, Company};
use crate::row::{FromRow, RowExt};
use crate::sql::{FieldMap, Param, ParamList, PartialUpdate, WhereClause};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const JOB_COLS: &str = "id, title, salary, equity, company_handle";

/// Updatable job fields use the same name in the API and the table.
const JOB_FIELD_MAP: FieldMap<'static> = &[];

/// A job row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> ModelResult<Self> {
        Ok(Self {
            id: row.get_col("id")?,
            title: row.get_col("title")?,
            salary: row.get_col("salary")?,
            equity: row.get_col("equity")?,
            company_handle: row.get_col("company_handle")?,
        })
    }
}

/// A job row joined with the posting company's name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithCompany {
    #[serde(flatten)]
    pub job: Job,
    pub company_name: Option<String>,
}

impl FromRow for JobWithCompany {
    fn from_row(row: &Row) -> ModelResult<Self> {
        Ok(Self {
            job: Job::from_row(row)?,
            company_name: row.get_col("company_name")?,
        })
    }
}

/// A job with its company expanded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i64,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Company,
}

/// Input for creating a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Changed-field subset for a job PATCH. The company handle is not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

/// Optional filters for job listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub title_like: Option<String>,
    pub min_salary: Option<i32>,
    #[serde(default)]
    pub has_equity: bool,
}

fn find_all_statement(filter: &JobFilter) -> (String, ParamList) {
    let mut w = WhereClause::new();
    w.and_ilike_opt(
        "j.title",
        filter.title_like.as_deref().map(|t| format!("%{t}%")),
    );
    w.and_gte_opt("j.salary", filter.min_salary);
    if filter.has_equity {
        w.and_raw("j.equity > 0");
    }

    let mut sql = String::from(
        "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, c.name AS company_name \
         FROM jobs j LEFT JOIN companies c ON c.handle = j.company_handle",
    );
    w.append_to(&mut sql);
    sql.push_str(" ORDER BY j.title");
    (sql, w.into_params())
}

fn update_statement(id: i64, patch: &JobPatch) -> ModelResult<(String, ParamList)> {
    let set = PartialUpdate::new()
        .set_opt("title", patch.title.clone())
        .set_opt("salary", patch.salary)
        .set_opt("equity", patch.equity)
        .build(JOB_FIELD_MAP)?;

    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
        set.clause(),
        set.next_placeholder(),
        JOB_COLS,
    );
    let (_, mut params) = set.into_parts();
    params.push(Param::new(id));
    Ok((sql, params))
}

impl Job {
    /// Create a job posting.
    pub async fn create(client: &impl GenericClient, data: &NewJob) -> ModelResult<Job> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            JOB_COLS,
        );
        let row = client
            .query_one(
                &sql,
                &[&data.title, &data.salary, &data.equity, &data.company_handle],
            )
            .await
            .map_err(|e| match e {
                ModelError::ForeignKeyViolation(_) => {
                    ModelError::not_found(format!("No company: {}", data.company_handle))
                }
                e => e,
            })?;
        Job::from_row(&row)
    }

    /// List jobs with company names, ordered by title, honoring the filters.
    pub async fn find_all(
        client: &impl GenericClient,
        filter: &JobFilter,
    ) -> ModelResult<Vec<JobWithCompany>> {
        let (sql, params) = find_all_statement(filter);
        let rows = client.query(&sql, &params.as_refs()).await?;
        rows.iter().map(JobWithCompany::from_row).collect()
    }

    /// Get a job with its company expanded.
    pub async fn get(client: &impl GenericClient, id: i64) -> ModelResult<JobDetail> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLS);
        let row = client
            .query_opt(&sql, &[&id])
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No job: {id}")))?;
        let job = Job::from_row(&row)?;

        let sql = format!("SELECT {} FROM companies WHERE handle = $1", COMPANY_COLS);
        let row = client
            .query_opt(&sql, &[&job.company_handle])
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No company: {}", job.company_handle)))?;
        let company = Company::from_row(&row)?;

        Ok(JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        })
    }

    /// Apply a partial update and return the updated job.
    pub async fn update(
        client: &impl GenericClient,
        id: i64,
        patch: &JobPatch,
    ) -> ModelResult<Job> {
        let (sql, params) = update_statement(id, patch)?;
        let row = client
            .query_opt(&sql, &params.as_refs())
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No job: {id}")))?;
        Job::from_row(&row)
    }

    /// Delete a job.
    pub async fn remove(client: &impl GenericClient, id: i64) -> ModelResult<()> {
        client
            .query_opt("DELETE FROM jobs WHERE id = $1 RETURNING id", &[&id])
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No job: {id}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_all_without_filters() {
        let (sql, params) = find_all_statement(&JobFilter::default());
        assert_eq!(
            sql,
            "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, c.name AS company_name \
             FROM jobs j LEFT JOIN companies c ON c.handle = j.company_handle ORDER BY j.title"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn find_all_with_all_filters() {
        let filter = JobFilter {
            title_like: Some("engineer".to_string()),
            min_salary: Some(90_000),
            has_equity: true,
        };
        let (sql, params) = find_all_statement(&filter);
        assert!(sql.contains("WHERE j.title ILIKE $1 AND j.salary >= $2 AND j.equity > 0"));
        assert!(sql.ends_with(" ORDER BY j.title"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn has_equity_alone_adds_no_params() {
        let filter = JobFilter {
            has_equity: true,
            ..Default::default()
        };
        let (sql, params) = find_all_statement(&filter);
        assert!(sql.contains("WHERE j.equity > 0"));
        assert!(params.is_empty());
    }

    #[test]
    fn update_numbers_key_after_set_params() {
        let patch = JobPatch {
            title: Some("Staff Engineer".to_string()),
            salary: Some(180_000),
            equity: None,
        };
        let (sql, params) = update_statement(7, &patch).unwrap();
        assert_eq!(
            sql,
            r#"UPDATE jobs SET "title"=$1, "salary"=$2 WHERE id = $3 RETURNING id, title, salary, equity, company_handle"#
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn update_with_empty_patch_is_bad_request() {
        let err = update_statement(7, &JobPatch::default()).unwrap_err();
        assert!(err.is_bad_request());
    }

    #[test]
    fn filter_deserializes_with_default_equity_flag() {
        let filter: JobFilter =
            serde_json::from_str(r#"{"titleLike": "eng", "minSalary": 1}"#).unwrap();
        assert_eq!(filter.title_like.as_deref(), Some("eng"));
        assert_eq!(filter.min_salary, Some(1));
        assert!(!filter.has_equity);
    }
}
