//! Job applications (user x job).

use crate::client::GenericClient;
use crate::error::{ModelError, ModelResult};
use crate::row::RowExt;
use serde::Serialize;

/// Applying twice trips the table's primary key; report that as a caller
/// error rather than a constraint fault.
fn map_insert_error(e: ModelError, username: &str, job_id: i64) -> ModelError {
    match e {
        ModelError::UniqueViolation(_) => ModelError::bad_request(format!(
            "Duplicate application: {username} -> job {job_id}"
        )),
        e => e,
    }
}

/// An application row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub username: String,
    pub job_id: i64,
}

impl Application {
    /// Apply a user to a job.
    ///
    /// Both the job and the user must exist; applying twice is a caller
    /// error.
    pub async fn apply(
        client: &impl GenericClient,
        username: &str,
        job_id: i64,
    ) -> ModelResult<Application> {
        client
            .query_opt("SELECT id FROM jobs WHERE id = $1", &[&job_id])
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No job: {job_id}")))?;
        client
            .query_opt("SELECT username FROM users WHERE username = $1", &[&username])
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No user: {username}")))?;

        client
            .execute(
                "INSERT INTO applications (job_id, username) VALUES ($1, $2)",
                &[&job_id, &username],
            )
            .await
            .map_err(|e| map_insert_error(e, username, job_id))?;

        Ok(Application {
            username: username.to_string(),
            job_id,
        })
    }

    /// Ids of the jobs a user applied to, ascending.
    pub async fn job_ids_for(
        client: &impl GenericClient,
        username: &str,
    ) -> ModelResult<Vec<i64>> {
        let rows = client
            .query(
                "SELECT job_id FROM applications WHERE username = $1 ORDER BY job_id",
                &[&username],
            )
            .await?;
        rows.iter().map(|r| r.get_col("job_id")).collect()
    }
}
