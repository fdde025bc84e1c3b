//! User model.
//!
//! Credential handling (password hashing, token issuance) lives in the API
//! layer; this model only touches profile data.

use crate::client::GenericClient;
use crate::error::{ModelError, ModelResult};
use crate::models::application::Application;
use crate::row::{FromRow, RowExt};
use crate::sql::{FieldMap, Param, ParamList, PartialUpdate};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const USER_COLS: &str = "username, first_name, last_name, email, is_admin";

/// API field name -> column name, for PATCH bodies.
const USER_FIELD_MAP: FieldMap<'static> = &[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
];

/// A user row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl FromRow for User {
    fn from_row(row: &Row) -> ModelResult<Self> {
        Ok(Self {
            username: row.get_col("username")?,
            first_name: row.get_col("first_name")?,
            last_name: row.get_col("last_name")?,
            email: row.get_col("email")?,
            is_admin: row.get_col("is_admin")?,
        })
    }
}

/// A user together with the ids of jobs they applied to.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub applications: Vec<i64>,
}

/// Changed-field subset for a user PATCH. `None` fields are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

fn update_statement(username: &str, patch: &UserPatch) -> ModelResult<(String, ParamList)> {
    let set = PartialUpdate::new()
        .set_opt("firstName", patch.first_name.clone())
        .set_opt("lastName", patch.last_name.clone())
        .set_opt("email", patch.email.clone())
        .set_opt("isAdmin", patch.is_admin)
        .build(USER_FIELD_MAP)?;

    let sql = format!(
        "UPDATE users SET {} WHERE username = ${} RETURNING {}",
        set.clause(),
        set.next_placeholder(),
        USER_COLS,
    );
    let (_, mut params) = set.into_parts();
    params.push(Param::new(username.to_string()));
    Ok((sql, params))
}

impl User {
    /// List users, ordered by username.
    pub async fn find_all(client: &impl GenericClient) -> ModelResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY username", USER_COLS);
        let rows = client.query(&sql, &[]).await?;
        rows.iter().map(User::from_row).collect()
    }

    /// Get a user and the ids of the jobs they applied to.
    pub async fn get(client: &impl GenericClient, username: &str) -> ModelResult<UserDetail> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLS);
        let row = client
            .query_opt(&sql, &[&username])
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No user: {username}")))?;
        let user = User::from_row(&row)?;

        let applications = Application::job_ids_for(client, username).await?;

        Ok(UserDetail { user, applications })
    }

    /// Apply a partial update and return the updated user.
    pub async fn update(
        client: &impl GenericClient,
        username: &str,
        patch: &UserPatch,
    ) -> ModelResult<User> {
        let (sql, params) = update_statement(username, patch)?;
        let row = client
            .query_opt(&sql, &params.as_refs())
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No user: {username}")))?;
        User::from_row(&row)
    }

    /// Delete a user.
    pub async fn remove(client: &impl GenericClient, username: &str) -> ModelResult<()> {
        client
            .query_opt(
                "DELETE FROM users WHERE username = $1 RETURNING username",
                &[&username],
            )
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No user: {username}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_maps_camel_case_fields() {
        let patch = UserPatch {
            first_name: Some("Aliya".to_string()),
            is_admin: Some(true),
            ..Default::default()
        };
        let (sql, params) = update_statement("aliya", &patch).unwrap();
        assert_eq!(
            sql,
            r#"UPDATE users SET "first_name"=$1, "is_admin"=$2 WHERE username = $3 RETURNING username, first_name, last_name, email, is_admin"#
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn update_unmapped_field_passes_through() {
        let patch = UserPatch {
            email: Some("aliya@example.com".to_string()),
            ..Default::default()
        };
        let (sql, _) = update_statement("aliya", &patch).unwrap();
        assert!(sql.contains(r#"SET "email"=$1"#));
    }

    #[test]
    fn update_with_empty_patch_is_bad_request() {
        let err = update_statement("aliya", &UserPatch::default()).unwrap_err();
        assert!(err.is_bad_request());
    }

    #[test]
    fn detail_flattens_user_fields() {
        let detail = UserDetail {
            user: User {
                username: "aliya".to_string(),
                first_name: "Aliya".to_string(),
                last_name: "K".to_string(),
                email: "aliya@example.com".to_string(),
                is_admin: false,
            },
            applications: vec![3, 7],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["username"], "aliya");
        assert_eq!(json["firstName"], "Aliya");
        assert_eq!(json["applications"], serde_json::json!([3, 7]));
    }
}
