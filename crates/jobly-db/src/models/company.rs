//! Company model.

use crate::client::GenericClient;
use crate::error::{ModelError, ModelResult};
use crate::models::job::Job;
use crate::row::{FromRow, RowExt};
use crate::sql::{FieldMap, Param, ParamList, PartialUpdate, WhereClause};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

pub(crate) const COMPANY_COLS: &str = "handle, name, description, num_employees, logo_url";

/// API field name -> column name, for PATCH bodies.
const COMPANY_FIELD_MAP: FieldMap<'static> = &[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

/// A company row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> ModelResult<Self> {
        Ok(Self {
            handle: row.get_col("handle")?,
            name: row.get_col("name")?,
            description: row.get_col("description")?,
            num_employees: row.get_col("num_employees")?,
            logo_url: row.get_col("logo_url")?,
        })
    }
}

/// Input for creating a company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Changed-field subset for a company PATCH. `None` fields are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// Optional filters for company listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    pub name_like: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

/// A company together with its job postings.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyWithJobs {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

fn find_all_statement(filter: &CompanyFilter) -> ModelResult<(String, ParamList)> {
    if let (Some(min), Some(max)) = (filter.min_employees, filter.max_employees) {
        if min > max {
            return Err(ModelError::bad_request(
                "Min employees cannot be greater than max",
            ));
        }
    }

    let mut w = WhereClause::new();
    w.and_gte_opt("num_employees", filter.min_employees);
    w.and_lte_opt("num_employees", filter.max_employees);
    w.and_ilike_opt("name", filter.name_like.as_deref().map(|n| format!("%{n}%")));

    let mut sql = format!("SELECT {} FROM companies", COMPANY_COLS);
    w.append_to(&mut sql);
    sql.push_str(" ORDER BY name");
    Ok((sql, w.into_params()))
}

fn update_statement(handle: &str, patch: &CompanyPatch) -> ModelResult<(String, ParamList)> {
    let set = PartialUpdate::new()
        .set_opt("name", patch.name.clone())
        .set_opt("description", patch.description.clone())
        .set_opt("numEmployees", patch.num_employees)
        .set_opt("logoUrl", patch.logo_url.clone())
        .build(COMPANY_FIELD_MAP)?;

    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
        set.clause(),
        set.next_placeholder(),
        COMPANY_COLS,
    );
    let (_, mut params) = set.into_parts();
    params.push(Param::new(handle.to_string()));
    Ok((sql, params))
}

impl Company {
    /// Create a company. A duplicate handle is a caller error, not a fault.
    pub async fn create(client: &impl GenericClient, data: &NewCompany) -> ModelResult<Company> {
        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COMPANY_COLS,
        );
        let row = client
            .query_one(
                &sql,
                &[
                    &data.handle,
                    &data.name,
                    &data.description,
                    &data.num_employees,
                    &data.logo_url,
                ],
            )
            .await
            .map_err(|e| match e {
                ModelError::UniqueViolation(_) => {
                    ModelError::bad_request(format!("Duplicate company: {}", data.handle))
                }
                e => e,
            })?;
        Company::from_row(&row)
    }

    /// List companies, ordered by name, honoring the optional filters.
    pub async fn find_all(
        client: &impl GenericClient,
        filter: &CompanyFilter,
    ) -> ModelResult<Vec<Company>> {
        let (sql, params) = find_all_statement(filter)?;
        let rows = client.query(&sql, &params.as_refs()).await?;
        rows.iter().map(Company::from_row).collect()
    }

    /// Get a company and its job postings.
    pub async fn get(client: &impl GenericClient, handle: &str) -> ModelResult<CompanyWithJobs> {
        let sql = format!("SELECT {} FROM companies WHERE handle = $1", COMPANY_COLS);
        let row = client
            .query_opt(&sql, &[&handle])
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No company: {handle}")))?;
        let company = Company::from_row(&row)?;

        let rows = client
            .query(
                "SELECT id, title, salary, equity, company_handle FROM jobs \
                 WHERE company_handle = $1 ORDER BY id",
                &[&handle],
            )
            .await?;
        let jobs = rows.iter().map(Job::from_row).collect::<ModelResult<_>>()?;

        Ok(CompanyWithJobs { company, jobs })
    }

    /// Apply a partial update and return the updated company.
    pub async fn update(
        client: &impl GenericClient,
        handle: &str,
        patch: &CompanyPatch,
    ) -> ModelResult<Company> {
        let (sql, params) = update_statement(handle, patch)?;
        let row = client
            .query_opt(&sql, &params.as_refs())
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No company: {handle}")))?;
        Company::from_row(&row)
    }

    /// Delete a company.
    pub async fn remove(client: &impl GenericClient, handle: &str) -> ModelResult<()> {
        client
            .query_opt(
                "DELETE FROM companies WHERE handle = $1 RETURNING handle",
                &[&handle],
            )
            .await?
            .ok_or_else(|| ModelError::not_found(format!("No company: {handle}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_all_without_filters() {
        let (sql, params) = find_all_statement(&CompanyFilter::default()).unwrap();
        assert_eq!(
            sql,
            "SELECT handle, name, description, num_employees, logo_url FROM companies ORDER BY name"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn find_all_with_all_filters() {
        let filter = CompanyFilter {
            name_like: Some("net".to_string()),
            min_employees: Some(10),
            max_employees: Some(500),
        };
        let (sql, params) = find_all_statement(&filter).unwrap();
        assert_eq!(
            sql,
            "SELECT handle, name, description, num_employees, logo_url FROM companies \
             WHERE num_employees >= $1 AND num_employees <= $2 AND name ILIKE $3 ORDER BY name"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn find_all_min_greater_than_max() {
        let filter = CompanyFilter {
            min_employees: Some(500),
            max_employees: Some(10),
            ..Default::default()
        };
        let err = find_all_statement(&filter).unwrap_err();
        assert!(err.is_bad_request());
    }

    #[test]
    fn update_maps_fields_and_appends_key() {
        let patch = CompanyPatch {
            name: Some("Acme".to_string()),
            num_employees: Some(42),
            ..Default::default()
        };
        let (sql, params) = update_statement("acme", &patch).unwrap();
        assert_eq!(
            sql,
            r#"UPDATE companies SET "name"=$1, "num_employees"=$2 WHERE handle = $3 RETURNING handle, name, description, num_employees, logo_url"#
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn update_with_empty_patch_is_bad_request() {
        let err = update_statement("acme", &CompanyPatch::default()).unwrap_err();
        assert!(err.is_bad_request());
    }

    #[test]
    fn serializes_camel_case() {
        let company = Company {
            handle: "acme".to_string(),
            name: "Acme".to_string(),
            description: "Anvils".to_string(),
            num_employees: Some(10),
            logo_url: None,
        };
        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["numEmployees"], 10);
        assert_eq!(json["logoUrl"], serde_json::Value::Null);
    }

    #[test]
    fn patch_deserializes_camel_case() {
        let patch: CompanyPatch = serde_json::from_str(r#"{"numEmployees": 42}"#).unwrap();
        assert_eq!(patch.num_employees, Some(42));
        assert!(patch.name.is_none());
    }

    #[test]
    fn patch_rejects_unknown_fields() {
        assert!(serde_json::from_str::<CompanyPatch>(r#"{"handle": "nope"}"#).is_err());
    }
}
