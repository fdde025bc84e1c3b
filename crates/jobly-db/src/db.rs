//! Connection bootstrap.
//!
//! Single-connection helpers, suitable for the API server's startup path and
//! for integration tests. Pooling is deliberately left to the caller.

use crate::error::{ModelError, ModelResult};
use tokio_postgres::{Client, NoTls};

/// Connect to the database and spawn the connection driver task.
pub async fn connect(database_url: &str) -> ModelResult<Client> {
    let (client, connection) = tokio_postgres::connect(database_url, NoTls)
        .await
        .map_err(|e| ModelError::Connection(e.to_string()))?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!(target: "jobly.db", error = %e, "database connection terminated");
        }
    });

    Ok(client)
}

/// Connect using the `DATABASE_URL` environment variable.
pub async fn connect_from_env() -> ModelResult<Client> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| ModelError::Connection("DATABASE_URL is not set".to_string()))?;
    connect(&url).await
}
