use crate::error::StoreError;
use crate::repository::DbRepository;
use crate::rest::RestRepository;
use crate::store::SchoolStore;
use configuration::{StoreBackend, StoreSettings};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builds the store handle described by `settings`.
///
/// The backend is chosen from the URL scheme: `http(s)` talks to a Supabase REST
/// endpoint, `postgres(ql)` opens a connection pool. The returned handle is shared,
/// read-only, by every request for the lifetime of the process.
pub async fn connect(settings: &StoreSettings) -> Result<Arc<dyn SchoolStore>, StoreError> {
    match backend(settings)? {
        StoreBackend::Rest => {
            tracing::info!(url = %settings.url, table = %settings.table, "Using REST store.");
            Ok(Arc::new(RestRepository::new(settings)?))
        }
        StoreBackend::Postgres => {
            let pool = connect_pool(settings).await?;
            tracing::info!(table = %settings.table, "Connected to PostgreSQL store.");
            Ok(Arc::new(DbRepository::new(pool, &settings.table)))
        }
    }
}

/// Establishes a connection pool to the PostgreSQL database.
///
/// When the URL carries no password, the store key is used as one.
pub async fn connect_pool(settings: &StoreSettings) -> Result<PgPool, StoreError> {
    if backend(settings)? != StoreBackend::Postgres {
        return Err(StoreError::Unsupported(
            "a PostgreSQL store URL is required for direct database access".to_string(),
        ));
    }

    let mut url = Url::parse(&settings.url)
        .map_err(|e| StoreError::ConnectionConfigError(e.to_string()))?;
    if url.password().is_none() && !settings.key.is_empty() {
        url.set_password(Some(&settings.key)).map_err(|_| {
            StoreError::ConnectionConfigError("store URL cannot carry a password".to_string())
        })?;
    }

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url.as_str())
        .await?;

    Ok(pool)
}

/// Applies the embedded migrations, creating the schools table if it does not exist.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn backend(settings: &StoreSettings) -> Result<StoreBackend, StoreError> {
    settings
        .backend()
        .map_err(|e| StoreError::ConnectionConfigError(e.to_string()))
}
