use thiserror::Error;

/// Any failure reported by, or while reaching, the persistence service.
///
/// The `Display` output is the underlying message, unchanged, so callers can pass
/// it on to clients as-is.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    ConnectionConfigError(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    Unsupported(String),
}
