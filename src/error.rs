use sqlx::Error as SqlxError;
use std::time::Duration;
use thiserror::Error as ThisError;
use tokio::task::JoinError;

/// Every variant here is a lifecycle error and therefore fatal: `main` logs
/// it and exits non-zero. Request-handling errors must not be routed through
/// this type.
#[derive(Debug, ThisError)]
pub enum ServerError {
    #[error("invalid or missing port")]
    InvalidPort,

    #[error("invalid configuration: {0}")]
    Config(#[source] figment::Error),

    #[error("error in connecting to database: {0}")]
    Connection(#[source] SqlxError),

    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    #[error("error in starting server: {0}")]
    ServerStart(#[source] std::io::Error),

    #[error("server exited before a shutdown was requested")]
    ServerExited,

    #[error("server did not stop within {0:?}")]
    ShutdownTimeout(Duration),

    #[error("error in shutting down server: {0}")]
    Shutdown(#[source] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] JoinError),
}
