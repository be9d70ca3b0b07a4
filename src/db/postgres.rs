use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{Pool, Postgres};

use crate::config::DatabaseConfig;
use crate::db::schema::PG_INIT;
use crate::error::ServerError;

pub type PgPool = Pool<Postgres>;

/// Build the connection target from the five environment parameters.
/// Transport encryption is off, matching the deployed `sslmode=disable`.
pub fn connect_options(cfg: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.username)
        .password(&cfg.password)
        .database(&cfg.database_name)
        .ssl_mode(PgSslMode::Disable)
}

/// Open connection pool to the expenses database.
///
/// A `Storage` only exists once the pool opened successfully, and `close`
/// consumes it, so closing a handle that never opened, or closing twice, is
/// unrepresentable.
pub struct Storage {
    pool: PgPool,
}

impl Storage {
    /// Open the pool, fail-fast: one connection is established eagerly and
    /// a failure surfaces immediately with no retry.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, ServerError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options(cfg))
            .await
            .map_err(ServerError::Connection)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    /// sqlx::query takes one statement at a time, so split on `;`.
    pub async fn init_schema(&self) -> Result<(), ServerError> {
        for stmt in PG_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "localhost".into(),
            port: 5432,
            username: "u".into(),
            password: "p".into(),
            database_name: "d".into(),
        }
    }

    #[test]
    fn connect_options_carry_all_parameters() {
        let opts = connect_options(&sample_config());
        assert_eq!(opts.get_host(), "localhost");
        assert_eq!(opts.get_port(), 5432);
        assert_eq!(opts.get_username(), "u");
        assert_eq!(opts.get_database(), Some("d"));
    }

    #[tokio::test]
    async fn connect_fails_fast_when_backend_is_unreachable() {
        let cfg = DatabaseConfig {
            // Reserved TEST-NET-1 address, nothing listens there.
            host: "192.0.2.1".into(),
            port: 5432,
            username: "u".into(),
            password: "p".into(),
            database_name: "d".into(),
        };
        let opts = connect_options(&cfg);
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_with(opts)
            .await;
        assert!(pool.is_err());
    }
}
