//! Startup and shutdown choreography.
//!
//! The flow is linear and never re-entered: connect to the database, bind
//! the HTTP server on a background task, park until SIGINT/SIGTERM, then
//! stop the server before closing the database. Every failure on this path
//! is fatal; there is no retry.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::Config;
use crate::db::Storage;
use crate::error::ServerError;
use crate::server::router::{AppState, app_router};

/// A bound, listening HTTP endpoint running on its own tokio task.
///
/// `stop` consumes the handle, so the coordinator can request a stop at
/// most once.
#[derive(Debug)]
pub struct ServerHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<Result<(), std::io::Error>>,
    addr: SocketAddr,
}

impl ServerHandle {
    /// Bind `addr` and start serving `app` in the background. The serve
    /// task runs until `stop` is called or until it fails on its own.
    pub async fn bind(addr: &str, app: Router) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(ServerError::ServerStart)?;
        let addr = listener.local_addr().map_err(ServerError::ServerStart)?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(Self {
            shutdown_tx,
            task,
            addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Resolves only if the serve task exits before a stop was requested,
    /// which is always fatal.
    pub async fn failed(&mut self) -> ServerError {
        match (&mut self.task).await {
            Ok(Ok(())) => ServerError::ServerExited,
            Ok(Err(e)) => ServerError::ServerStart(e),
            Err(e) => ServerError::Join(e),
        }
    }

    /// Stop accepting new connections and drain in-flight ones, bounded by
    /// `grace`. On timeout the task is abandoned in place and a distinct
    /// `ShutdownTimeout` is reported.
    pub async fn stop(self, grace: Duration) -> Result<(), ServerError> {
        let _ = self.shutdown_tx.send(());
        match tokio::time::timeout(grace, self.task).await {
            Ok(Ok(Ok(()))) => Ok(()),
            Ok(Ok(Err(e))) => Err(ServerError::Shutdown(e)),
            Ok(Err(e)) => Err(ServerError::Join(e)),
            Err(_) => Err(ServerError::ShutdownTimeout(grace)),
        }
    }
}

/// Completes when the process receives SIGINT or SIGTERM. No other signal
/// is handled.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Run the whole lifecycle: returns `Ok(())` only after a clean shutdown.
///
/// Ordering invariants: the pool is opened before the listener is bound,
/// and the server is stopped before the pool is closed. The database close
/// is attempted even when the drain timed out, so the pool is never
/// abandoned open.
pub async fn run(cfg: Config) -> Result<(), ServerError> {
    info!(
        host = %cfg.database.host,
        port = cfg.database.port,
        database = %cfg.database.database_name,
        "connecting to database"
    );
    let storage = Storage::connect(&cfg.database).await?;
    if let Err(e) = storage.init_schema().await {
        storage.close().await;
        return Err(e);
    }
    info!("successfully connected to database");

    let state = AppState::new(storage.pool().clone());
    let mut server = match ServerHandle::bind(&cfg.listen_addr(), app_router(state)).await {
        Ok(server) => server,
        Err(e) => {
            storage.close().await;
            return Err(e);
        }
    };
    info!(addr = %server.local_addr(), "HTTP server listening");

    tokio::select! {
        () = shutdown_signal() => {
            info!("shutdown signal received, attempting to close server...");
        }
        err = server.failed() => {
            storage.close().await;
            return Err(err);
        }
    }

    let stopped = server.stop(cfg.shutdown_timeout).await;
    if stopped.is_ok() {
        info!("server closed");
    }
    info!("attempting to close database connection...");
    storage.close().await;
    stopped?;
    info!("server and database connection closed successfully");
    Ok(())
}
