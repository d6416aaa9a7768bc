use crate::config::Config;
use crate::db::{Database, PgDatabase, create_pool};
use crate::signals::shutdown_signal;
use crate::state::AppState;
use crate::utils::fmt_duration;
use crate::web::{RouterOptions, create_router};
use anyhow::Context;
use std::future::IntoFuture;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Main application struct containing all necessary components
pub struct App {
    config: Config,
    db: Arc<dyn Database>,
    app_state: AppState,
}

impl App {
    /// Create a new App instance with all necessary components initialized
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let db_pool = create_pool(&config.database).context("Failed to create database pool")?;
        let db: Arc<dyn Database> = Arc::new(PgDatabase::new(db_pool));
        let app_state = AppState::new(db.clone());

        Ok(App {
            config,
            db,
            app_state,
        })
    }

    /// Serve until a shutdown signal, then drain and close the pool.
    pub async fn run(self) -> ExitCode {
        let result = self.serve().await;

        self.db.close().await;
        info!("database pool closed");

        match result {
            Ok(()) => {
                info!("Server shutdown complete");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = ?e, "server exited with error");
                ExitCode::FAILURE
            }
        }
    }

    async fn serve(&self) -> Result<(), anyhow::Error> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        let local_addr = listener.local_addr().context("Failed to read bound address")?;

        let router = create_router(self.app_state.clone(), &RouterOptions::from(&self.config));

        info!(
            address = %local_addr,
            port = local_addr.port(),
            "Backend escuchando en puerto {}",
            local_addr.port()
        );

        let (signal_tx, signal_rx) = tokio::sync::oneshot::channel::<()>();
        let server = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = signal_tx.send(());
            })
            .into_future();

        let shutdown_timeout = self.config.shutdown_timeout;
        let drain_deadline = async move {
            if signal_rx.await.is_err() {
                // Server finished on its own; nothing to time out.
                std::future::pending::<()>().await;
            }
            tokio::time::sleep(shutdown_timeout).await;
        };

        tokio::select! {
            result = server => result.context("HTTP server failed"),
            _ = drain_deadline => {
                warn!(
                    shutdown_timeout = fmt_duration(shutdown_timeout),
                    "in-flight requests did not drain in time, forcing shutdown"
                );
                Ok(())
            }
        }
    }
}
