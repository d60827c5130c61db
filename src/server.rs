//! Server bootstrap.
//!
//! Startup is a strictly sequential, forward-only phase sequence:
//! configuration resolves before composition, composition resolves before the
//! listener binds. Each phase is its own type, so skipping a stage does not
//! compile and each stage can be exercised in tests without opening a socket.
//! There is no restart-in-place; a failed startup requires a new process.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

use crate::config::Config;
use crate::error::StartupError;

/// Entry point of the bootstrap sequence.
pub struct Server;

impl Server {
    /// Resolve configuration from the environment, fail-fast.
    ///
    /// # Errors
    ///
    /// Returns a [`StartupError::Config`] if `PORT` is invalid.
    pub fn resolve_config() -> Result<ConfigResolved, StartupError> {
        let config = Config::from_env()?;
        tracing::info!(host = %config.host, port = config.port, "Configuration loaded");
        Ok(ConfigResolved { config })
    }

    /// Start from an already-resolved configuration. Used by test harnesses
    /// that supply a free port instead of reading the environment.
    #[must_use]
    pub fn with_config(config: Config) -> ConfigResolved {
        ConfigResolved { config }
    }
}

/// Configuration resolved; waiting for a composed router.
pub struct ConfigResolved {
    config: Config,
}

impl ConfigResolved {
    /// Attach the composed API implementation. The router must already have
    /// passed composition (every declared endpoint bound), which is why this
    /// takes a `Router` and not a raw descriptor.
    #[must_use]
    pub fn compose(self, router: Router) -> Composed {
        Composed {
            config: self.config,
            router,
        }
    }
}

/// API implementation composed; waiting for the transport to bind.
pub struct Composed {
    config: Config,
    router: Router,
}

impl Composed {
    /// Bind the listener and emit the startup log line.
    ///
    /// # Errors
    ///
    /// Returns a [`StartupError::Bind`] if the port is unavailable or the
    /// process lacks permission to bind it. The port is never silently
    /// reassigned.
    pub async fn bind(self) -> Result<Listening, StartupError> {
        let address = self.config.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| StartupError::Bind {
                address: address.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| StartupError::Bind {
            address,
            source,
        })?;
        tracing::info!("Listening on http://{local_addr}");
        Ok(Listening {
            listener,
            local_addr,
            router: self.router,
        })
    }
}

/// Listener bound; the server is ready to accept connections.
pub struct Listening {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
}

impl Listening {
    /// The actual bound address. Differs from the configured one when the
    /// harness supplied port 0 for ephemeral assignment.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve requests until SIGINT/SIGTERM, then shut down gracefully.
    /// The listening socket is released when this returns.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the accept loop fails.
    pub async fn serve(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server shut down gracefully");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
