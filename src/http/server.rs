//! HTTP server startup logic.

use std::net::{SocketAddr, TcpListener};

use axum::Router;
use axum_server::Handle;

use crate::config::HttpServerConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}")]
    Address(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Binds the listening socket for the configured address.
///
/// Binding happens before the server starts so that an occupied port is
/// reported as a startup failure rather than from inside the accept loop.
pub fn bind_listener(config: &HttpServerConfig) -> Result<TcpListener, ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| ServerError::Address(format!("{}:{}", config.host, config.port)))?;

    let listener =
        TcpListener::bind(addr).map_err(|source| ServerError::Bind { addr, source })?;
    listener
        .set_nonblocking(true)
        .map_err(|source| ServerError::Bind { addr, source })?;
    Ok(listener)
}

/// Serve `app` on an already bound listener.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, listener: TcpListener) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "Starting HTTP server");

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone());

    axum_server::from_tcp(listener)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
