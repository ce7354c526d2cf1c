//! HTTP server module.
//!
//! Serves the router on plain HTTP; TLS is expected to terminate at the
//! ingress in front of the container. The server drains in-flight requests
//! on SIGTERM/SIGINT before exiting.

mod server;
mod shutdown;

pub use server::{bind_listener, start_server};
