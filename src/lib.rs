//! Accord - TLS connection suite negotiation
//!
//! This crate decides which TLS versions and cipher suites an HTTP client
//! enables on a socket before the handshake, and provides the forwarding
//! byte-source primitive responses are read through.
//!
//! - [`http::tls`] holds connection suites and their negotiation
//! - [`http`] holds the plain and TLS session operations
//! - [`io`] holds the `Source` abstraction and its forwarding decorators

pub mod http;
pub mod io;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialise logging from `RUST_LOG`
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::builder().try_init();
}
