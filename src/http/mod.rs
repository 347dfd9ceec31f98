//! Transport layer for HTTP connections
//!
//! This module provides the pieces an HTTP client needs between "I have a
//! socket" and "I can pull response bytes": TLS parameter negotiation and the
//! session operations abstraction that hides plain TCP versus TLS.
//!
//! # Architecture
//!
//! - `SessionOps` trait defines operations (poll, read, write, close)
//! - `FdSessionOps` implements them over a plain `TcpStream`
//! - `tls::TlsSessionOps` implements them over an OpenSSL stream
//! - `SessionSource` adapts any session into an [`crate::io::Source`]
//!
//! # Examples
//!
//! ```no_run
//! use accord::http::tls::{ConnectionSuite, SuiteSelector, TlsConfig};
//! use accord::http::SessionSource;
//! use std::net::TcpStream;
//!
//! let mut selector = SuiteSelector::new(vec![
//!     ConnectionSuite::MODERN_TLS,
//!     ConnectionSuite::COMPATIBLE_TLS,
//! ]);
//!
//! let mut builder = TlsConfig::client().servername("example.com");
//! let chosen = selector.configure(builder.socket_mut()).unwrap();
//! let config = builder
//!     .tls_extensions(chosen.supports_extensions())
//!     .build()
//!     .unwrap();
//!
//! let stream = TcpStream::connect("example.com:443").unwrap();
//! let session = config.connect(stream).unwrap();
//! let source = SessionSource::new(session);
//! # let _ = source;
//! ```

pub mod session;
pub mod source;
pub mod tls;

pub use session::{FdSessionOps, PollEvents, SessionOps};
pub use source::SessionSource;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP operation errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TLS error: {0}")]
    Tls(#[from] tls::TlsError),
}
