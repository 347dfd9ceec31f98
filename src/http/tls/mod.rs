//! TLS connection suites for HTTP clients
//!
//! A [`ConnectionSuite`] says which TLS versions and cipher suites a client
//! is willing to use. Before a handshake it is negotiated against a socket's
//! capabilities: the suite's lists are intersected with what the socket has
//! enabled, and the result is installed back on the socket.
//!
//! # Architecture
//!
//! 1. `TlsVersion` and `CipherSuite` name the values being negotiated
//! 2. `ConnectionSuite` holds the caller's preferences, built with `ConnectionSuiteBuilder`
//! 3. `SocketCapabilities` / `SocketConfigurable` abstract the socket being configured
//! 4. `SocketProfile` is the OpenSSL-backed socket, turned into a context by `configure_context`
//! 5. `SuiteSelector` retries with weaker suites after a failed handshake
//! 6. `TlsSessionOps` implements the `SessionOps` trait for encrypted I/O
//!
//! # Examples
//!
//! ```
//! use accord::http::tls::{ConnectionSuite, SocketCapabilities, SocketProfile};
//!
//! let mut socket = SocketProfile::openssl();
//! assert!(ConnectionSuite::MODERN_TLS.is_compatible(&socket));
//!
//! ConnectionSuite::RESTRICTED_TLS.apply(&mut socket, false).unwrap();
//! assert_eq!(socket.enabled_protocol_versions(), vec!["TLSv1.3", "TLSv1.2"]);
//! ```
//!
//! ## Client with TLS
//!
//! ```no_run
//! use accord::http::tls::{ConnectionSuite, TlsConfig};
//! use std::net::TcpStream;
//!
//! let tls_config = TlsConfig::client()
//!     .connection_suite(&ConnectionSuite::MODERN_TLS, false)
//!     .unwrap()
//!     .servername("example.com")
//!     .verify_peer(true)
//!     .build()
//!     .unwrap();
//!
//! let tcp_stream = TcpStream::connect("example.com:443").unwrap();
//! let tls_session = tls_config.connect(tcp_stream).unwrap();
//! println!("{}", tls_session.vars().cipher);
//! ```

pub mod cipher;
pub mod config;
pub mod context;
pub mod negotiate;
pub mod selector;
pub mod session;
pub mod socket;
pub mod suite;
pub mod vars;
pub mod version;

pub use cipher::{CipherSuite, FALLBACK_SCSV};
pub use config::{ClientConfigBuilder, TlsConfig, TlsError};
pub use context::{configure_context, ContextParams};
pub use negotiate::{apply, is_compatible, resolve};
pub use selector::SuiteSelector;
pub use session::TlsSessionOps;
pub use socket::{SocketCapabilities, SocketConfigurable, SocketProfile};
pub use suite::{ConnectionSuite, ConnectionSuiteBuilder};
pub use vars::TlsVars;
pub use version::TlsVersion;

/// Result type for TLS operations
pub type Result<T> = std::result::Result<T, TlsError>;
