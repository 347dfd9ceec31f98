//! TLS configuration
//!
//! This module provides the client configuration builder. The builder owns a
//! [`SocketProfile`] describing what the OpenSSL context will enable; a
//! [`ConnectionSuite`] is negotiated against that profile and the result is
//! materialised onto the context when [`ClientConfigBuilder::build`] runs.

use super::context::configure_context;
use super::socket::{SocketConfigurable, SocketProfile};
use super::suite::ConnectionSuite;
use super::version::TlsVersion;
use openssl::ssl::{SslContext, SslContextBuilder, SslMethod, SslVerifyMode};

/// TLS errors
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("OpenSSL error: {0}")]
    OpenSsl(#[from] openssl::error::ErrorStack),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TLS version: {0}")]
    InvalidVersion(String),

    #[error("Unknown cipher suite: {0}")]
    UnknownCipherSuite(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Unable to find acceptable protocols: {0}")]
    NoCompatibleSuite(String),

    #[error("TLS setup failed: {0}")]
    Setup(openssl::error::ErrorStack),

    #[error("Certificate error: {0}")]
    Certificate(String),

    #[error("Handshake failed: {0}")]
    HandshakeFailed(String),
}

/// TLS configuration (immutable after building)
#[derive(Clone)]
pub struct TlsConfig {
    pub(crate) ctx: SslContext,
    pub(crate) servername: Option<String>,
    pub(crate) tls_extensions: bool,
    pub(crate) verify_peer: bool,
}

impl TlsConfig {
    /// Create a new client configuration builder
    pub fn client() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// SNI servername sent during the handshake, if extensions are enabled
    pub fn servername(&self) -> Option<&str> {
        if self.tls_extensions {
            self.servername.as_deref()
        } else {
            None
        }
    }

    /// Whether the peer certificate is verified
    pub fn verify_peer(&self) -> bool {
        self.verify_peer
    }

    /// Connect to a server with TLS
    pub fn connect(&self, stream: std::net::TcpStream) -> Result<super::TlsSessionOps, TlsError> {
        super::session::TlsSessionOps::connect(stream, self.clone())
    }
}

/// Client configuration builder
pub struct ClientConfigBuilder {
    socket: SocketProfile,
    servername: Option<String>,
    verify_peer: bool,
    tls_extensions: bool,
    alpn: Vec<u8>,
}

impl ClientConfigBuilder {
    fn new() -> Self {
        ClientConfigBuilder {
            socket: SocketProfile::openssl(),
            servername: None,
            verify_peer: false,
            tls_extensions: true,
            alpn: Vec::new(),
        }
    }

    /// Socket capabilities the context will be built from
    pub fn socket(&self) -> &SocketProfile {
        &self.socket
    }

    /// Mutable socket capabilities, for negotiating against directly
    pub fn socket_mut(&mut self) -> &mut SocketProfile {
        &mut self.socket
    }

    /// Negotiate `suite` against this builder's socket profile
    ///
    /// Also adopts the suite's extensions flag.
    pub fn connection_suite(
        mut self,
        suite: &ConnectionSuite,
        is_fallback: bool,
    ) -> Result<Self, TlsError> {
        suite.apply(&mut self.socket, is_fallback)?;
        self.tls_extensions = suite.supports_extensions();
        Ok(self)
    }

    /// Set TLS version (both min and max)
    pub fn version(self, version: TlsVersion) -> Result<Self, TlsError> {
        self.version_range(version, version)
    }

    /// Enable every supported TLS version between `min` and `max`
    pub fn version_range(mut self, min: TlsVersion, max: TlsVersion) -> Result<Self, TlsError> {
        let versions: Vec<String> = TlsVersion::ALL
            .iter()
            .filter(|v| v.code() >= min.code() && v.code() <= max.code())
            .map(|v| v.name().to_string())
            .collect();
        self.socket.set_enabled_protocol_versions(&versions)?;
        Ok(self)
    }

    /// Set ALPN protocols
    pub fn alpn(mut self, protocols: &[&str]) -> Result<Self, TlsError> {
        // Encode ALPN protocols (length-prefixed)
        let mut alpn_bytes = Vec::new();
        for proto in protocols {
            let len = u8::try_from(proto.len())
                .ok()
                .filter(|len| *len > 0)
                .ok_or_else(|| {
                    TlsError::Configuration(format!("Invalid ALPN protocol: {:?}", proto))
                })?;
            alpn_bytes.push(len);
            alpn_bytes.extend_from_slice(proto.as_bytes());
        }
        self.alpn = alpn_bytes;
        Ok(self)
    }

    /// Set SNI servername
    pub fn servername(mut self, name: impl Into<String>) -> Self {
        self.servername = Some(name.into());
        self
    }

    /// Enable/disable peer certificate verification
    pub fn verify_peer(mut self, verify: bool) -> Self {
        self.verify_peer = verify;
        self
    }

    /// Enable/disable SNI and ALPN
    pub fn tls_extensions(mut self, enabled: bool) -> Self {
        self.tls_extensions = enabled;
        self
    }

    /// Build the TLS configuration
    pub fn build(self) -> Result<TlsConfig, TlsError> {
        let mut ctx_builder = SslContextBuilder::new(SslMethod::tls_client())?;

        if self.verify_peer {
            ctx_builder.set_default_verify_paths()?;
            ctx_builder.set_verify(SslVerifyMode::PEER);
        } else {
            // Default: don't verify peer (for testing)
            ctx_builder.set_verify(SslVerifyMode::NONE);
        }

        configure_context(&mut ctx_builder, &self.socket)?;

        if self.tls_extensions && !self.alpn.is_empty() {
            ctx_builder.set_alpn_protos(&self.alpn)?;
        }

        Ok(TlsConfig {
            ctx: ctx_builder.build(),
            servername: self.servername,
            tls_extensions: self.tls_extensions,
            verify_peer: self.verify_peer,
        })
    }
}
