//! TLS session operations
//!
//! This module implements the SessionOps trait for TLS connections,
//! enabling transparent switching between plain TCP and TLS I/O.

use super::config::{TlsConfig, TlsError};
use super::vars::TlsVars;
use crate::http::session::{poll_fd, PollEvents, SessionOps};
use crate::http::{Error, Result as HttpResult};
use openssl::ssl::{HandshakeError, Ssl, SslStream};
use openssl::x509::X509VerifyResult;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
use std::os::fd::AsRawFd;
use std::time::Duration;

/// TLS session operations
///
/// Implements SessionOps trait for TLS-encrypted connections.
/// Wraps an OpenSSL SslStream and provides poll/read/write/close operations.
pub struct TlsSessionOps {
    stream: SslStream<TcpStream>,
    vars: TlsVars,
    failed: bool,
    closed: bool,
}

impl TlsSessionOps {
    /// Create a client TLS connection (perform handshake)
    pub fn connect(
        tcp_stream: TcpStream,
        config: TlsConfig,
    ) -> std::result::Result<Self, TlsError> {
        let mut ssl = Ssl::new(&config.ctx)?;

        // SNI is only sent when the connection suite allows extensions
        if let Some(servername) = config.servername() {
            ssl.set_hostname(servername)?;
            if config.verify_peer() {
                ssl.param_mut().set_host(servername)?;
            }
        }

        // Keep in blocking mode for handshake
        let ssl_stream = ssl.connect(tcp_stream).map_err(handshake_error)?;

        let vars = TlsVars::from_ssl(ssl_stream.ssl());
        log::debug!("TLS handshake complete: {} {}", vars.version, vars.cipher);

        Ok(TlsSessionOps {
            stream: ssl_stream,
            vars,
            failed: false,
            closed: false,
        })
    }

    /// Get TLS variables
    pub fn vars(&self) -> &TlsVars {
        &self.vars
    }

    /// Check if TLS failed
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Get reference to underlying TCP stream
    pub fn get_ref(&self) -> &TcpStream {
        self.stream.get_ref()
    }

    fn record_failure(&mut self, e: std::io::Error) -> Error {
        self.failed = true;
        self.vars.failed = true;
        Error::Io(e)
    }
}

/// Classify a failed handshake so callers can decide whether to fall back
fn handshake_error(e: HandshakeError<TcpStream>) -> TlsError {
    match e {
        HandshakeError::SetupFailure(stack) => TlsError::Setup(stack),
        HandshakeError::Failure(mid) => {
            let verify = mid.ssl().verify_result();
            if verify != X509VerifyResult::OK {
                TlsError::Certificate(verify.error_string().to_string())
            } else {
                TlsError::HandshakeFailed(mid.error().to_string())
            }
        }
        HandshakeError::WouldBlock(_) => {
            TlsError::HandshakeFailed("handshake interrupted on a non-blocking socket".to_string())
        }
    }
}

impl SessionOps for TlsSessionOps {
    fn poll(&self, events: PollEvents, timeout: Option<Duration>) -> HttpResult<bool> {
        // Check if SSL has pending data
        let wants_read = matches!(events, PollEvents::Read | PollEvents::Both);
        if wants_read && self.stream.ssl().pending() > 0 {
            return Ok(true);
        }

        poll_fd(self.stream.get_ref().as_raw_fd(), events, timeout)
    }

    fn read(&mut self, buf: &mut [u8]) -> HttpResult<usize> {
        match self.stream.read(buf) {
            Ok(n) => Ok(n),
            Err(e) => Err(self.record_failure(e)),
        }
    }

    fn write(&mut self, buf: &[u8]) -> HttpResult<usize> {
        match self.stream.write(buf) {
            Ok(n) => Ok(n),
            Err(e) => Err(self.record_failure(e)),
        }
    }

    fn flush(&mut self) -> HttpResult<()> {
        match self.stream.flush() {
            Ok(()) => Ok(()),
            Err(e) => Err(self.record_failure(e)),
        }
    }

    fn close(&mut self) -> HttpResult<()> {
        if self.closed {
            return Ok(());
        }

        // Perform SSL shutdown if not failed
        if !self.failed {
            let _ = self.stream.shutdown();
        }

        // Shutdown the underlying TCP connection
        match self.stream.get_mut().shutdown(Shutdown::Both) {
            Err(e) if e.kind() != std::io::ErrorKind::NotConnected => return Err(Error::from(e)),
            _ => {}
        }
        self.closed = true;
        Ok(())
    }
}
