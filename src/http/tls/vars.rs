//! TLS variables
//!
//! Populated after a handshake with what was actually negotiated, so a
//! caller can compare it with the connection suite it asked for.

use super::cipher::CipherSuite;
use super::version::TlsVersion;
use openssl::ssl::{NameType, SslRef};

/// TLS variables available after handshake
#[derive(Debug, Clone)]
pub struct TlsVars {
    /// Negotiated TLS version (e.g., "TLSv1.3")
    pub version: String,

    /// Negotiated cipher suite, OpenSSL name
    pub cipher: String,

    /// SNI servername
    pub servername: Option<String>,

    /// Negotiated ALPN protocol
    pub alpn: Option<String>,

    /// Whether handshake or I/O failed
    pub failed: bool,

    /// Whether session was resumed
    pub sess_reused: bool,
}

impl TlsVars {
    /// Create TLS variables from an SSL connection
    pub fn from_ssl(ssl: &SslRef) -> Self {
        TlsVars {
            version: ssl.version_str().to_string(),
            cipher: ssl
                .current_cipher()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            servername: ssl.servername(NameType::HOST_NAME).map(|s| s.to_string()),
            alpn: ssl
                .selected_alpn_protocol()
                .map(|p| String::from_utf8_lossy(p).to_string()),
            failed: false,
            sess_reused: ssl.session_reused(),
        }
    }

    /// Negotiated version, if it is one we know
    pub fn tls_version(&self) -> Option<TlsVersion> {
        TlsVersion::for_name(&self.version).ok()
    }

    /// Negotiated cipher suite, if it is catalogued
    pub fn cipher_suite(&self) -> Option<CipherSuite> {
        CipherSuite::for_openssl_name(&self.cipher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negotiated(version: &str, cipher: &str) -> TlsVars {
        TlsVars {
            version: version.to_string(),
            cipher: cipher.to_string(),
            servername: None,
            alpn: None,
            failed: false,
            sess_reused: false,
        }
    }

    #[test]
    fn test_negotiated_lookups() {
        let vars = negotiated("TLSv1.2", "ECDHE-RSA-AES256-GCM-SHA384");

        assert_eq!(vars.tls_version(), Some(TlsVersion::Tls12));
        assert_eq!(
            vars.cipher_suite(),
            Some(CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384)
        );
    }

    #[test]
    fn test_tls13_cipher_uses_iana_name() {
        let vars = negotiated("TLSv1.3", "TLS_AES_256_GCM_SHA384");

        assert_eq!(vars.tls_version(), Some(TlsVersion::Tls13));
        assert_eq!(vars.cipher_suite(), Some(CipherSuite::TLS_AES_256_GCM_SHA384));
    }

    #[test]
    fn test_unknown_values() {
        let vars = negotiated("DTLSv1.2", "GOST2012-KUZNYECHIK-KUZNYECHIKOMAC");

        assert_eq!(vars.tls_version(), None);
        assert_eq!(vars.cipher_suite(), None);
    }
}
