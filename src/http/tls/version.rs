//! TLS protocol versions

use super::TlsError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// TLS protocol version
///
/// Versions order by priority, strongest first, so `Tls13 < Tls12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlsVersion {
    /// TLS 1.3
    Tls13,
    /// TLS 1.2
    Tls12,
    /// TLS 1.1
    Tls11,
    /// TLS 1.0
    Tls10,
    /// SSL 3.0 (deprecated, rarely used)
    Ssl3,
}

impl TlsVersion {
    /// Every version, in priority order
    pub const ALL: [TlsVersion; 5] = [
        TlsVersion::Tls13,
        TlsVersion::Tls12,
        TlsVersion::Tls11,
        TlsVersion::Tls10,
        TlsVersion::Ssl3,
    ];

    /// Name used by sockets to enable this version
    pub const fn name(self) -> &'static str {
        match self {
            TlsVersion::Tls13 => "TLSv1.3",
            TlsVersion::Tls12 => "TLSv1.2",
            TlsVersion::Tls11 => "TLSv1.1",
            TlsVersion::Tls10 => "TLSv1",
            TlsVersion::Ssl3 => "SSLv3",
        }
    }

    /// Preference rank, lower is stronger
    pub const fn priority(self) -> u8 {
        match self {
            TlsVersion::Tls13 => 0,
            TlsVersion::Tls12 => 1,
            TlsVersion::Tls11 => 2,
            TlsVersion::Tls10 => 3,
            TlsVersion::Ssl3 => 4,
        }
    }

    /// Protocol version as sent on the wire
    pub const fn code(self) -> u16 {
        match self {
            TlsVersion::Tls13 => 0x0304,
            TlsVersion::Tls12 => 0x0303,
            TlsVersion::Tls11 => 0x0302,
            TlsVersion::Tls10 => 0x0301,
            TlsVersion::Ssl3 => 0x0300,
        }
    }

    /// Look up the version a socket reports as `name`
    pub fn for_name(name: &str) -> Result<Self, TlsError> {
        name.parse()
    }

    /// Get OpenSSL protocol version constant
    pub fn to_openssl_version(self) -> openssl::ssl::SslVersion {
        use openssl::ssl::SslVersion;
        match self {
            TlsVersion::Ssl3 => SslVersion::SSL3,
            TlsVersion::Tls10 => SslVersion::TLS1,
            TlsVersion::Tls11 => SslVersion::TLS1_1,
            TlsVersion::Tls12 => SslVersion::TLS1_2,
            TlsVersion::Tls13 => SslVersion::TLS1_3,
        }
    }
}

impl FromStr for TlsVersion {
    type Err = TlsError;

    /// Parse TLS version from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SSLV3" | "SSL3" => Ok(TlsVersion::Ssl3),
            "TLSV1.0" | "TLS1.0" | "TLSV1" | "TLS1" => Ok(TlsVersion::Tls10),
            "TLSV1.1" | "TLS1.1" => Ok(TlsVersion::Tls11),
            "TLSV1.2" | "TLS1.2" => Ok(TlsVersion::Tls12),
            "TLSV1.3" | "TLS1.3" => Ok(TlsVersion::Tls13),
            _ => Err(TlsError::InvalidVersion(s.to_string())),
        }
    }
}

impl PartialOrd for TlsVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TlsVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl fmt::Display for TlsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tls_version_parsing() {
        assert_eq!("TLSv1.2".parse::<TlsVersion>().unwrap(), TlsVersion::Tls12);
        assert_eq!("tlsv1.3".parse::<TlsVersion>().unwrap(), TlsVersion::Tls13);
        assert_eq!("TLS1.0".parse::<TlsVersion>().unwrap(), TlsVersion::Tls10);
        assert_eq!(TlsVersion::for_name("TLSv1").unwrap(), TlsVersion::Tls10);
        assert!(matches!(
            TlsVersion::for_name("SSLv2Hello"),
            Err(TlsError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_names_round_trip() {
        for version in TlsVersion::ALL {
            assert_eq!(TlsVersion::for_name(version.name()).unwrap(), version);
        }
    }

    #[test]
    fn test_priority_follows_catalog_order() {
        let priorities: Vec<u8> = TlsVersion::ALL.iter().map(|v| v.priority()).collect();
        assert!(priorities.windows(2).all(|w| w[0] < w[1]));

        let mut shuffled = vec![
            TlsVersion::Tls10,
            TlsVersion::Tls13,
            TlsVersion::Ssl3,
            TlsVersion::Tls12,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![TlsVersion::Tls13, TlsVersion::Tls12, TlsVersion::Tls10, TlsVersion::Ssl3]
        );
    }

    #[test]
    fn test_wire_codes_descend_with_priority() {
        assert!(TlsVersion::ALL.windows(2).all(|w| w[0].code() > w[1].code()));
    }
}
