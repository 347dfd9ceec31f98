//! Cipher suite catalog
//!
//! Suites are listed strongest first. A suite's `priority` is its rank in this
//! catalog and is what identity comparisons use, so the `TLS_` and `SSL_`
//! spellings some platforms report for the same legacy suite compare equal.

use std::cmp::Ordering;
use std::fmt;

/// Name of the downgrade signalling value (RFC 7507)
pub const FALLBACK_SCSV: &str = "TLS_FALLBACK_SCSV";

/// Cipher suite information
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CipherSuite {
    name: &'static str,
    code: u16,
    priority: u16,
    openssl_name: Option<&'static str>,
    tls13: bool,
}

impl CipherSuite {
    const fn tls13(name: &'static str, code: u16, priority: u16) -> Self {
        CipherSuite {
            name,
            code,
            priority,
            openssl_name: None,
            tls13: true,
        }
    }

    const fn legacy(name: &'static str, code: u16, priority: u16, openssl: &'static str) -> Self {
        CipherSuite {
            name,
            code,
            priority,
            openssl_name: Some(openssl),
            tls13: false,
        }
    }

    const fn signalling(name: &'static str, code: u16, priority: u16) -> Self {
        CipherSuite {
            name,
            code,
            priority,
            openssl_name: None,
            tls13: false,
        }
    }

    // TLS 1.3
    pub const TLS_AES_128_GCM_SHA256: CipherSuite =
        CipherSuite::tls13("TLS_AES_128_GCM_SHA256", 0x1301, 0);
    pub const TLS_AES_256_GCM_SHA384: CipherSuite =
        CipherSuite::tls13("TLS_AES_256_GCM_SHA384", 0x1302, 1);
    pub const TLS_CHACHA20_POLY1305_SHA256: CipherSuite =
        CipherSuite::tls13("TLS_CHACHA20_POLY1305_SHA256", 0x1303, 2);
    pub const TLS_AES_128_CCM_SHA256: CipherSuite =
        CipherSuite::tls13("TLS_AES_128_CCM_SHA256", 0x1304, 3);
    pub const TLS_AES_128_CCM_8_SHA256: CipherSuite =
        CipherSuite::tls13("TLS_AES_128_CCM_8_SHA256", 0x1305, 4);

    // ECDHE with AEAD
    pub const TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256",
        0xC02B,
        5,
        "ECDHE-ECDSA-AES128-GCM-SHA256",
    );
    pub const TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
        0xC02F,
        6,
        "ECDHE-RSA-AES128-GCM-SHA256",
    );
    pub const TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384",
        0xC02C,
        7,
        "ECDHE-ECDSA-AES256-GCM-SHA384",
    );
    pub const TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384",
        0xC030,
        8,
        "ECDHE-RSA-AES256-GCM-SHA384",
    );
    pub const TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256",
        0xCCA9,
        9,
        "ECDHE-ECDSA-CHACHA20-POLY1305",
    );
    pub const TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256",
        0xCCA8,
        10,
        "ECDHE-RSA-CHACHA20-POLY1305",
    );
    pub const TLS_DHE_RSA_WITH_AES_128_GCM_SHA256: CipherSuite = CipherSuite::legacy(
        "TLS_DHE_RSA_WITH_AES_128_GCM_SHA256",
        0x009E,
        11,
        "DHE-RSA-AES128-GCM-SHA256",
    );
    pub const TLS_DHE_RSA_WITH_AES_256_GCM_SHA384: CipherSuite = CipherSuite::legacy(
        "TLS_DHE_RSA_WITH_AES_256_GCM_SHA384",
        0x009F,
        12,
        "DHE-RSA-AES256-GCM-SHA384",
    );

    // ECDHE with CBC
    pub const TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256",
        0xC023,
        13,
        "ECDHE-ECDSA-AES128-SHA256",
    );
    pub const TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256",
        0xC027,
        14,
        "ECDHE-RSA-AES128-SHA256",
    );
    pub const TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384",
        0xC024,
        15,
        "ECDHE-ECDSA-AES256-SHA384",
    );
    pub const TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384",
        0xC028,
        16,
        "ECDHE-RSA-AES256-SHA384",
    );
    pub const TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA",
        0xC009,
        17,
        "ECDHE-ECDSA-AES128-SHA",
    );
    pub const TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA",
        0xC00A,
        18,
        "ECDHE-ECDSA-AES256-SHA",
    );
    pub const TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA",
        0xC013,
        19,
        "ECDHE-RSA-AES128-SHA",
    );
    pub const TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA: CipherSuite = CipherSuite::legacy(
        "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",
        0xC014,
        20,
        "ECDHE-RSA-AES256-SHA",
    );

    // Static RSA key exchange
    pub const TLS_RSA_WITH_AES_128_GCM_SHA256: CipherSuite =
        CipherSuite::legacy("TLS_RSA_WITH_AES_128_GCM_SHA256", 0x009C, 21, "AES128-GCM-SHA256");
    pub const TLS_RSA_WITH_AES_256_GCM_SHA384: CipherSuite =
        CipherSuite::legacy("TLS_RSA_WITH_AES_256_GCM_SHA384", 0x009D, 22, "AES256-GCM-SHA384");
    pub const TLS_RSA_WITH_AES_128_CBC_SHA256: CipherSuite =
        CipherSuite::legacy("TLS_RSA_WITH_AES_128_CBC_SHA256", 0x003C, 23, "AES128-SHA256");
    pub const TLS_RSA_WITH_AES_256_CBC_SHA256: CipherSuite =
        CipherSuite::legacy("TLS_RSA_WITH_AES_256_CBC_SHA256", 0x003D, 24, "AES256-SHA256");
    pub const TLS_RSA_WITH_AES_128_CBC_SHA: CipherSuite =
        CipherSuite::legacy("TLS_RSA_WITH_AES_128_CBC_SHA", 0x002F, 25, "AES128-SHA");
    pub const TLS_RSA_WITH_AES_256_CBC_SHA: CipherSuite =
        CipherSuite::legacy("TLS_RSA_WITH_AES_256_CBC_SHA", 0x0035, 26, "AES256-SHA");
    pub const TLS_RSA_WITH_3DES_EDE_CBC_SHA: CipherSuite =
        CipherSuite::legacy("TLS_RSA_WITH_3DES_EDE_CBC_SHA", 0x000A, 27, "DES-CBC3-SHA");
    pub const TLS_RSA_WITH_RC4_128_SHA: CipherSuite =
        CipherSuite::legacy("TLS_RSA_WITH_RC4_128_SHA", 0x0005, 28, "RC4-SHA");
    pub const TLS_RSA_WITH_RC4_128_MD5: CipherSuite =
        CipherSuite::legacy("TLS_RSA_WITH_RC4_128_MD5", 0x0004, 29, "RC4-MD5");

    // Signalling values, never negotiated
    pub const TLS_EMPTY_RENEGOTIATION_INFO_SCSV: CipherSuite =
        CipherSuite::signalling("TLS_EMPTY_RENEGOTIATION_INFO_SCSV", 0x00FF, 30);
    pub const TLS_FALLBACK_SCSV: CipherSuite = CipherSuite::signalling(FALLBACK_SCSV, 0x5600, 31);

    /// IANA name
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Two-byte identifier sent in the ClientHello
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Preference rank, lower is stronger
    pub const fn priority(&self) -> u16 {
        self.priority
    }

    /// Name in OpenSSL's cipher-list syntax (pre-1.3 suites only)
    pub const fn openssl_name(&self) -> Option<&'static str> {
        self.openssl_name
    }

    /// Whether this suite only applies to TLS 1.3
    pub const fn is_tls13(&self) -> bool {
        self.tls13
    }

    /// Whether this is a signalling value rather than a real suite
    pub const fn is_signalling(&self) -> bool {
        !self.tls13 && self.openssl_name.is_none()
    }

    /// The whole catalog, in priority order
    pub fn catalog() -> &'static [CipherSuite] {
        CATALOG
    }

    /// Look up a suite by the name a socket reports
    ///
    /// Accepts both the `TLS_` and `SSL_` prefix.
    pub fn for_name(name: &str) -> Option<CipherSuite> {
        let wanted = strip_prefix(name);
        CATALOG
            .iter()
            .find(|suite| strip_prefix(suite.name) == wanted)
            .copied()
    }

    /// Look up a suite by its two-byte identifier
    pub fn for_code(code: u16) -> Option<CipherSuite> {
        CATALOG.iter().find(|suite| suite.code == code).copied()
    }

    /// Look up a suite by its OpenSSL name
    pub fn for_openssl_name(name: &str) -> Option<CipherSuite> {
        CATALOG
            .iter()
            .find(|suite| suite.openssl_name == Some(name) || (suite.tls13 && suite.name == name))
            .copied()
    }

    /// Whether two reported names identify the same suite
    ///
    /// Catalogued names compare by priority. Names outside the catalog
    /// compare by the text after their 4-character protocol prefix.
    pub fn same_suite(a: &str, b: &str) -> bool {
        match (CipherSuite::for_name(a), CipherSuite::for_name(b)) {
            (Some(x), Some(y)) => x.priority == y.priority,
            _ => strip_prefix(a) == strip_prefix(b),
        }
    }
}

fn strip_prefix(name: &str) -> &str {
    name.strip_prefix("TLS_")
        .or_else(|| name.strip_prefix("SSL_"))
        .unwrap_or(name)
}

impl PartialOrd for CipherSuite {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CipherSuite {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.name.cmp(other.name))
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

static CATALOG: &[CipherSuite] = &[
    CipherSuite::TLS_AES_128_GCM_SHA256,
    CipherSuite::TLS_AES_256_GCM_SHA384,
    CipherSuite::TLS_CHACHA20_POLY1305_SHA256,
    CipherSuite::TLS_AES_128_CCM_SHA256,
    CipherSuite::TLS_AES_128_CCM_8_SHA256,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
    CipherSuite::TLS_DHE_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_DHE_RSA_WITH_AES_256_GCM_SHA384,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_RSA_WITH_AES_256_GCM_SHA384,
    CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA256,
    CipherSuite::TLS_RSA_WITH_AES_256_CBC_SHA256,
    CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
    CipherSuite::TLS_RSA_WITH_RC4_128_MD5,
    CipherSuite::TLS_EMPTY_RENEGOTIATION_INFO_SCSV,
    CipherSuite::TLS_FALLBACK_SCSV,
];
