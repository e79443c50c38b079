//! JOSE algorithm identifiers (RFC 7518 §4, §5) and the allow-list policy.

use std::fmt;
use std::str::FromStr;

/// Key management algorithm (`alg` header parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyManagementAlgorithm {
    Rsa1_5,
    RsaOaep,
    RsaOaep256,
    A128Kw,
    A192Kw,
    A256Kw,
    A128GcmKw,
    A192GcmKw,
    A256GcmKw,
    Dir,
    EcdhEs,
    EcdhEsA128Kw,
    EcdhEsA192Kw,
    EcdhEsA256Kw,
    Pbes2Hs256A128Kw,
    Pbes2Hs384A192Kw,
    Pbes2Hs512A256Kw,
}

impl KeyManagementAlgorithm {
    pub const ALL: [Self; 17] = [
        Self::Rsa1_5,
        Self::RsaOaep,
        Self::RsaOaep256,
        Self::A128Kw,
        Self::A192Kw,
        Self::A256Kw,
        Self::A128GcmKw,
        Self::A192GcmKw,
        Self::A256GcmKw,
        Self::Dir,
        Self::EcdhEs,
        Self::EcdhEsA128Kw,
        Self::EcdhEsA192Kw,
        Self::EcdhEsA256Kw,
        Self::Pbes2Hs256A128Kw,
        Self::Pbes2Hs384A192Kw,
        Self::Pbes2Hs512A256Kw,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rsa1_5 => "RSA1_5",
            Self::RsaOaep => "RSA-OAEP",
            Self::RsaOaep256 => "RSA-OAEP-256",
            Self::A128Kw => "A128KW",
            Self::A192Kw => "A192KW",
            Self::A256Kw => "A256KW",
            Self::A128GcmKw => "A128GCMKW",
            Self::A192GcmKw => "A192GCMKW",
            Self::A256GcmKw => "A256GCMKW",
            Self::Dir => "dir",
            Self::EcdhEs => "ECDH-ES",
            Self::EcdhEsA128Kw => "ECDH-ES+A128KW",
            Self::EcdhEsA192Kw => "ECDH-ES+A192KW",
            Self::EcdhEsA256Kw => "ECDH-ES+A256KW",
            Self::Pbes2Hs256A128Kw => "PBES2-HS256+A128KW",
            Self::Pbes2Hs384A192Kw => "PBES2-HS384+A192KW",
            Self::Pbes2Hs512A256Kw => "PBES2-HS512+A256KW",
        }
    }

    /// Size in bytes of the AES key-encryption key, for algorithms that wrap
    /// the CEK with AES (KW or GCM).
    pub fn wrapping_key_len(self) -> Option<usize> {
        match self {
            Self::A128Kw | Self::A128GcmKw | Self::EcdhEsA128Kw | Self::Pbes2Hs256A128Kw => {
                Some(16)
            }
            Self::A192Kw | Self::A192GcmKw | Self::EcdhEsA192Kw | Self::Pbes2Hs384A192Kw => {
                Some(24)
            }
            Self::A256Kw | Self::A256GcmKw | Self::EcdhEsA256Kw | Self::Pbes2Hs512A256Kw => {
                Some(32)
            }
            Self::Rsa1_5 | Self::RsaOaep | Self::RsaOaep256 | Self::Dir | Self::EcdhEs => None,
        }
    }

    /// True when the JWE carries no encrypted key segment.
    pub fn is_direct(self) -> bool {
        matches!(self, Self::Dir | Self::EcdhEs)
    }
}

impl fmt::Display for KeyManagementAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyManagementAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| format!("unknown key management algorithm '{s}'"))
    }
}

/// Content encryption algorithm (`enc` header parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentEncryptionAlgorithm {
    A128Gcm,
    A192Gcm,
    A256Gcm,
    A128CbcHs256,
    A192CbcHs384,
    A256CbcHs512,
}

impl ContentEncryptionAlgorithm {
    pub const ALL: [Self; 6] = [
        Self::A128Gcm,
        Self::A192Gcm,
        Self::A256Gcm,
        Self::A128CbcHs256,
        Self::A192CbcHs384,
        Self::A256CbcHs512,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A128Gcm => "A128GCM",
            Self::A192Gcm => "A192GCM",
            Self::A256Gcm => "A256GCM",
            Self::A128CbcHs256 => "A128CBC-HS256",
            Self::A192CbcHs384 => "A192CBC-HS384",
            Self::A256CbcHs512 => "A256CBC-HS512",
        }
    }

    /// CEK length in bytes. For CBC-HMAC this is MAC key + encryption key.
    pub fn key_len(self) -> usize {
        match self {
            Self::A128Gcm => 16,
            Self::A192Gcm => 24,
            Self::A256Gcm | Self::A128CbcHs256 => 32,
            Self::A192CbcHs384 => 48,
            Self::A256CbcHs512 => 64,
        }
    }

    pub fn iv_len(self) -> usize {
        match self {
            Self::A128Gcm | Self::A192Gcm | Self::A256Gcm => 12,
            Self::A128CbcHs256 | Self::A192CbcHs384 | Self::A256CbcHs512 => 16,
        }
    }

    pub fn tag_len(self) -> usize {
        match self {
            Self::A128Gcm | Self::A192Gcm | Self::A256Gcm | Self::A128CbcHs256 => 16,
            Self::A192CbcHs384 => 24,
            Self::A256CbcHs512 => 32,
        }
    }
}

impl fmt::Display for ContentEncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentEncryptionAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|enc| enc.as_str() == s)
            .ok_or_else(|| format!("unknown content encryption algorithm '{s}'"))
    }
}

/// Algorithms a deployment is willing to process.
///
/// Built once from configuration and consulted before any key material is
/// touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmPolicy {
    algs: Vec<KeyManagementAlgorithm>,
    encs: Vec<ContentEncryptionAlgorithm>,
}

impl Default for AlgorithmPolicy {
    /// Everything except `RSA1_5`, whose padding is oracle-prone.
    fn default() -> Self {
        Self {
            algs: KeyManagementAlgorithm::ALL
                .into_iter()
                .filter(|alg| *alg != KeyManagementAlgorithm::Rsa1_5)
                .collect(),
            encs: ContentEncryptionAlgorithm::ALL.to_vec(),
        }
    }
}

impl AlgorithmPolicy {
    pub fn new(algs: Vec<KeyManagementAlgorithm>, encs: Vec<ContentEncryptionAlgorithm>) -> Self {
        Self { algs, encs }
    }

    /// Parse comma-separated identifier lists; blank entries are ignored.
    pub fn from_lists(algs: &str, encs: &str) -> Result<Self, String> {
        Ok(Self {
            algs: parse_list(algs)?,
            encs: parse_list(encs)?,
        })
    }

    pub fn permits_alg(&self, alg: KeyManagementAlgorithm) -> bool {
        self.algs.contains(&alg)
    }

    pub fn permits_enc(&self, enc: ContentEncryptionAlgorithm) -> bool {
        self.encs.contains(&enc)
    }

    pub fn algs(&self) -> &[KeyManagementAlgorithm] {
        &self.algs
    }

    pub fn encs(&self) -> &[ContentEncryptionAlgorithm] {
        &self.encs
    }
}

fn parse_list<T: FromStr<Err = String>>(list: &str) -> Result<Vec<T>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}
