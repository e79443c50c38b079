//! JWE compact serialization parsing (RFC 7516 §7.1).

use zeroize::Zeroizing;

use crate::error::{JweError, JweResult};
use crate::jwe::base64url;

const SEGMENT_COUNT: usize = 5;

/// The five decoded segments of a compact JWE.
///
/// The protected header is also kept in its original base64url form because
/// that exact ASCII text is the AAD for content decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactJwe {
    encoded_header: String,
    header: Vec<u8>,
    pub encrypted_key: Vec<u8>,
    pub iv: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub tag: Vec<u8>,
}

/// Cheap shape check: five dot-separated base64url segments with a non-empty
/// header and ciphertext.
///
/// Used by the HTTP layer to reject obvious garbage before any decoding.
pub fn matches_compact_pattern(input: &str) -> bool {
    let parts: Vec<&str> = input.split('.').collect();
    parts.len() == SEGMENT_COUNT
        && parts.iter().all(|part| base64url::is_alphabet(part))
        && !parts[0].is_empty()
        && !parts[3].is_empty()
}

impl CompactJwe {
    /// Split and decode a compact JWE.
    ///
    /// The encrypted key, IV and tag may be empty segments; whether that is
    /// acceptable is decided once `alg`/`enc` are known.
    pub fn parse(input: &str) -> JweResult<Self> {
        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() != SEGMENT_COUNT {
            return Err(JweError::malformed(format!(
                "expected {SEGMENT_COUNT} segments, found {}",
                parts.len()
            )));
        }

        const NAMES: [&str; SEGMENT_COUNT] =
            ["protected header", "encrypted key", "iv", "ciphertext", "tag"];
        let mut decoded = Vec::with_capacity(SEGMENT_COUNT);
        for (part, name) in parts.iter().zip(NAMES) {
            if !base64url::is_alphabet(part) {
                return Err(JweError::malformed(format!(
                    "{name} segment contains characters outside the base64url alphabet"
                )));
            }
            let bytes = base64url::decode(part)
                .map_err(|e| JweError::malformed(format!("{name} segment: {e}")))?;
            decoded.push(bytes);
        }

        if parts[0].is_empty() {
            return Err(JweError::malformed("protected header segment is empty"));
        }

        let mut decoded = decoded.into_iter();
        let mut next = || decoded.next().unwrap_or_default();
        Ok(Self {
            encoded_header: parts[0].to_string(),
            header: next(),
            encrypted_key: next(),
            iv: next(),
            ciphertext: next(),
            tag: next(),
        })
    }

    /// Decoded protected header bytes (expected to be UTF-8 JSON).
    pub fn protected_header(&self) -> &[u8] {
        &self.header
    }

    /// Additional authenticated data: ASCII of the header segment as received.
    pub fn aad(&self) -> &[u8] {
        self.encoded_header.as_bytes()
    }

    /// Move the ciphertext out into a buffer that is wiped once dropped.
    pub(crate) fn take_ciphertext(&mut self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(std::mem::take(&mut self.ciphertext))
    }
}
