//! JWE compact decryption pipeline.
//!
//! Stages run strictly forward:
//!
//! 1. [`compact`] splits and decodes the five segments
//! 2. [`header`] validates the protected header against the allow-list
//! 3. [`jwk`] imports the caller's key and checks it fits the header
//! 4. [`key_management`] recovers the CEK
//! 5. [`content`] verifies and decrypts the ciphertext
//! 6. [`payload`] inflates if needed and parses the plaintext
//!
//! Every stage fails with a typed [`JweError`](crate::error::JweError).
//! No state survives a call; key material and the CEK are wiped when they
//! go out of scope.

pub mod algorithms;
pub mod base64url;
pub mod compact;
pub mod content;
pub mod header;
pub mod jwk;
pub mod key_management;
pub mod payload;

use serde_json::Value;

use crate::error::JweResult;

pub use algorithms::{AlgorithmPolicy, ContentEncryptionAlgorithm, KeyManagementAlgorithm};
pub use compact::{CompactJwe, matches_compact_pattern};
pub use header::ValidatedHeader;
pub use jwk::{Jwk, KeyMaterial};

/// Verified, parsed result of one decryption.
#[derive(Debug, Clone)]
pub struct Decrypted {
    pub header: ValidatedHeader,
    pub payload: Value,
}

/// Decrypt a compact JWE with a private JWK under `policy`.
pub fn decrypt_compact(
    input: &str,
    jwk: &Value,
    policy: &AlgorithmPolicy,
) -> JweResult<Decrypted> {
    let mut jwe = CompactJwe::parse(input)?;
    let header = ValidatedHeader::parse(jwe.protected_header(), policy)?;

    tracing::debug!(
        alg = %header.alg,
        enc = %header.enc,
        kid = header.kid.as_deref().unwrap_or("-"),
        "Validated JWE header"
    );

    let key = Jwk::import(jwk)?;
    key.check_usable_for(&header)?;

    let cek = key_management::resolve_cek(&header, &key, &jwe.encrypted_key)?;
    drop(key);

    let ciphertext = jwe.take_ciphertext();
    let plaintext = content::decrypt(header.enc, &cek, &jwe.iv, jwe.aad(), ciphertext, &jwe.tag)?;
    drop(cek);

    let plaintext = match header.zip {
        Some(header::Compression::Deflate) => payload::inflate(&plaintext)?,
        None => plaintext,
    };

    let payload = payload::parse(&plaintext)?;
    Ok(Decrypted { header, payload })
}
