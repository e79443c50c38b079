//! CEK recovery for every supported key management mode (RFC 7518 §4).
//!
//! Cryptographic failures (unwrap, OAEP decoding, GCM tag) all surface as
//! `DecryptionFailed`; the failing step is only logged at debug level.
//! Missing or malformed header prerequisites are `MalformedJwe`.

use aes_kw::{KekAes128, KekAes192, KekAes256};
use rand::RngCore;
use rand::rngs::OsRng;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey};
use serde::Deserialize;
use serde_json::Value;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::error::{JweError, JweResult};
use crate::jwe::algorithms::{ContentEncryptionAlgorithm, KeyManagementAlgorithm};
use crate::jwe::base64url;
use crate::jwe::content;
use crate::jwe::header::ValidatedHeader;
use crate::jwe::jwk::{EcCurve, EcPrivateKey, Jwk, KeyMaterial};

type Cek = Zeroizing<Vec<u8>>;

/// Minimum PBES2 salt input length in bytes (RFC 7518 §4.8.1.1).
pub const PBES2_MIN_SALT_LEN: usize = 8;
/// Upper bound on PBES2 iterations, so a hostile header cannot pin a worker.
pub const PBES2_MAX_ITERATIONS: u64 = 1_000_000;

/// Recover the content encryption key for `header` using `jwk`.
///
/// The key must already have passed [`Jwk::check_usable_for`].
pub fn resolve_cek(header: &ValidatedHeader, jwk: &Jwk, encrypted_key: &[u8]) -> JweResult<Cek> {
    use KeyManagementAlgorithm as Alg;

    if header.alg.is_direct() && !encrypted_key.is_empty() {
        return Err(JweError::malformed(format!(
            "{} requires an empty encrypted key segment",
            header.alg
        )));
    }
    if !header.alg.is_direct() && encrypted_key.is_empty() {
        return Err(JweError::malformed(format!(
            "{} requires an encrypted key",
            header.alg
        )));
    }

    let cek = match (header.alg, &jwk.material) {
        (Alg::Dir, KeyMaterial::Oct(key)) => Zeroizing::new(key.to_vec()),
        (Alg::Rsa1_5, KeyMaterial::Rsa(key)) => {
            return Ok(rsa1_5_unwrap(key, encrypted_key, header.enc));
        }
        (Alg::RsaOaep, KeyMaterial::Rsa(key)) => {
            rsa_oaep_unwrap(key, Oaep::new::<Sha1>(), encrypted_key)?
        }
        (Alg::RsaOaep256, KeyMaterial::Rsa(key)) => {
            rsa_oaep_unwrap(key, Oaep::new::<Sha256>(), encrypted_key)?
        }
        (Alg::A128Kw | Alg::A192Kw | Alg::A256Kw, KeyMaterial::Oct(kek)) => {
            aes_kw_unwrap(kek, encrypted_key)?
        }
        (Alg::A128GcmKw | Alg::A192GcmKw | Alg::A256GcmKw, KeyMaterial::Oct(kek)) => {
            aes_gcm_kw_unwrap(header, kek, encrypted_key)?
        }
        (Alg::EcdhEs, KeyMaterial::Ec(key)) => {
            ecdh_es_derive(header, key, header.enc.as_str(), header.enc.key_len())?
        }
        (Alg::EcdhEsA128Kw | Alg::EcdhEsA192Kw | Alg::EcdhEsA256Kw, KeyMaterial::Ec(key)) => {
            let kek_len = wrapping_key_len(header.alg)?;
            let kek = ecdh_es_derive(header, key, header.alg.as_str(), kek_len)?;
            aes_kw_unwrap(&kek, encrypted_key)?
        }
        (
            Alg::Pbes2Hs256A128Kw | Alg::Pbes2Hs384A192Kw | Alg::Pbes2Hs512A256Kw,
            KeyMaterial::Oct(password),
        ) => {
            let kek = pbes2_derive(header, password)?;
            aes_kw_unwrap(&kek, encrypted_key)?
        }
        (alg, material) => {
            return Err(JweError::key_mismatch(format!(
                "{} key cannot be used with alg '{alg}'",
                material.kty()
            )));
        }
    };

    if cek.len() != header.enc.key_len() {
        return Err(JweError::malformed(format!(
            "{} requires a {}-byte CEK, key management produced {}",
            header.enc,
            header.enc.key_len(),
            cek.len()
        )));
    }
    Ok(cek)
}

fn wrapping_key_len(alg: KeyManagementAlgorithm) -> JweResult<usize> {
    alg.wrapping_key_len()
        .ok_or_else(|| JweError::Internal(format!("{alg} has no wrapping key length")))
}

fn decryption_failed(step: &'static str) -> JweError {
    tracing::debug!(step, "Key management failed");
    JweError::DecryptionFailed
}

fn rsa_oaep_unwrap(key: &RsaPrivateKey, padding: Oaep, encrypted_key: &[u8]) -> JweResult<Cek> {
    key.decrypt_blinded(&mut OsRng, padding, encrypted_key)
        .map(Zeroizing::new)
        .map_err(|_| decryption_failed("rsa-oaep"))
}

/// PKCS#1 v1.5 unwrap. Any failure, including a CEK of the wrong length,
/// yields a random CEK so the outcome is only visible after content
/// decryption (RFC 7516 §11.5).
fn rsa1_5_unwrap(
    key: &RsaPrivateKey,
    encrypted_key: &[u8],
    enc: ContentEncryptionAlgorithm,
) -> Cek {
    let mut random = Zeroizing::new(vec![0u8; enc.key_len()]);
    OsRng.fill_bytes(&mut random);

    match key.decrypt_blinded(&mut OsRng, Pkcs1v15Encrypt, encrypted_key) {
        Ok(cek) if cek.len() == enc.key_len() => Zeroizing::new(cek),
        _ => random,
    }
}

/// RFC 3394 unwrap with a 128, 192 or 256-bit KEK.
fn aes_kw_unwrap(kek: &[u8], wrapped: &[u8]) -> JweResult<Cek> {
    if wrapped.len() < 24 || wrapped.len() % 8 != 0 {
        return Err(decryption_failed("aes-kw length"));
    }
    let mut cek = Zeroizing::new(vec![0u8; wrapped.len() - 8]);
    let unwrapped = match kek.len() {
        16 => KekAes128::try_from(kek).and_then(|kek| kek.unwrap(wrapped, &mut cek)),
        24 => KekAes192::try_from(kek).and_then(|kek| kek.unwrap(wrapped, &mut cek)),
        32 => KekAes256::try_from(kek).and_then(|kek| kek.unwrap(wrapped, &mut cek)),
        other => {
            return Err(JweError::Internal(format!(
                "unexpected AES-KW key length {other}"
            )));
        }
    };
    unwrapped.map_err(|_| decryption_failed("aes-kw"))?;
    Ok(cek)
}

/// AES-GCM key wrap (RFC 7518 §4.7). The header carries the 96-bit IV and
/// 128-bit tag.
fn aes_gcm_kw_unwrap(header: &ValidatedHeader, kek: &[u8], wrapped: &[u8]) -> JweResult<Cek> {
    let iv = header_bytes(header.iv.as_deref(), "iv", header.alg)?;
    let tag = header_bytes(header.tag.as_deref(), "tag", header.alg)?;
    if iv.len() != 12 {
        return Err(JweError::malformed("header `iv` must be 96 bits"));
    }
    if tag.len() != 16 {
        return Err(JweError::malformed("header `tag` must be 128 bits"));
    }

    let mut cek = Zeroizing::new(wrapped.to_vec());
    let opened = match kek.len() {
        16 => content::gcm_open::<aes_gcm::Aes128Gcm>(kek, &iv, &[], &mut cek, &tag),
        24 => content::gcm_open::<content::Aes192Gcm>(kek, &iv, &[], &mut cek, &tag),
        32 => content::gcm_open::<aes_gcm::Aes256Gcm>(kek, &iv, &[], &mut cek, &tag),
        other => {
            return Err(JweError::Internal(format!(
                "unexpected AES-GCMKW key length {other}"
            )));
        }
    };
    opened.map_err(decryption_failed)?;
    Ok(cek)
}

fn header_bytes(
    value: Option<&str>,
    name: &str,
    alg: KeyManagementAlgorithm,
) -> JweResult<Vec<u8>> {
    let encoded = value
        .ok_or_else(|| JweError::malformed(format!("{alg} requires header `{name}`")))?;
    base64url::decode(encoded)
        .map_err(|_| JweError::malformed(format!("header `{name}` is not valid base64url")))
}

fn optional_header_bytes(value: Option<&str>, name: &str) -> JweResult<Vec<u8>> {
    match value {
        Some(encoded) => base64url::decode(encoded)
            .map_err(|_| JweError::malformed(format!("header `{name}` is not valid base64url"))),
        None => Ok(Vec::new()),
    }
}

/// Public part of the `epk` header. `d` must not be present.
#[derive(Deserialize)]
struct EphemeralJwk {
    kty: String,
    crv: String,
    x: String,
    y: String,
    d: Option<Value>,
}

fn ephemeral_point(header: &ValidatedHeader, curve: EcCurve) -> JweResult<Vec<u8>> {
    let epk = header
        .epk
        .as_ref()
        .ok_or_else(|| JweError::malformed(format!("{} requires header `epk`", header.alg)))?;
    let epk = EphemeralJwk::deserialize(epk)
        .map_err(|e| JweError::malformed(format!("invalid `epk`: {e}")))?;
    if epk.kty != "EC" {
        return Err(JweError::malformed("`epk` must be an EC key"));
    }
    if epk.d.is_some() {
        return Err(JweError::malformed("`epk` must not contain a private key"));
    }
    if EcCurve::from_crv(&epk.crv) != Some(curve) {
        return Err(JweError::key_mismatch(format!(
            "`epk` curve '{}' does not match JWK curve '{curve}'",
            epk.crv
        )));
    }

    let x = base64url::decode(&epk.x)
        .map_err(|_| JweError::malformed("`epk.x` is not valid base64url"))?;
    let y = base64url::decode(&epk.y)
        .map_err(|_| JweError::malformed("`epk.y` is not valid base64url"))?;
    curve
        .sec1_point(&x, &y)
        .ok_or_else(|| {
            JweError::malformed(format!(
                "`epk` coordinates have the wrong length for {curve}"
            ))
        })
}

/// Per-curve ECDH: the ephemeral point is validated on the curve, then the
/// raw shared secret `Z` is returned.
macro_rules! impl_ecdh {
    ($fn_name:ident, $curve:ident) => {
        fn $fn_name(secret: &$curve::SecretKey, point: &[u8]) -> JweResult<Cek> {
            let public = $curve::PublicKey::from_sec1_bytes(point)
                .map_err(|_| decryption_failed("ecdh epk"))?;
            let shared = $curve::elliptic_curve::ecdh::diffie_hellman(
                secret.to_nonzero_scalar(),
                public.as_affine(),
            );
            Ok(Zeroizing::new(shared.raw_secret_bytes().to_vec()))
        }
    };
}

impl_ecdh!(ecdh_p256, p256);
impl_ecdh!(ecdh_p384, p384);
impl_ecdh!(ecdh_p521, p521);

/// ECDH-ES key agreement followed by the Concat KDF (RFC 7518 §4.6.2).
///
/// `algorithm_id` is `enc` in direct mode and `alg` in key wrap mode;
/// `key_len` is the output length in bytes.
fn ecdh_es_derive(
    header: &ValidatedHeader,
    key: &EcPrivateKey,
    algorithm_id: &str,
    key_len: usize,
) -> JweResult<Cek> {
    let point = ephemeral_point(header, key.curve())?;
    let z = match key {
        EcPrivateKey::P256(secret) => ecdh_p256(secret, &point)?,
        EcPrivateKey::P384(secret) => ecdh_p384(secret, &point)?,
        EcPrivateKey::P521(secret) => ecdh_p521(secret, &point)?,
    };

    let apu = optional_header_bytes(header.apu.as_deref(), "apu")?;
    let apv = optional_header_bytes(header.apv.as_deref(), "apv")?;
    let other_info = concat_kdf_other_info(algorithm_id.as_bytes(), &apu, &apv, key_len);

    let mut derived = Zeroizing::new(vec![0u8; key_len]);
    concat_kdf::derive_key_into::<Sha256>(&z, &other_info, &mut derived)
        .map_err(|e| JweError::Internal(format!("concat KDF: {e:?}")))?;
    Ok(derived)
}

/// `OtherInfo` = AlgorithmID || PartyUInfo || PartyVInfo || SuppPubInfo,
/// each of the first three prefixed with its 32-bit big-endian length.
pub(crate) fn concat_kdf_other_info(
    algorithm_id: &[u8],
    apu: &[u8],
    apv: &[u8],
    key_len: usize,
) -> Vec<u8> {
    let mut info = Vec::with_capacity(16 + algorithm_id.len() + apu.len() + apv.len());
    for field in [algorithm_id, apu, apv] {
        info.extend_from_slice(&(field.len() as u32).to_be_bytes());
        info.extend_from_slice(field);
    }
    info.extend_from_slice(&((key_len * 8) as u32).to_be_bytes());
    info
}

/// PBES2 key derivation (RFC 7518 §4.8): PBKDF2 over the `oct` key bytes
/// with salt `alg || 0x00 || p2s`.
fn pbes2_derive(header: &ValidatedHeader, password: &[u8]) -> JweResult<Cek> {
    let p2s = header_bytes(header.p2s.as_deref(), "p2s", header.alg)?;
    if p2s.len() < PBES2_MIN_SALT_LEN {
        return Err(JweError::malformed(format!(
            "header `p2s` must be at least {PBES2_MIN_SALT_LEN} bytes"
        )));
    }
    let p2c = header
        .p2c
        .ok_or_else(|| JweError::malformed(format!("{} requires header `p2c`", header.alg)))?;
    if !(1..=PBES2_MAX_ITERATIONS).contains(&p2c) {
        return Err(JweError::malformed(format!(
            "header `p2c` must be between 1 and {PBES2_MAX_ITERATIONS}"
        )));
    }
    let rounds = u32::try_from(p2c).map_err(|_| JweError::malformed("header `p2c` is too large"))?;

    let mut salt = Vec::with_capacity(header.alg.as_str().len() + 1 + p2s.len());
    salt.extend_from_slice(header.alg.as_str().as_bytes());
    salt.push(0);
    salt.extend_from_slice(&p2s);

    let mut kek = Zeroizing::new(vec![0u8; wrapping_key_len(header.alg)?]);
    match header.alg {
        KeyManagementAlgorithm::Pbes2Hs256A128Kw => {
            pbkdf2::pbkdf2_hmac::<Sha256>(password, &salt, rounds, &mut kek);
        }
        KeyManagementAlgorithm::Pbes2Hs384A192Kw => {
            pbkdf2::pbkdf2_hmac::<Sha384>(password, &salt, rounds, &mut kek);
        }
        KeyManagementAlgorithm::Pbes2Hs512A256Kw => {
            pbkdf2::pbkdf2_hmac::<Sha512>(password, &salt, rounds, &mut kek);
        }
        other => {
            return Err(JweError::Internal(format!("{other} is not a PBES2 algorithm")));
        }
    }
    Ok(kek)
}
