//! JWK private key import (RFC 7517, RFC 7518 §6).
//!
//! A [`Jwk`] is built fresh for each request from the caller's
//! `privateKeyJwk` and dropped with it. Secret fields are wiped on drop.

use std::fmt;

use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey};
use serde::Deserialize;
use serde_json::Value;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{JweError, JweResult};
use crate::jwe::algorithms::KeyManagementAlgorithm;
use crate::jwe::base64url;
use crate::jwe::header::ValidatedHeader;

const MIN_RSA_BITS: usize = 2048;

/// NIST curves accepted for ECDH-ES.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcCurve {
    P256,
    P384,
    P521,
}

impl EcCurve {
    pub fn from_crv(crv: &str) -> Option<Self> {
        match crv {
            "P-256" => Some(Self::P256),
            "P-384" => Some(Self::P384),
            "P-521" => Some(Self::P521),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    /// Byte length of a field element (and of `x`, `y`, `d`).
    pub fn field_len(self) -> usize {
        match self {
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }

    /// Uncompressed SEC1 encoding `0x04 || x || y`, or `None` when either
    /// coordinate has the wrong length.
    pub fn sec1_point(self, x: &[u8], y: &[u8]) -> Option<Vec<u8>> {
        let len = self.field_len();
        if x.len() != len || y.len() != len {
            return None;
        }
        let mut point = Vec::with_capacity(1 + 2 * len);
        point.push(0x04);
        point.extend_from_slice(x);
        point.extend_from_slice(y);
        Some(point)
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// EC private key, one variant per curve.
#[derive(Clone)]
pub enum EcPrivateKey {
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

impl EcPrivateKey {
    pub fn curve(&self) -> EcCurve {
        match self {
            Self::P256(_) => EcCurve::P256,
            Self::P384(_) => EcCurve::P384,
            Self::P521(_) => EcCurve::P521,
        }
    }
}

impl fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EcPrivateKey").field(&self.curve()).finish()
    }
}

/// Imported key material.
#[derive(Clone)]
pub enum KeyMaterial {
    Rsa(Box<RsaPrivateKey>),
    Ec(EcPrivateKey),
    Oct(Zeroizing<Vec<u8>>),
}

impl KeyMaterial {
    pub fn kty(&self) -> &'static str {
        match self {
            Self::Rsa(_) => "RSA",
            Self::Ec(_) => "EC",
            Self::Oct(_) => "oct",
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rsa(key) => write!(f, "Rsa({} bits)", key.n().bits()),
            Self::Ec(key) => write!(f, "Ec({})", key.curve()),
            Self::Oct(bytes) => write!(f, "Oct({} bytes)", bytes.len()),
        }
    }
}

/// Wire form of a private JWK. Every member is optional here so that a
/// missing field surfaces as `InvalidKey` naming the field.
#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
struct RawJwk {
    kty: Option<String>,
    kid: Option<String>,
    #[serde(rename = "use")]
    key_use: Option<String>,
    alg: Option<String>,
    crv: Option<String>,
    x: Option<String>,
    y: Option<String>,
    d: Option<String>,
    n: Option<String>,
    e: Option<String>,
    p: Option<String>,
    q: Option<String>,
    dp: Option<String>,
    dq: Option<String>,
    qi: Option<String>,
    k: Option<String>,
}

/// A private JWK ready for decryption.
#[derive(Debug, Clone)]
pub struct Jwk {
    pub kid: Option<String>,
    pub key_use: Option<String>,
    pub alg: Option<String>,
    pub material: KeyMaterial,
}

impl Jwk {
    /// Import a private JWK object.
    pub fn import(value: &Value) -> JweResult<Self> {
        if !value.is_object() {
            return Err(JweError::invalid_key("JWK must be a JSON object"));
        }
        let raw = RawJwk::deserialize(value)
            .map_err(|e| JweError::invalid_key(format!("malformed JWK member: {e}")))?;

        let material = match raw.kty.as_deref() {
            Some("RSA") => KeyMaterial::Rsa(Box::new(import_rsa(&raw)?)),
            Some("EC") => KeyMaterial::Ec(import_ec(&raw)?),
            Some("oct") => KeyMaterial::Oct(required(&raw.k, "k")?),
            Some(other) => {
                return Err(JweError::invalid_key(format!("unsupported kty '{other}'")));
            }
            None => return Err(JweError::invalid_key("missing `kty`")),
        };

        Ok(Self {
            kid: raw.kid.clone(),
            key_use: raw.key_use.clone(),
            alg: raw.alg.clone(),
            material,
        })
    }

    /// Check that this key may serve the JWE described by `header`.
    ///
    /// Only public metadata is compared: `kid`, `use`, `alg`, key type and
    /// key size or curve.
    pub fn check_usable_for(&self, header: &ValidatedHeader) -> JweResult<()> {
        if let (Some(wanted), Some(have)) = (header.kid.as_deref(), self.kid.as_deref())
            && wanted != have
        {
            return Err(JweError::key_mismatch(format!(
                "JWE kid '{wanted}' does not match JWK kid '{have}'"
            )));
        }
        if let Some(key_use) = self.key_use.as_deref()
            && key_use != "enc"
        {
            return Err(JweError::key_mismatch(format!(
                "JWK use '{key_use}' is not 'enc'"
            )));
        }
        if let Some(alg) = self.alg.as_deref()
            && alg != header.alg.as_str()
        {
            return Err(JweError::key_mismatch(format!(
                "JWK alg '{alg}' does not match JWE alg '{}'",
                header.alg
            )));
        }

        use KeyManagementAlgorithm as Alg;
        let fits = match (header.alg, &self.material) {
            (Alg::Rsa1_5 | Alg::RsaOaep | Alg::RsaOaep256, KeyMaterial::Rsa(_)) => true,
            (
                Alg::EcdhEs | Alg::EcdhEsA128Kw | Alg::EcdhEsA192Kw | Alg::EcdhEsA256Kw,
                KeyMaterial::Ec(_),
            ) => true,
            (
                Alg::Pbes2Hs256A128Kw | Alg::Pbes2Hs384A192Kw | Alg::Pbes2Hs512A256Kw,
                KeyMaterial::Oct(_),
            ) => true,
            (Alg::Dir, KeyMaterial::Oct(key)) => key.len() == header.enc.key_len(),
            (
                Alg::A128Kw
                | Alg::A192Kw
                | Alg::A256Kw
                | Alg::A128GcmKw
                | Alg::A192GcmKw
                | Alg::A256GcmKw,
                KeyMaterial::Oct(key),
            ) => Some(key.len()) == header.alg.wrapping_key_len(),
            _ => false,
        };
        if !fits {
            return Err(JweError::key_mismatch(format!(
                "{:?} key cannot be used with alg '{}' and enc '{}'",
                self.material, header.alg, header.enc
            )));
        }
        Ok(())
    }
}

fn required(field: &Option<String>, name: &str) -> JweResult<Zeroizing<Vec<u8>>> {
    let encoded = field
        .as_deref()
        .ok_or_else(|| JweError::invalid_key(format!("missing `{name}`")))?;
    optional(encoded, name)
}

fn optional(encoded: &str, name: &str) -> JweResult<Zeroizing<Vec<u8>>> {
    base64url::decode(encoded)
        .map(Zeroizing::new)
        .map_err(|_| JweError::invalid_key(format!("`{name}` is not valid base64url")))
}

fn biguint(field: &Option<String>, name: &str) -> JweResult<BigUint> {
    Ok(BigUint::from_bytes_be(&required(field, name)?))
}

fn import_rsa(raw: &RawJwk) -> JweResult<RsaPrivateKey> {
    let n = biguint(&raw.n, "n")?;
    let e = biguint(&raw.e, "e")?;
    let d = biguint(&raw.d, "d")?;

    let primes = match (&raw.p, &raw.q) {
        (Some(_), Some(_)) => vec![biguint(&raw.p, "p")?, biguint(&raw.q, "q")?],
        (None, None) => Vec::new(),
        _ => return Err(JweError::invalid_key("`p` and `q` must be given together")),
    };

    if n.bits() < MIN_RSA_BITS {
        return Err(JweError::invalid_key(format!(
            "RSA modulus must be at least {MIN_RSA_BITS} bits"
        )));
    }

    let key = RsaPrivateKey::from_components(n, e, d, primes)
        .map_err(|e| JweError::invalid_key(format!("inconsistent RSA parameters: {e}")))?;
    key.validate()
        .map_err(|e| JweError::invalid_key(format!("inconsistent RSA parameters: {e}")))?;

    let crt = [("dp", &raw.dp, key.dp().cloned()), ("dq", &raw.dq, key.dq().cloned())];
    for (name, field, expected) in crt {
        if field.is_some() && expected.as_ref() != Some(&biguint(field, name)?) {
            return Err(JweError::invalid_key(format!(
                "`{name}` is inconsistent with the key"
            )));
        }
    }
    if raw.qi.is_some() && key.crt_coefficient() != Some(biguint(&raw.qi, "qi")?) {
        return Err(JweError::invalid_key("`qi` is inconsistent with the key"));
    }

    Ok(key)
}

/// Per-curve private key import: `d` must be a valid scalar whose public
/// point equals the supplied `x`/`y`.
macro_rules! impl_ec_import {
    ($fn_name:ident, $curve:ident) => {
        fn $fn_name(point: &[u8], d: &[u8]) -> JweResult<$curve::SecretKey> {
            let secret = $curve::SecretKey::from_slice(d)
                .map_err(|_| JweError::invalid_key("`d` is not a valid private scalar"))?;
            let public = $curve::PublicKey::from_sec1_bytes(point)
                .map_err(|_| JweError::invalid_key("`x`/`y` is not a point on the curve"))?;
            if secret.public_key() != public {
                return Err(JweError::invalid_key(
                    "`x`/`y` does not match the private scalar",
                ));
            }
            Ok(secret)
        }
    };
}

impl_ec_import!(import_p256, p256);
impl_ec_import!(import_p384, p384);
impl_ec_import!(import_p521, p521);

fn import_ec(raw: &RawJwk) -> JweResult<EcPrivateKey> {
    let crv = raw
        .crv
        .as_deref()
        .ok_or_else(|| JweError::invalid_key("missing `crv`"))?;
    let curve = EcCurve::from_crv(crv)
        .ok_or_else(|| JweError::invalid_key(format!("unsupported curve '{crv}'")))?;

    let x = required(&raw.x, "x")?;
    let y = required(&raw.y, "y")?;
    let d = required(&raw.d, "d")?;
    if d.len() != curve.field_len() {
        return Err(JweError::invalid_key(format!(
            "`d` must be {} bytes for {curve}",
            curve.field_len()
        )));
    }
    let point = curve.sec1_point(&x, &y).ok_or_else(|| {
        JweError::invalid_key(format!(
            "`x` and `y` must be {} bytes for {curve}",
            curve.field_len()
        ))
    })?;

    Ok(match curve {
        EcCurve::P256 => EcPrivateKey::P256(import_p256(&point, &d)?),
        EcCurve::P384 => EcPrivateKey::P384(import_p384(&point, &d)?),
        EcCurve::P521 => EcPrivateKey::P521(import_p521(&point, &d)?),
    })
}
