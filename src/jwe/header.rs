//! Protected header decoding and validation (RFC 7516 §4).
//!
//! Validation runs in a fixed order: JSON shape, presence of `alg`/`enc`,
//! the algorithm allow-list, then the remaining parameters. The allow-list
//! is therefore enforced before anything looks at key material.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{JweError, JweResult};
use crate::jwe::algorithms::{AlgorithmPolicy, ContentEncryptionAlgorithm, KeyManagementAlgorithm};

/// Payload compression declared by the `zip` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Deflate,
}

/// Optional header parameters. Algorithm-specific values stay encoded until
/// the algorithm that owns them interprets them.
#[derive(Debug, Default, Deserialize)]
struct HeaderParams {
    kid: Option<String>,
    epk: Option<Value>,
    apu: Option<String>,
    apv: Option<String>,
    iv: Option<String>,
    tag: Option<String>,
    p2s: Option<String>,
    p2c: Option<u64>,
    zip: Option<String>,
    crit: Option<Value>,
}

/// Header that passed validation, with `alg` and `enc` resolved to their
/// closed enum form.
#[derive(Debug, Clone)]
pub struct ValidatedHeader {
    pub alg: KeyManagementAlgorithm,
    pub enc: ContentEncryptionAlgorithm,
    pub kid: Option<String>,
    pub epk: Option<Value>,
    pub apu: Option<String>,
    pub apv: Option<String>,
    pub iv: Option<String>,
    pub tag: Option<String>,
    pub p2s: Option<String>,
    pub p2c: Option<u64>,
    pub zip: Option<Compression>,
}

impl ValidatedHeader {
    /// Decode and validate raw protected header bytes against `policy`.
    pub fn parse(bytes: &[u8], policy: &AlgorithmPolicy) -> JweResult<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| JweError::malformed(format!("protected header is not JSON: {e}")))?;
        let Value::Object(map) = value else {
            return Err(JweError::malformed("protected header is not a JSON object"));
        };

        let alg_name = required_str(&map, "alg")?;
        let enc_name = required_str(&map, "enc")?;

        let alg = alg_name
            .parse::<KeyManagementAlgorithm>()
            .ok()
            .filter(|alg| policy.permits_alg(*alg))
            .ok_or_else(|| {
                JweError::UnsupportedAlgorithm(format!("alg '{alg_name}' is not allowed"))
            })?;
        let enc = enc_name
            .parse::<ContentEncryptionAlgorithm>()
            .ok()
            .filter(|enc| policy.permits_enc(*enc))
            .ok_or_else(|| {
                JweError::UnsupportedAlgorithm(format!("enc '{enc_name}' is not allowed"))
            })?;

        let params: HeaderParams = serde_json::from_value(Value::Object(map))
            .map_err(|e| JweError::malformed(format!("invalid header parameter: {e}")))?;

        match &params.crit {
            None => {}
            Some(Value::Array(names)) if names.is_empty() => {}
            Some(Value::Array(_)) => {
                return Err(JweError::malformed(
                    "critical header extensions are not supported",
                ));
            }
            Some(_) => return Err(JweError::malformed("crit must be an array")),
        }

        let zip = match params.zip.as_deref() {
            None => None,
            Some("DEF") => Some(Compression::Deflate),
            Some(other) => {
                return Err(JweError::UnsupportedAlgorithm(format!(
                    "zip '{other}' is not supported"
                )));
            }
        };

        Ok(Self {
            alg,
            enc,
            kid: params.kid,
            epk: params.epk,
            apu: params.apu,
            apv: params.apv,
            iv: params.iv,
            tag: params.tag,
            p2s: params.p2s,
            p2c: params.p2c,
            zip,
        })
    }
}

fn required_str<'a>(map: &'a Map<String, Value>, name: &str) -> JweResult<&'a str> {
    match map.get(name) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(JweError::malformed(format!("header `{name}` must be a string"))),
        None => Err(JweError::malformed(format!("header `{name}` is missing"))),
    }
}
