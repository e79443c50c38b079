//! Verified plaintext handling: optional inflation, JSON parsing and
//! extraction of the `messages` field.

use std::io::Read;

use flate2::read::DeflateDecoder;
use serde_json::Value;
use zeroize::Zeroizing;

use crate::error::{JweError, JweResult};

/// Largest plaintext accepted after `zip: "DEF"` inflation.
pub const MAX_INFLATED_LEN: u64 = 16 * 1024 * 1024;

/// Inflate a raw DEFLATE (RFC 1951) plaintext, refusing output larger than
/// [`MAX_INFLATED_LEN`].
pub fn inflate(compressed: &[u8]) -> JweResult<Zeroizing<Vec<u8>>> {
    let mut inflated = Zeroizing::new(Vec::new());
    DeflateDecoder::new(compressed)
        .take(MAX_INFLATED_LEN + 1)
        .read_to_end(&mut inflated)
        .map_err(|e| JweError::PayloadParse(format!("invalid DEFLATE data: {e}")))?;
    if inflated.len() as u64 > MAX_INFLATED_LEN {
        return Err(JweError::PayloadParse(format!(
            "inflated payload exceeds {MAX_INFLATED_LEN} bytes"
        )));
    }
    Ok(inflated)
}

/// Parse verified plaintext as UTF-8 JSON.
pub fn parse(plaintext: &[u8]) -> JweResult<Value> {
    let text = std::str::from_utf8(plaintext)
        .map_err(|e| JweError::PayloadParse(format!("plaintext is not UTF-8: {e}")))?;
    serde_json::from_str(text).map_err(|e| JweError::PayloadParse(e.to_string()))
}

/// JavaScript-style truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Pick what is returned as `decryptedMessages`: a truthy `messages` member,
/// else the payload itself when truthy, else an empty list.
pub fn extract_messages(payload: Value) -> Value {
    if let Value::Object(mut map) = payload {
        return match map.remove("messages") {
            Some(messages) if is_truthy(&messages) => messages,
            Some(messages) => {
                map.insert("messages".to_string(), messages);
                Value::Object(map)
            }
            None => Value::Object(map),
        };
    }
    if is_truthy(&payload) {
        payload
    } else {
        Value::Array(Vec::new())
    }
}
