//! Strict unpadded base64url (RFC 4648 §5) as used by every JOSE field.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// True when every byte belongs to the base64url alphabet `[A-Za-z0-9_-]`.
///
/// The empty string is accepted; callers decide whether a segment may be empty.
pub fn is_alphabet(input: &str) -> bool {
    input
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Decode unpadded base64url, rejecting padding, foreign characters and
/// non-canonical trailing bits.
pub fn decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Encode bytes as unpadded base64url.
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet() {
        assert!(is_alphabet(""));
        assert!(is_alphabet("abcXYZ019-_"));
        assert!(!is_alphabet("abc="));
        assert!(!is_alphabet("ab+c"));
        assert!(!is_alphabet("ab/c"));
        assert!(!is_alphabet("ab c"));
    }

    #[test]
    fn test_decode_rejects_padding_and_standard_alphabet() {
        assert_eq!(decode("QWxpY2U").unwrap(), b"Alice");
        assert!(decode("QWxpY2U=").is_err());
        assert!(decode("+/8").is_err());
        assert_eq!(decode("-_8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_decode_rejects_non_canonical_trailing_bits() {
        // "QR" and "QQ" share their first six bits; only "QQ" is canonical.
        assert_eq!(decode("QQ").unwrap(), b"A");
        assert!(decode("QR").is_err());
    }

    #[test]
    fn test_decode_rejects_impossible_length() {
        assert!(decode("A").is_err());
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(b"Bob"), "Qm9i");
        assert_eq!(encode([0xfb, 0xff]), "-_8");
        assert_eq!(encode(b""), "");
    }
}
