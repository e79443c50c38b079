//! End-to-end pipeline tests against independently produced JWEs.
//!
//! Vectors in `fixtures` come from a separate JOSE implementation; the
//! `test_support` encryptor builds the rest from raw primitives.

use jwe_decrypt_service::jwe::payload::extract_messages;
use jwe_decrypt_service::jwe::{AlgorithmPolicy, KeyManagementAlgorithm, decrypt_compact};
use jwe_decrypt_service::test_support::{self, fixtures};
use jwe_decrypt_service::{Decryptor, ErrorKind, JweError};
use serde_json::{Value, json};

fn jwk(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

fn decrypt(jwe: &str, key: &Value) -> Result<Value, JweError> {
    Decryptor::default().decrypt(jwe, key)
}

fn header_of(jwe: &str) -> Value {
    let (header, _) = jwe.split_once('.').unwrap();
    let bytes = jwe_decrypt_service::jwe::base64url::decode(header).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Known Vectors
// ============================================================================

#[test]
fn decrypts_every_key_management_family() {
    let hello = json!({"messages": ["hello"]});
    let cases = [
        (fixtures::RSA_OAEP_256_A256GCM_JWE, fixtures::RSA_JWK, hello.clone()),
        (fixtures::RSA_OAEP_A128CBC_HS256_JWE, fixtures::RSA_JWK, json!(["a", "b"])),
        (fixtures::ECDH_ES_P256_A256GCM_JWE, fixtures::EC_P256_JWK, hello.clone()),
        (
            fixtures::ECDH_ES_A256KW_P384_A256CBC_HS512_JWE,
            fixtures::EC_P384_JWK,
            json!({"status": "delivered", "count": 2}),
        ),
        (fixtures::ECDH_ES_A128KW_P521_A128GCM_JWE, fixtures::EC_P521_JWK, hello.clone()),
        (fixtures::DIR_A192CBC_HS384_JWE, fixtures::OCT_DIR_48_JWK, hello.clone()),
        (fixtures::A256KW_A192GCM_JWE, fixtures::OCT_A256KW_JWK, hello.clone()),
        (fixtures::A128GCMKW_A128GCM_JWE, fixtures::OCT_A128GCMKW_JWK, hello.clone()),
        (
            fixtures::PBES2_HS256_A128KW_A128CBC_HS256_JWE,
            fixtures::OCT_PASSWORD_JWK,
            hello.clone(),
        ),
    ];

    for (jwe, key, expected) in cases {
        let payload = decrypt(jwe, &jwk(key)).unwrap_or_else(|e| panic!("{}: {e}", header_of(jwe)));
        assert_eq!(payload, expected, "{}", header_of(jwe));
    }
}

/// RFC 7516 Appendix A.3: A128KW + A128CBC-HS256.
///
/// The plaintext is "Live long and prosper.", which verifies but is not JSON.
#[test]
fn rfc7516_a3_verifies_then_fails_payload_parse() {
    let key = json!({"kty": "oct", "k": "GawgguFyGrWKav7AX4VKUg"});
    let jwe = "eyJhbGciOiJBMTI4S1ciLCJlbmMiOiJBMTI4Q0JDLUhTMjU2In0.\
               6KB707dM9YTIgHtLvtgWQ8mKwboJW3of9locizkDTHzBC2IlrT1oOQ.\
               AxY8DCtDaGlsbGljb3RoZQ.\
               KDlTtXchhZTGufMYmOYGS4HffxPSUrfmqCHXaI9wOGY.\
               U0m_YmjN04DJvceFICbCVQ";

    let err = decrypt(jwe, &key).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PayloadParseError, "{err}");

    let tampered = test_support::tamper(jwe, 4);
    assert_eq!(decrypt(&tampered, &key).unwrap_err(), JweError::DecryptionFailed);
}

#[test]
fn non_json_plaintext_is_payload_error() {
    let err = decrypt(fixtures::RSA_OAEP_256_NOT_JSON_JWE, &jwk(fixtures::RSA_JWK)).unwrap_err();
    assert!(matches!(err, JweError::PayloadParse(_)));
}

// ============================================================================
// Concrete Scenario: RSA-OAEP-256 + A256GCM
// ============================================================================

#[test]
fn rsa_oaep_256_round_trip_with_matching_key() {
    let jwe = test_support::encrypt_rsa_oaep_256(
        fixtures::RSA_JWK,
        json!({"enc": "A256GCM"}),
        br#"{"messages":["hello"]}"#,
    );
    let payload = decrypt(&jwe, &jwk(fixtures::RSA_JWK)).unwrap();
    assert_eq!(extract_messages(payload), json!(["hello"]));
}

#[test]
fn rsa_oaep_256_with_other_key_fails_decryption() {
    let jwe = test_support::encrypt_rsa_oaep_256(
        fixtures::RSA_JWK,
        json!({"enc": "A256GCM"}),
        br#"{"messages":["hello"]}"#,
    );
    let err = decrypt(&jwe, &jwk(fixtures::RSA_OTHER_JWK)).unwrap_err();
    assert_eq!(err, JweError::DecryptionFailed);
    assert_eq!(err.kind(), ErrorKind::DecryptionFailed);
}

#[test]
fn kid_mismatch_is_reported_as_key_mismatch() {
    // Header kid is rsa-1, JWK kid is rsa-2.
    let err = decrypt(fixtures::RSA_OAEP_256_A256GCM_JWE, &jwk(fixtures::RSA_OTHER_JWK)).unwrap_err();
    assert!(matches!(err, JweError::KeyMismatch(_)), "{err}");
    assert_eq!(err.kind(), ErrorKind::DecryptionFailed);
}

// ============================================================================
// Content Encryption Round Trips
// ============================================================================

#[test]
fn dir_round_trip_for_every_enc() {
    for (enc, key_len) in [
        ("A128GCM", 16),
        ("A192GCM", 24),
        ("A256GCM", 32),
        ("A128CBC-HS256", 32),
        ("A192CBC-HS384", 48),
        ("A256CBC-HS512", 64),
    ] {
        let cek: Vec<u8> = (0..key_len).map(|i| i as u8).collect();
        let jwe = test_support::encrypt_dir(&cek, json!({"enc": enc}), br#"{"messages":[1,2,3]}"#);
        let payload = decrypt(&jwe, &test_support::oct_jwk(&cek)).unwrap_or_else(|e| panic!("{enc}: {e}"));
        assert_eq!(payload, json!({"messages": [1, 2, 3]}), "{enc}");
    }
}

#[test]
fn dir_key_of_wrong_size_is_key_mismatch() {
    let cek = [3u8; 32];
    let jwe = test_support::encrypt_dir(&cek, json!({"enc": "A256GCM"}), b"{}");
    let err = decrypt(&jwe, &test_support::oct_jwk(&[3u8; 16])).unwrap_err();
    assert!(matches!(err, JweError::KeyMismatch(_)), "{err}");
}

// ============================================================================
// Tampering
// ============================================================================

#[test]
fn tampering_any_segment_fails_decryption() {
    let key = jwk(fixtures::RSA_JWK);
    for segment in 1..=4 {
        let tampered = test_support::tamper(fixtures::RSA_OAEP_256_A256GCM_JWE, segment);
        let err = decrypt(&tampered, &key).unwrap_err();
        assert_eq!(err, JweError::DecryptionFailed, "segment {segment}");
    }

    let key = jwk(fixtures::OCT_DIR_48_JWK);
    for segment in 2..=4 {
        let tampered = test_support::tamper(fixtures::DIR_A192CBC_HS384_JWE, segment);
        let err = decrypt(&tampered, &key).unwrap_err();
        assert_eq!(err, JweError::DecryptionFailed, "segment {segment}");
    }
}

#[test]
fn rewritten_header_breaks_aad() {
    let jwe = test_support::replace_header(
        fixtures::RSA_OAEP_256_A256GCM_JWE,
        &json!({"alg": "RSA-OAEP-256", "enc": "A256GCM"}),
    );
    let err = decrypt(&jwe, &jwk(fixtures::RSA_JWK)).unwrap_err();
    assert_eq!(err, JweError::DecryptionFailed);
}

#[test]
fn ephemeral_key_off_curve_fails_decryption() {
    let mut header = header_of(fixtures::ECDH_ES_P256_A256GCM_JWE);
    header["epk"]["y"] = header["epk"]["x"].clone();
    let jwe = test_support::replace_header(fixtures::ECDH_ES_P256_A256GCM_JWE, &header);

    let err = decrypt(&jwe, &jwk(fixtures::EC_P256_JWK)).unwrap_err();
    assert_eq!(err, JweError::DecryptionFailed);
}

#[test]
fn truncated_tag_is_structural() {
    let mut segments: Vec<&str> = fixtures::RSA_OAEP_256_A256GCM_JWE.split('.').collect();
    segments[4] = "AAAA";
    let err = decrypt(&segments.join("."), &jwk(fixtures::RSA_JWK)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedJwe, "{err}");
}

// ============================================================================
// Allow-list
// ============================================================================

#[test]
fn algorithms_outside_allow_list_are_rejected() {
    let key = jwk(fixtures::RSA_JWK);
    for header in [
        json!({"alg": "none", "enc": "A256GCM"}),
        json!({"alg": "RSA1_5", "enc": "A256GCM"}),
        json!({"alg": "RSA-OAEP-256", "enc": "A128CBC"}),
        json!({"alg": "HS256", "enc": "A256GCM"}),
    ] {
        let jwe = test_support::replace_header(fixtures::RSA_OAEP_256_A256GCM_JWE, &header);
        let err = decrypt(&jwe, &key).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm, "{header}");
    }
}

#[test]
fn allow_list_applies_even_when_key_fits() {
    let policy = AlgorithmPolicy::new(
        vec![KeyManagementAlgorithm::RsaOaep],
        AlgorithmPolicy::default().encs().to_vec(),
    );
    let err = decrypt_compact(
        fixtures::RSA_OAEP_256_A256GCM_JWE,
        &jwk(fixtures::RSA_JWK),
        &policy,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);

    let decrypted = decrypt_compact(
        fixtures::RSA_OAEP_A128CBC_HS256_JWE,
        &jwk(fixtures::RSA_JWK),
        &policy,
    )
    .unwrap();
    assert_eq!(decrypted.header.alg, KeyManagementAlgorithm::RsaOaep);
}

#[test]
fn unsupported_algorithm_checked_before_key_import() {
    let jwe = test_support::replace_header(
        fixtures::RSA_OAEP_256_A256GCM_JWE,
        &json!({"alg": "none", "enc": "A256GCM"}),
    );
    let err = decrypt(&jwe, &json!({"kty": "nope"})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);
}

// ============================================================================
// Header Extras
// ============================================================================

#[test]
fn zip_def_payload_is_inflated() {
    let cek = [9u8; 32];
    let compressed = test_support::deflate(br#"{"messages":["zipped","twice"]}"#);
    let jwe = test_support::encrypt_dir(&cek, json!({"enc": "A256GCM", "zip": "DEF"}), &compressed);
    let payload = decrypt(&jwe, &test_support::oct_jwk(&cek)).unwrap();
    assert_eq!(extract_messages(payload), json!(["zipped", "twice"]));
}

#[test]
fn zip_def_with_garbage_is_payload_error() {
    let cek = [9u8; 32];
    let jwe = test_support::encrypt_dir(&cek, json!({"enc": "A256GCM", "zip": "DEF"}), &[0xff; 8]);
    let err = decrypt(&jwe, &test_support::oct_jwk(&cek)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PayloadParseError);
}

#[test]
fn unknown_zip_is_unsupported() {
    let cek = [9u8; 32];
    let jwe = test_support::encrypt_dir(&cek, json!({"enc": "A256GCM", "zip": "GZIP"}), b"{}");
    let err = decrypt(&jwe, &test_support::oct_jwk(&cek)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);
}

#[test]
fn critical_extensions_are_rejected() {
    let cek = [9u8; 32];
    let jwe = test_support::encrypt_dir(
        &cek,
        json!({"enc": "A256GCM", "crit": ["exp"], "exp": 1}),
        b"{}",
    );
    let err = decrypt(&jwe, &test_support::oct_jwk(&cek)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedJwe);
}

#[test]
fn pbes2_iteration_bound_is_enforced() {
    let mut header = header_of(fixtures::PBES2_HS256_A128KW_A128CBC_HS256_JWE);
    header["p2c"] = json!(2_000_000);
    let jwe = test_support::replace_header(fixtures::PBES2_HS256_A128KW_A128CBC_HS256_JWE, &header);
    let err = decrypt(&jwe, &jwk(fixtures::OCT_PASSWORD_JWK)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedJwe, "{err}");
}

// ============================================================================
// Key Import
// ============================================================================

#[test]
fn incomplete_jwks_are_invalid_keys() {
    let mut ec = jwk(fixtures::EC_P256_JWK);
    ec.as_object_mut().unwrap().remove("d");

    let mut rsa = jwk(fixtures::RSA_JWK);
    rsa.as_object_mut().unwrap().remove("d");

    let cases = [
        (fixtures::ECDH_ES_P256_A256GCM_JWE, ec),
        (fixtures::RSA_OAEP_256_A256GCM_JWE, rsa),
        (fixtures::RSA_OAEP_256_A256GCM_JWE, json!({"kty": "OKP", "crv": "X25519"})),
        (fixtures::RSA_OAEP_256_A256GCM_JWE, json!({"n": "AQAB"})),
        (fixtures::RSA_OAEP_256_A256GCM_JWE, json!("not an object")),
        (fixtures::DIR_A192CBC_HS384_JWE, json!({"kty": "oct", "k": "***"})),
    ];
    for (jwe, key) in cases {
        let err = decrypt(jwe, &key).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey, "{key}: {err}");
    }
}

#[test]
fn key_of_wrong_type_is_key_mismatch() {
    let err = decrypt(fixtures::RSA_OAEP_256_A256GCM_JWE, &jwk(fixtures::OCT_A256KW_JWK)).unwrap_err();
    assert!(matches!(err, JweError::KeyMismatch(_)), "{err}");

    // P-384 key for a P-256 ephemeral key.
    let mut key = jwk(fixtures::EC_P384_JWK);
    key.as_object_mut().unwrap().remove("kid");
    let err = decrypt(fixtures::ECDH_ES_P256_A256GCM_JWE, &key).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecryptionFailed, "{err}");
}

#[test]
fn signing_keys_are_not_used_for_decryption() {
    let mut key = jwk(fixtures::RSA_JWK);
    key["use"] = json!("sig");
    let err = decrypt(fixtures::RSA_OAEP_256_A256GCM_JWE, &key).unwrap_err();
    assert!(matches!(err, JweError::KeyMismatch(_)), "{err}");
}

// ============================================================================
// Payload Extraction
// ============================================================================

#[test]
fn decrypted_messages_follow_truthiness_chain() {
    let cek = [5u8; 16];
    let key = test_support::oct_jwk(&cek);
    let cases: [(&[u8], Value); 6] = [
        (br#"{"messages":["m1"],"x":1}"#, json!(["m1"])),
        (br#"["a","b"]"#, json!(["a", "b"])),
        (br#"{"status":"ok"}"#, json!({"status": "ok"})),
        (br#"{"messages":null}"#, json!({"messages": null})),
        (b"null", json!([])),
        (b"0", json!([])),
    ];
    for (plaintext, expected) in cases {
        let jwe = test_support::encrypt_dir(&cek, json!({"enc": "A128GCM"}), plaintext);
        let payload = decrypt(&jwe, &key).unwrap();
        assert_eq!(extract_messages(payload), expected);
    }
}
