//! `/decrypt` endpoint tests: success body, error mapping and body limits.

mod http;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use jwe_decrypt_service::app::build_app;
use jwe_decrypt_service::error::ErrorResponse;
use jwe_decrypt_service::routes::decrypt::DecryptResponse;
use jwe_decrypt_service::test_support::{self, fixtures};
use serde_json::{Value, json};

async fn post(body: &Value) -> (StatusCode, Value) {
    let state = http::test_state();
    let app = test::init_service(build_app(&state)).await;
    let resp = test::call_service(&app, http::decrypt_request(body).to_request()).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

fn error_of(body: Value) -> ErrorResponse {
    serde_json::from_value(body).unwrap()
}

// ============================================================================
// Success
// ============================================================================

/// The RSA-OAEP-256 + A256GCM scenario returns the messages field.
#[actix_rt::test]
async fn decrypt_returns_messages() {
    let (status, body) = post(&http::decrypt_body(
        fixtures::RSA_OAEP_256_A256GCM_JWE,
        fixtures::RSA_JWK,
    ))
    .await;
    assert_eq!(status, StatusCode::OK);

    let body: DecryptResponse = serde_json::from_value(body).unwrap();
    assert_eq!(
        body,
        DecryptResponse {
            decrypted_messages: json!(["hello"]),
            success: true,
        }
    );
}

/// JSON keys are camelCase on the wire.
#[actix_rt::test]
async fn decrypt_response_shape() {
    let (status, body) = post(&http::decrypt_body(
        fixtures::ECDH_ES_A256KW_P384_A256CBC_HS512_JWE,
        fixtures::EC_P384_JWK,
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "decryptedMessages": {"status": "delivered", "count": 2},
            "success": true,
        })
    );
}

/// Array payloads are returned as-is.
#[actix_rt::test]
async fn decrypt_returns_array_payload() {
    let (status, body) = post(&http::decrypt_body(
        fixtures::RSA_OAEP_A128CBC_HS256_JWE,
        fixtures::RSA_JWK,
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decryptedMessages"], json!(["a", "b"]));
}

/// Compressed payloads are inflated before extraction.
#[actix_rt::test]
async fn decrypt_inflates_zip_payload() {
    let cek = [1u8; 32];
    let jwe = test_support::encrypt_dir(
        &cek,
        json!({"enc": "A256GCM", "zip": "DEF"}),
        &test_support::deflate(br#"{"messages":[{"id":1}]}"#),
    );
    let (status, body) = post(&json!({"jwe": jwe, "privateKeyJwk": test_support::oct_jwk(&cek)})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decryptedMessages"], json!([{"id": 1}]));
}

// ============================================================================
// Request Validation
// ============================================================================

#[actix_rt::test]
async fn missing_jwe_is_bad_request() {
    let (status, body) = post(&json!({"privateKeyJwk": {"kty": "oct", "k": "AA"}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "JWE ausente na requisição"}));
}

#[actix_rt::test]
async fn missing_jwk_is_bad_request() {
    let (status, body) = post(&json!({"jwe": fixtures::RSA_OAEP_256_A256GCM_JWE})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Chave privada JWK ausente na requisição"}));
}

#[actix_rt::test]
async fn malformed_jwe_never_reaches_key_import() {
    for jwe in ["abc", "a.b.c.d", "a.b.c.d.e.f", "a.b.c!.d.e", "..iv.ct.tag"] {
        // The JWK is garbage too: the format check must answer first.
        let (status, body) = post(&json!({"jwe": jwe, "privateKeyJwk": {"kty": "nope"}})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{jwe}");
        assert_eq!(body, json!({"error": "Formato JWE inválido"}), "{jwe}");
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

#[actix_rt::test]
async fn invalid_key_has_details() {
    let (status, body) = post(&json!({
        "jwe": fixtures::ECDH_ES_P256_A256GCM_JWE,
        "privateKeyJwk": {"kty": "EC", "crv": "P-256", "x": "AA", "y": "AA"},
    }))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = error_of(body);
    assert_eq!(error.error, "Chave JWK inválida");
    assert!(error.details.is_some());
}

#[actix_rt::test]
async fn unsupported_algorithm_is_bad_request() {
    let jwe = test_support::replace_header(
        fixtures::RSA_OAEP_256_A256GCM_JWE,
        &json!({"alg": "RSA1_5", "enc": "A256GCM"}),
    );
    let (status, body) = post(&http::decrypt_body(&jwe, fixtures::RSA_JWK)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(body).error, "Algoritmo JWE não suportado");
}

/// Every cryptographic failure renders the same body.
#[actix_rt::test]
async fn decryption_failures_are_indistinguishable() {
    let mut other = serde_json::from_str::<Value>(fixtures::RSA_OTHER_JWK).unwrap();
    other.as_object_mut().unwrap().remove("kid");
    let jwk = serde_json::from_str::<Value>(fixtures::RSA_JWK).unwrap();

    let requests = [
        json!({"jwe": fixtures::RSA_OAEP_256_A256GCM_JWE, "privateKeyJwk": other}),
        json!({"jwe": test_support::tamper(fixtures::RSA_OAEP_256_A256GCM_JWE, 1), "privateKeyJwk": jwk}),
        json!({"jwe": test_support::tamper(fixtures::RSA_OAEP_256_A256GCM_JWE, 2), "privateKeyJwk": jwk}),
        json!({"jwe": test_support::tamper(fixtures::RSA_OAEP_256_A256GCM_JWE, 3), "privateKeyJwk": jwk}),
        json!({"jwe": test_support::tamper(fixtures::RSA_OAEP_256_A256GCM_JWE, 4), "privateKeyJwk": jwk}),
    ];

    let mut bodies = Vec::new();
    for request in &requests {
        let (status, body) = post(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        bodies.push(body);
    }
    assert_eq!(
        bodies[0],
        json!({
            "error": "Falha na descriptografia: possível incompatibilidade de chave ou JWE corrompido",
            "details": "Decryption failed",
        })
    );
    assert!(bodies.iter().all(|b| *b == bodies[0]));
}

#[actix_rt::test]
async fn kid_mismatch_has_its_own_message() {
    let (status, body) = post(&http::decrypt_body(
        fixtures::RSA_OAEP_256_A256GCM_JWE,
        fixtures::RSA_OTHER_JWK,
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_of(body).error,
        "Falha na descriptografia: possível incompatibilidade de ID de chave no cabeçalho JWE"
    );
}

#[actix_rt::test]
async fn non_json_payload_is_server_error() {
    let (status, body) = post(&http::decrypt_body(
        fixtures::RSA_OAEP_256_NOT_JSON_JWE,
        fixtures::RSA_JWK,
    ))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = error_of(body);
    assert_eq!(error.error, "Falha ao parsear payload descriptografado");
    assert!(error.details.is_some());
}

/// No key material leaks into error bodies.
#[actix_rt::test]
async fn error_bodies_do_not_echo_key_material() {
    let jwk: Value = serde_json::from_str(fixtures::RSA_JWK).unwrap();
    let d = jwk["d"].as_str().unwrap().to_string();
    let mut broken = jwk.clone();
    broken["p"] = json!("AQAB");

    let (status, body) = post(&json!({
        "jwe": fixtures::RSA_OAEP_256_A256GCM_JWE,
        "privateKeyJwk": broken,
    }))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.to_string().contains(&d));
}

// ============================================================================
// Body Handling
// ============================================================================

#[actix_rt::test]
async fn invalid_json_body_is_bad_request() {
    let state = http::test_state();
    let app = test::init_service(build_app(&state)).await;

    let req = TestRequest::post()
        .uri("/decrypt")
        .peer_addr(http::peer())
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"jwe\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(error.error, "Corpo da requisição inválido");
}

#[actix_rt::test]
async fn oversized_body_is_rejected() {
    let state = http::TestAppBuilder::new()
        .with_var("BODY_LIMIT_KB", "1")
        .build();
    let app = test::init_service(build_app(&state)).await;

    let body = json!({"jwe": "a".repeat(4096), "privateKeyJwk": {}});
    let resp = test::call_service(&app, http::decrypt_request(&body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let error: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(error.error, "Corpo da requisição excede o limite");
}
