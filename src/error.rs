//! Error types for the decryption service.
//!
//! `JweError` is the pipeline's typed failure, classified by [`ErrorKind`].
//! `ApiError` is its HTTP projection and the only place where user-facing
//! messages and status codes are rendered.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable classification of every pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    MalformedJwe,
    InvalidKey,
    UnsupportedAlgorithm,
    DecryptionFailed,
    PayloadParseError,
    InternalError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::MalformedJwe => "MalformedJWE",
            Self::InvalidKey => "InvalidKey",
            Self::UnsupportedAlgorithm => "UnsupportedAlgorithm",
            Self::DecryptionFailed => "DecryptionFailed",
            Self::PayloadParseError => "PayloadParseError",
            Self::InternalError => "InternalError",
        };
        f.write_str(name)
    }
}

/// Failure of one decryption request.
///
/// `DecryptionFailed` deliberately carries no detail: unwrap, tag, MAC and
/// padding failures are indistinguishable to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JweError {
    #[error("Malformed JWE: {0}")]
    MalformedJwe(String),

    #[error("Invalid JWK: {0}")]
    InvalidKey(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("No usable key for this JWE: {0}")]
    KeyMismatch(String),

    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Decrypted payload is not valid JSON: {0}")]
    PayloadParse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl JweError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedJwe(message.into())
    }

    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey(message.into())
    }

    pub fn key_mismatch(message: impl Into<String>) -> Self {
        Self::KeyMismatch(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedJwe(_) => ErrorKind::MalformedJwe,
            Self::InvalidKey(_) => ErrorKind::InvalidKey,
            Self::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            Self::KeyMismatch(_) | Self::DecryptionFailed => ErrorKind::DecryptionFailed,
            Self::PayloadParse(_) => ErrorKind::PayloadParseError,
            Self::Internal(_) => ErrorKind::InternalError,
        }
    }
}

/// Result type alias for pipeline operations.
pub type JweResult<T> = Result<T, JweError>;

const MSG_MISSING_JWE: &str = "JWE ausente na requisição";
const MSG_MISSING_JWK: &str = "Chave privada JWK ausente na requisição";
const MSG_INVALID_FORMAT: &str = "Formato JWE inválido";
const MSG_INVALID_KEY: &str = "Chave JWK inválida";
const MSG_UNSUPPORTED_ALGORITHM: &str = "Algoritmo JWE não suportado";
const MSG_DECRYPTION_FAILED: &str =
    "Falha na descriptografia: possível incompatibilidade de chave ou JWE corrompido";
const MSG_KEY_MISMATCH: &str =
    "Falha na descriptografia: possível incompatibilidade de ID de chave no cabeçalho JWE";
const MSG_PAYLOAD_PARSE: &str = "Falha ao parsear payload descriptografado";
const MSG_INTERNAL: &str = "Erro interno do servidor";
const MSG_UNAUTHORIZED: &str = "API key inválida ou ausente";
const MSG_INVALID_BODY: &str = "Corpo da requisição inválido";
const MSG_BODY_TOO_LARGE: &str = "Corpo da requisição excede o limite";

/// HTTP-facing error.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing `jwe` in request")]
    MissingJwe,

    #[error("Missing `privateKeyJwk` in request")]
    MissingJwk,

    /// The `jwe` field does not look like a compact serialization at all.
    #[error("JWE is not a compact serialization")]
    InvalidFormat,

    #[error("Invalid or missing API key")]
    Unauthorized,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Request body exceeds the configured limit")]
    BodyTooLarge,

    #[error(transparent)]
    Jwe(#[from] JweError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn message(&self) -> &'static str {
        match self {
            Self::MissingJwe => MSG_MISSING_JWE,
            Self::MissingJwk => MSG_MISSING_JWK,
            Self::InvalidFormat => MSG_INVALID_FORMAT,
            Self::Unauthorized => MSG_UNAUTHORIZED,
            Self::InvalidBody(_) => MSG_INVALID_BODY,
            Self::BodyTooLarge => MSG_BODY_TOO_LARGE,
            Self::Internal(_) => MSG_INTERNAL,
            Self::Jwe(err) => match err {
                JweError::MalformedJwe(_) => MSG_INVALID_FORMAT,
                JweError::InvalidKey(_) => MSG_INVALID_KEY,
                JweError::UnsupportedAlgorithm(_) => MSG_UNSUPPORTED_ALGORITHM,
                JweError::KeyMismatch(_) => MSG_KEY_MISMATCH,
                JweError::DecryptionFailed => MSG_DECRYPTION_FAILED,
                JweError::PayloadParse(_) => MSG_PAYLOAD_PARSE,
                JweError::Internal(_) => MSG_INTERNAL,
            },
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::MissingJwe
            | Self::MissingJwk
            | Self::InvalidFormat
            | Self::Unauthorized
            | Self::BodyTooLarge => None,
            Self::InvalidBody(details) | Self::Internal(details) => Some(details.clone()),
            Self::Jwe(err) => Some(err.to_string()),
        }
    }

    /// Classification used in logs; transport-level errors have none.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::InvalidFormat => Some(ErrorKind::MalformedJwe),
            Self::Jwe(err) => Some(err.kind()),
            Self::Internal(_) => Some(ErrorKind::InternalError),
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MissingJwe | Self::MissingJwk | Self::InvalidFormat | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Jwe(err) => match err.kind() {
                ErrorKind::MalformedJwe
                | ErrorKind::InvalidKey
                | ErrorKind::UnsupportedAlgorithm
                | ErrorKind::DecryptionFailed => StatusCode::BAD_REQUEST,
                ErrorKind::PayloadParseError | ErrorKind::InternalError => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse {
            error: self.message().to_string(),
            details: self.details(),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        Self::Internal(err.to_string())
    }
}
