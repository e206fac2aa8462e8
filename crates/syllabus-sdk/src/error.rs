//! Error types for the Syllabus SDK.

use syllabus_domain::ApiError;
use thiserror::Error;

/// Structured error codes the server may attach to a duplicate rejection
const DUPLICATE_CODES: &[&str] = &["duplicate", "already_exists", "conflict"];

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Connection error (network, DNS, timeout, etc.)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    HttpError {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error body
        message: String,
        /// Structured error code, when the body carried one
        code: Option<String>,
    },

    /// The response body could not be decoded
    #[error("Invalid response body: {0}")]
    DecodeError(String),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl SdkError {
    /// True when the server flagged the request as a duplicate via status or code
    pub fn is_duplicate(&self) -> bool {
        match self {
            SdkError::HttpError { status, code, .. } => {
                *status == 409
                    || code
                        .as_deref()
                        .map(|c| DUPLICATE_CODES.contains(&c.to_ascii_lowercase().as_str()))
                        .unwrap_or(false)
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SdkError::DecodeError(e.to_string())
        } else if e.is_builder() {
            SdkError::ConfigError(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) => SdkError::HttpError {
                    status: status.as_u16(),
                    message: e.to_string(),
                    code: None,
                },
                None => SdkError::ConnectionError(e.to_string()),
            }
        } else {
            // connect, timeout, request and body errors: no usable server answer
            SdkError::ConnectionError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::DecodeError(format!("JSON parsing error: {}", e))
    }
}

impl From<SdkError> for ApiError {
    fn from(e: SdkError) -> Self {
        if e.is_duplicate() {
            let message = match e {
                SdkError::HttpError { message, .. } => message,
                other => other.to_string(),
            };
            return ApiError::Duplicate(message);
        }

        match e {
            SdkError::ConnectionError(msg) => ApiError::Network(msg),
            SdkError::HttpError {
                status: 404,
                message,
                ..
            } => ApiError::NotFound(message),
            SdkError::HttpError {
                status: 400 | 422,
                message,
                ..
            } => ApiError::Validation(message),
            SdkError::HttpError { message, .. } => ApiError::Remote(message),
            other @ (SdkError::DecodeError(_) | SdkError::ConfigError(_)) => {
                ApiError::Remote(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, message: &str, code: Option<&str>) -> SdkError {
        SdkError::HttpError {
            status,
            message: message.to_string(),
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn test_conflict_status_is_duplicate() {
        let err: ApiError = http(409, "exists", None).into();
        assert_eq!(err, ApiError::Duplicate("exists".to_string()));
    }

    #[test]
    fn test_duplicate_code_wins_over_status() {
        let err: ApiError = http(400, "bad", Some("ALREADY_EXISTS")).into();
        assert_eq!(err, ApiError::Duplicate("bad".to_string()));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(http(404, "gone", None)),
            ApiError::NotFound("gone".to_string())
        );
        assert_eq!(
            ApiError::from(http(422, "bad notes", None)),
            ApiError::Validation("bad notes".to_string())
        );
        assert_eq!(
            ApiError::from(http(500, "boom", None)),
            ApiError::Remote("boom".to_string())
        );
    }

    #[test]
    fn test_connection_is_network() {
        let err: ApiError = SdkError::ConnectionError("refused".into()).into();
        assert_eq!(err, ApiError::Network("refused".to_string()));
    }

    #[test]
    fn test_decode_is_remote() {
        let err: ApiError = SdkError::DecodeError("eof".into()).into();
        assert!(matches!(err, ApiError::Remote(m) if m.contains("eof")));
    }
}
