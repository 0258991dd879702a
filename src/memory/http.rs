//! HTTP client construction and service error classification.

use std::time::Duration;

use reqwest::header::HeaderMap;
use strum::EnumString;

use crate::error::{AquaError, Result};

/// Header carrying the service's error type on failed responses.
pub const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Build the HTTP client used for service calls.
pub fn build_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("aqua/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Error types the memory service reports that map onto dedicated variants.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
enum ServiceErrorType {
    UnrecognizedClientException,
    AccessDeniedException,
    ExpiredTokenException,
    InvalidSignatureException,
    ResourceNotFoundException,
    ValidationException,
    #[strum(default)]
    Other(String),
}

/// Map a failed response onto an [`AquaError`].
///
/// `cursor_supplied` tells whether the request carried a continuation token;
/// only then can a validation failure be blamed on the token.
pub fn status_to_error(
    status: u16,
    headers: &HeaderMap,
    body: &str,
    cursor_supplied: bool,
) -> AquaError {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let raw_type = headers
        .get(ERROR_TYPE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| {
            parsed.as_ref().and_then(|v| {
                v.get("__type")
                    .or_else(|| v.get("code"))
                    .and_then(|t| t.as_str())
                    .map(str::to_string)
            })
        })
        .map(|t| normalize_error_type(&t));
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("Message")))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string());

    let kind = raw_type
        .as_deref()
        .map(|t| t.parse::<ServiceErrorType>().unwrap_or(ServiceErrorType::Other(t.to_string())))
        .unwrap_or(ServiceErrorType::Other(String::new()));

    match kind {
        ServiceErrorType::UnrecognizedClientException
        | ServiceErrorType::AccessDeniedException
        | ServiceErrorType::ExpiredTokenException
        | ServiceErrorType::InvalidSignatureException => AquaError::Authentication(message),
        ServiceErrorType::ResourceNotFoundException => AquaError::NotFound(message),
        ServiceErrorType::ValidationException
            if cursor_supplied && message.to_ascii_lowercase().contains("token") =>
        {
            AquaError::InvalidCursor(message)
        }
        _ => match status {
            401 | 403 => AquaError::Authentication(message),
            404 => AquaError::NotFound(message),
            _ => AquaError::Api {
                status,
                error_type: raw_type,
                message,
            },
        },
    }
}

/// Strip namespace prefixes (`ns#Type`) and trailing metadata (`Type:uri`).
fn normalize_error_type(raw: &str) -> String {
    let without_ns = raw.rsplit('#').next().unwrap_or(raw);
    without_ns
        .split(':')
        .next()
        .unwrap_or(without_ns)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers_with_type(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ERROR_TYPE_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn header_error_type_is_normalized() {
        let headers = headers_with_type("ResourceNotFoundException:http://internal.example/");
        let err = status_to_error(404, &headers, r#"{"message":"Memory not found"}"#, false);
        assert!(matches!(err, AquaError::NotFound(m) if m == "Memory not found"));
    }

    #[test]
    fn body_type_with_namespace_is_recognized() {
        let body = r#"{"__type":"com.amazonaws.agentcore#ExpiredTokenException","message":"expired"}"#;
        let err = status_to_error(400, &HeaderMap::new(), body, false);
        assert!(matches!(err, AquaError::Authentication(m) if m == "expired"));
    }

    #[test]
    fn bare_status_codes_fall_back() {
        assert!(matches!(
            status_to_error(403, &HeaderMap::new(), "denied", false),
            AquaError::Authentication(m) if m == "denied"
        ));
        assert!(matches!(
            status_to_error(404, &HeaderMap::new(), "", false),
            AquaError::NotFound(_)
        ));
        assert!(matches!(
            status_to_error(503, &HeaderMap::new(), "busy", false),
            AquaError::Api { status: 503, error_type: None, .. }
        ));
    }

    #[test]
    fn token_validation_failure_needs_a_supplied_cursor() {
        let headers = headers_with_type("ValidationException");
        let body = r#"{"message":"Invalid nextToken provided"}"#;

        assert!(matches!(
            status_to_error(400, &headers, body, true),
            AquaError::InvalidCursor(_)
        ));
        assert!(matches!(
            status_to_error(400, &headers, body, false),
            AquaError::Api { status: 400, error_type: Some(t), .. } if t == "ValidationException"
        ));
    }

    #[test]
    fn unrelated_validation_failure_stays_an_api_error() {
        let headers = headers_with_type("ValidationException");
        let body = r#"{"message":"maxResults must be at most 100"}"#;
        assert!(matches!(
            status_to_error(400, &headers, body, true),
            AquaError::Api { .. }
        ));
    }
}
