//! Shared HTTP response helpers.
//!
//! Status checks (429 with `Retry-After`, non-success → [`RouterError::Api`])
//! and body decoding, where a JSON `error` field is an API failure even on a
//! 200 response.

use serde::de::DeserializeOwned;

use crate::error::RouterError;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RouterError> {
    if resp.status() == 429 {
        return Err(RouterError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(RouterError::Api {
            status,
            message: error_message(&body).unwrap_or(body),
        });
    }
    Ok(resp)
}

/// Decode a successful body, surfacing an embedded `error` field.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, RouterError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| RouterError::Parse(format!("invalid JSON: {e}")))?;
    if let Some(message) = value.get("error").and_then(error_text) {
        return Err(RouterError::Api { status, message });
    }
    serde_json::from_value(value).map_err(|e| RouterError::Parse(e.to_string()))
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// `error` from a JSON error body, if the body is one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")
        .and_then(error_text)
}

fn error_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(String::from)
            .or_else(|| Some(value.to_string())),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Echo {
        value: u32,
    }

    #[test]
    fn retry_after_header() {
        assert_eq!(parse_retry_after(&mock_response_with_retry_after(429, "120")), 120);
        assert_eq!(parse_retry_after(&mock_response(429, "")), 60);
        assert_eq!(
            parse_retry_after(&mock_response_with_retry_after(429, "soon")),
            60
        );
    }

    #[tokio::test]
    async fn rate_limited() {
        let err = check_response(mock_response_with_retry_after(429, "30"))
            .await
            .unwrap_err();
        assert!(matches!(err, RouterError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn api_error_uses_error_field() {
        let resp = mock_response(401, r#"{"error":"Missing or invalid authorization header"}"#);
        let err = check_response(resp).await.unwrap_err();
        match err {
            RouterError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Missing or invalid authorization header");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn api_error_keeps_plain_body() {
        let err = check_response(mock_response(502, "Bad Gateway"))
            .await
            .unwrap_err();
        assert!(matches!(err, RouterError::Api { status: 502, ref message } if message == "Bad Gateway"));
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }

    #[test]
    fn decode_ok() {
        let echo: Echo = decode_body(200, r#"{"value": 7}"#).unwrap();
        assert_eq!(echo, Echo { value: 7 });
    }

    #[test]
    fn decode_error_field_in_200() {
        let err = decode_body::<Echo>(200, r#"{"error": "model unavailable"}"#).unwrap_err();
        assert!(matches!(err, RouterError::Api { status: 200, ref message } if message == "model unavailable"));
    }

    #[test]
    fn decode_null_error_is_ignored() {
        let echo: Echo = decode_body(200, r#"{"value": 1, "error": null}"#).unwrap();
        assert_eq!(echo.value, 1);
    }

    #[test]
    fn decode_wrong_shape() {
        let err = decode_body::<Echo>(200, r#"{"other": true}"#).unwrap_err();
        assert!(matches!(err, RouterError::Parse(_)));
        let err = decode_body::<Echo>(200, "not json").unwrap_err();
        assert!(matches!(err, RouterError::Parse(_)));
    }
}
