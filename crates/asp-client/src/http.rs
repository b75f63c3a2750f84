//! Shared response handling.
//!
//! Every endpoint funnels its response through [`check_response`] so status
//! mapping lives in one place.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error")]
    message: Option<String>,
}

/// Return the response unchanged on 2xx.
///
/// - **401** → [`ClientError::Unauthorized`]
/// - **other non-2xx** → [`ClientError::Api`] with the body's `message`,
///   falling back to the raw body and then the status reason.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = error_message(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());

    tracing::debug!(status = status.as_u16(), %message, "backend returned error");
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized { message });
    }
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(m) }) if !m.is_empty() => Some(m),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

/// Extract `T` from either `{ "<field>": T, ... }` or a bare `T`.
///
/// The backend wraps single entities inconsistently across endpoints.
pub fn unwrap_entity<T: DeserializeOwned>(
    mut value: serde_json::Value,
    field: &str,
) -> Result<T, ClientError> {
    let inner = match value.get_mut(field) {
        Some(inner) if inner.is_object() => inner.take(),
        _ => value,
    };
    serde_json::from_value(inner).map_err(|e| ClientError::Parse(format!("{field}: {e}")))
}

#[cfg(test)]
mod tests {
    use asp_core::Question;

    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = mock_response(200, "{}");
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn unauthorized_is_typed() {
        let resp = mock_response(401, r#"{"message":"Token is not valid"}"#);
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized { ref message } if message == "Token is not valid"));
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn api_error_uses_message_field() {
        let resp = mock_response(400, r#"{"message":"Invalid credentials"}"#);
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 400, ref message } if message == "Invalid credentials"));
    }

    #[tokio::test]
    async fn api_error_falls_back_to_raw_body() {
        let resp = mock_response(502, "Bad gateway from proxy");
        let err = check_response(resp).await.unwrap_err();
        assert_eq!(err.to_string(), "API error (502): Bad gateway from proxy");
    }

    #[tokio::test]
    async fn api_error_with_empty_body_uses_reason() {
        let resp = mock_response(404, "");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, ref message } if message == "Not Found"));
    }

    #[test]
    fn unwrap_entity_accepts_wrapped_and_bare() {
        let wrapped = serde_json::json!({"question": {"_id": "q1", "title": "Limits?"}});
        let bare = serde_json::json!({"_id": "q1", "title": "Limits?"});

        let a: Question = unwrap_entity(wrapped, "question").unwrap();
        let b: Question = unwrap_entity(bare, "question").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unwrap_entity_reports_field_on_failure() {
        let err = unwrap_entity::<Question>(serde_json::json!({"question": {"title": 3}}), "question")
            .unwrap_err();
        assert!(err.to_string().starts_with("parse error: question:"));
    }
}
