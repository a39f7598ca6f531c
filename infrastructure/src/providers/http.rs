//! Shared HTTP plumbing for the provider adapters

use boardroom_application::GatewayError;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build a client that gives up after `timeout_secs`
pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, GatewayError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {e}")))
}

/// Send `request` and decode a successful JSON body as `T`
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    provider: &str,
) -> Result<T, GatewayError> {
    let response = request.send().await.map_err(map_transport_error)?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| format!("Failed to read {provider} error body"));
        return Err(map_http_error(status, &body));
    }

    response.json().await.map_err(|e| {
        GatewayError::MalformedResponse(format!("{provider}: {}", e.without_url()))
    })
}

/// Error text never carries the request URL
pub(crate) fn map_transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(err.without_url().to_string())
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Turn a non-2xx reply into a [`GatewayError::Http`], preferring the
/// provider's own `error.message` over the raw body.
pub(crate) fn map_http_error(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .unwrap_or_else(|| body.trim().to_string());

    GatewayError::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_is_extracted() {
        let body = r#"{"error": {"message": "Invalid API key", "type": "auth"}}"#;
        match map_http_error(StatusCode::UNAUTHORIZED, body) {
            GatewayError::Http { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_error_omits_url() {
        let client = build_client(5).unwrap();
        let request = client.get("http://127.0.0.1:1/v1/models?token=hidden-value");
        let err = send_json::<serde_json::Value>(request, "test")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ConnectionError(_)));
        assert!(!err.to_string().contains("hidden-value"));
        assert!(!err.to_string().contains("127.0.0.1"));
    }

    #[test]
    fn test_unstructured_body_is_kept() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err.to_string(), "HTTP 502: upstream down");
    }
}
