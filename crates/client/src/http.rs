//! Shared HTTP plumbing: client construction and response classification.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{SessionError, SessionResult};

pub(crate) fn build_client(config: &ClientConfig) -> SessionResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("retailinv-admin/", env!("CARGO_PKG_VERSION")))
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| SessionError::ClientSetup(format!("build http client: {e}")))
}

/// Classify a resource response: 2xx passes through, everything else becomes
/// the matching [`SessionError`].
pub(crate) async fn ensure_ok(resp: Response, label: &str) -> SessionResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let messages = error_messages(resp).await;
    tracing::warn!(%status, request = label, "request rejected");

    Err(match status {
        StatusCode::UNAUTHORIZED => SessionError::Unauthenticated,
        StatusCode::FORBIDDEN => SessionError::Forbidden,
        StatusCode::BAD_REQUEST => SessionError::ValidationFailed(messages),
        _ => SessionError::server(status, summary(status, &messages)),
    })
}

/// Decode a 2xx JSON body.
pub(crate) async fn parse_json<T: DeserializeOwned>(resp: Response, label: &str) -> SessionResult<T> {
    resp.json::<T>()
        .await
        .map_err(|e| SessionError::InvalidResponse(format!("{label}: {e}")))
}

/// One-line summary of an error body, falling back to the status reason.
pub(crate) fn summary(status: StatusCode, messages: &[String]) -> String {
    if messages.is_empty() {
        status.canonical_reason().unwrap_or("unexpected status").to_string()
    } else {
        messages.join("; ")
    }
}

/// Extract human-readable messages from an error body.
///
/// The services answer errors in several shapes: `{"error": "..."}`,
/// `{"message": "..."}`, a map of field name to message (bean validation),
/// or plain text.
pub(crate) async fn error_messages(resp: Response) -> Vec<String> {
    match resp.text().await {
        Ok(body) => messages_from_body(&body),
        Err(err) => {
            tracing::debug!("failed to read error body: {err}");
            Vec::new()
        }
    }
}

pub(crate) fn messages_from_body(body: &str) -> Vec<String> {
    let body = body.trim();
    if body.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            for key in ["error", "message"] {
                if let Some(msg) = map.get(key).and_then(Value::as_str) {
                    return vec![msg.to_string()];
                }
            }
            let mut fields: Vec<String> = map
                .iter()
                .filter_map(|(field, v)| v.as_str().map(|msg| format!("{field}: {msg}")))
                .collect();
            fields.sort();
            fields
        }
        Ok(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Ok(Value::String(msg)) => vec![msg],
        Ok(_) => Vec::new(),
        Err(_) => vec![body.to_string()],
    }
}
