//! Shared wire types and error taxonomy for backend calls

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when calling the backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response received (DNS, connect, timeout, body transfer)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server explicitly rejected the credential (401/403)
    #[error("authorization rejected: {0}")]
    Unauthorized(String),

    /// Any other non-success response
    #[error("request rejected (HTTP {status}): {message}")]
    Rejected {
        /// Status code the server answered with
        status: StatusCode,
        /// Server-provided message, or the raw body if none
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Parse(String),
}

impl ApiError {
    /// True only for an explicit credential rejection by the server
    ///
    /// Transport failures and other server errors are not authorization
    /// rejections; callers distinguishing the two must use this, not a
    /// blanket error match.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// Response envelope used by the account endpoints
///
/// The backend wraps login/register results as
/// `{ "success": bool, "message": string, "data": ... }`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ApiEnvelope<T> {
    /// Whether the server reports the operation as successful
    pub success: bool,
    /// Human-readable outcome description
    #[serde(default)]
    pub message: Option<String>,
    /// Payload, present on success
    #[serde(default)]
    pub data: Option<T>,
}

/// Extracts the server's failure message from a non-success response body
///
/// Tries the response envelope first, then falls back to the raw body text.
async fn failure_message(response: Response) -> String {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body) {
        Ok(envelope) => envelope.message.unwrap_or(body),
        Err(_) => body,
    }
}

/// Triage for a response's status code
///
/// 401/403 become [`ApiError::Unauthorized`], other non-success statuses
/// become [`ApiError::Rejected`]; successful responses pass through.
pub(crate) async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized(failure_message(response).await));
    }
    if !status.is_success() {
        return Err(ApiError::Rejected {
            status,
            message: failure_message(response).await,
        });
    }
    Ok(response)
}

/// Reads a bare JSON body from a successful response
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Reads an enveloped JSON body and unwraps its payload
pub(crate) async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let envelope: ApiEnvelope<T> = read_json(response).await?;
    envelope
        .data
        .ok_or_else(|| ApiError::Parse("response envelope carried no data".to_string()))
}

/// Consumes a response where only the status matters
pub(crate) async fn read_empty(response: Response) -> Result<(), ApiError> {
    check_status(response).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_auth_rejection() {
        assert!(ApiError::Unauthorized("expired".into()).is_auth_rejection());
        assert!(!ApiError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".into(),
        }
        .is_auth_rejection());
        assert!(!ApiError::Parse("bad body".into()).is_auth_rejection());
    }

    #[test]
    fn test_envelope_deserializes_without_optional_fields() {
        let envelope: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.message.is_none());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_envelope_deserializes_payload() {
        let envelope: ApiEnvelope<Vec<i64>> =
            serde_json::from_str(r#"{"success": true, "message": "ok", "data": [1, 2]}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("ok"));
        assert_eq!(envelope.data, Some(vec![1, 2]));
    }
}
