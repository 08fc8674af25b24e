//! Adapters behind the domain ports: reqwest clients for both vendor
//! platforms, plus in-memory recording transports for unit tests.

pub mod http_identity;
pub mod http_payments;
#[cfg(test)]
pub(crate) mod recording;

use crate::error::{RemoteError, Result};
use reqwest::Response;
use serde_json::Value;

/// Turns a non-success response into `RemoteError::Rejected`, keeping the
/// vendor's error document.
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let bytes = response.bytes().await.map_err(RemoteError::from)?;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Err(RemoteError::Rejected {
        status: status.as_u16(),
        body,
    }
    .into())
}

/// Decodes a JSON body, treating an empty one as `Value::Null`.
pub(crate) async fn decode_body(response: Response) -> Result<Value> {
    let bytes = response.bytes().await.map_err(RemoteError::from)?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    let body = serde_json::from_slice(&bytes)
        .map_err(|e| RemoteError::UnexpectedResponse(format!("invalid JSON body: {e}")))?;
    Ok(body)
}
