use super::identity::{ApiCall, Credential};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// What the payments network answered to a creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct PostResponse {
    /// The `Location` header, untouched.
    pub location: Option<String>,
    /// Decoded JSON body, `Value::Null` when the response had none.
    pub body: Value,
}

#[async_trait]
pub trait PaymentsTransport: Send + Sync {
    /// Issues a creation request. `path` is relative to the network's base URL
    /// unless it is already absolute.
    async fn post(&self, path: &str, body: Option<Value>) -> Result<PostResponse>;
}

#[async_trait]
pub trait IdentityTransport: Send + Sync {
    async fn call(&self, call: ApiCall) -> Result<Value>;
}

pub type PaymentsTransportBox = Box<dyn PaymentsTransport>;
pub type IdentityTransportHandle = Arc<dyn IdentityTransport>;

/// Builds a fresh identity transport authenticated with the given credential.
pub type IdentityConnector =
    Box<dyn Fn(Credential) -> Result<IdentityTransportHandle> + Send + Sync>;
