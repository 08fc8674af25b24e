use crate::domain::identity::{ApiCall, Credential, CredentialKind};
use crate::domain::ports::{
    IdentityConnector, IdentityTransport, IdentityTransportHandle, PaymentsTransport, PostResponse,
};
use crate::error::{RemoteError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Reply a recording transport hands out for the next request.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Success with a `Location` header and an empty body.
    Created(String),
    /// Success with a JSON body and no `Location` header.
    Body(Value),
    /// Vendor rejection with the given status and error document.
    Rejected { status: u16, body: Value },
}

impl ScriptedReply {
    fn into_post_response(self) -> Result<PostResponse> {
        match self {
            ScriptedReply::Created(location) => Ok(PostResponse {
                location: Some(location),
                body: Value::Null,
            }),
            ScriptedReply::Body(body) => Ok(PostResponse {
                location: None,
                body,
            }),
            ScriptedReply::Rejected { status, body } => {
                Err(RemoteError::Rejected { status, body }.into())
            }
        }
    }
}

fn unscripted() -> crate::error::GatewayError {
    RemoteError::UnexpectedResponse("no scripted reply left".to_string()).into()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPost {
    pub path: String,
    pub body: Option<Value>,
}

/// An in-memory `PaymentsTransport` that records every request and answers
/// from a script, in order.
///
/// Clones share the same script and history, so a test can keep one handle
/// while the gateway owns another.
#[derive(Default, Clone)]
pub struct RecordingPaymentsTransport {
    requests: Arc<RwLock<Vec<RecordedPost>>>,
    replies: Arc<RwLock<VecDeque<ScriptedReply>>>,
}

impl RecordingPaymentsTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_reply(&self, reply: ScriptedReply) {
        self.replies.write().await.push_back(reply);
    }

    pub async fn requests(&self) -> Vec<RecordedPost> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl PaymentsTransport for RecordingPaymentsTransport {
    async fn post(&self, path: &str, body: Option<Value>) -> Result<PostResponse> {
        self.requests.write().await.push(RecordedPost {
            path: path.to_string(),
            body,
        });
        let reply = self.replies.write().await.pop_front();
        reply.ok_or_else(unscripted)?.into_post_response()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub credential: CredentialKind,
    pub call: ApiCall,
}

/// In-memory stand-in for the identity platform.
///
/// Hands out one transport per connection; all of them share the script,
/// the call history and the connection counter.
#[derive(Default, Clone)]
pub struct RecordingIdentityBackend {
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    replies: Arc<RwLock<VecDeque<ScriptedReply>>>,
    connections: Arc<AtomicUsize>,
}

impl RecordingIdentityBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connector(&self) -> IdentityConnector {
        let backend = self.clone();
        Box::new(move |credential: Credential| -> Result<IdentityTransportHandle> {
            backend.connections.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(RecordingIdentityTransport {
                backend: backend.clone(),
                credential: credential.kind(),
            }) as IdentityTransportHandle)
        })
    }

    /// How many transports have been built so far.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub async fn push_reply(&self, reply: ScriptedReply) {
        self.replies.write().await.push_back(reply);
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }
}

struct RecordingIdentityTransport {
    backend: RecordingIdentityBackend,
    credential: CredentialKind,
}

#[async_trait]
impl IdentityTransport for RecordingIdentityTransport {
    async fn call(&self, call: ApiCall) -> Result<Value> {
        self.backend.calls.write().await.push(RecordedCall {
            credential: self.credential,
            call,
        });
        let reply = self.backend.replies.write().await.pop_front();
        match reply.ok_or_else(unscripted)? {
            ScriptedReply::Created(location) => Ok(Value::String(location)),
            ScriptedReply::Body(body) => Ok(body),
            ScriptedReply::Rejected { status, body } => {
                Err(RemoteError::Rejected { status, body }.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serde_json::json;

    #[tokio::test]
    async fn test_payments_transport_records_and_replays() {
        let transport = RecordingPaymentsTransport::new();
        transport
            .push_reply(ScriptedReply::Created("https://a/customers/1".to_string()))
            .await;
        transport
            .push_reply(ScriptedReply::Rejected {
                status: 400,
                body: json!({ "code": "ValidationError" }),
            })
            .await;

        let first = transport
            .post("customers", Some(json!({ "firstName": "Jane" })))
            .await
            .unwrap();
        assert_eq!(first.location.as_deref(), Some("https://a/customers/1"));

        let second = transport.post("customers", None).await.unwrap_err();
        assert_eq!(second.as_remote().unwrap().status(), Some(400));

        let third = transport.post("customers", None).await.unwrap_err();
        assert!(matches!(
            third.as_remote(),
            Some(RemoteError::UnexpectedResponse(_))
        ));

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].body, Some(json!({ "firstName": "Jane" })));
        assert_eq!(requests[1].body, None);
    }

    #[tokio::test]
    async fn test_identity_backend_counts_connections() {
        let backend = RecordingIdentityBackend::new();
        let connector = backend.connector();
        assert_eq!(backend.connections(), 0);

        let transport =
            connector(Credential::Session(SecretString::from("t".to_string()))).unwrap();
        backend
            .push_reply(ScriptedReply::Body(json!({ "$id": "u" })))
            .await;
        transport.call(ApiCall::get("/account")).await.unwrap();

        assert_eq!(backend.connections(), 1);
        let calls = backend.calls().await;
        assert_eq!(calls[0].credential, CredentialKind::Session);
        assert_eq!(calls[0].call.path, "/account");
    }
}
