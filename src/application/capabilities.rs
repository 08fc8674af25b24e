//! Sub-resources of the identity platform a client handle can reach.
//!
//! Each capability is a cheap owned value wrapping the handle's transport;
//! permissions follow from whatever credential that transport carries.

use crate::domain::identity::{ApiCall, Session};
use crate::domain::ids::checked_id;
use crate::domain::ports::IdentityTransportHandle;
use crate::error::{RemoteError, Result};
use serde_json::{Value, json};

pub struct Account {
    transport: IdentityTransportHandle,
}

impl Account {
    pub(crate) fn new(transport: IdentityTransportHandle) -> Self {
        Self { transport }
    }

    /// The account the credential belongs to.
    pub async fn get(&self) -> Result<Value> {
        self.transport.call(ApiCall::get("/account")).await
    }

    pub async fn create(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<Value> {
        let mut body = json!({ "userId": user_id, "email": email, "password": password });
        if let Some(name) = name {
            body["name"] = Value::from(name);
        }
        self.transport.call(ApiCall::post("/account", body)).await
    }

    pub async fn create_email_password_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session> {
        let body = json!({ "email": email, "password": password });
        let session = self
            .transport
            .call(ApiCall::post("/account/sessions/email", body))
            .await?;
        serde_json::from_value(session).map_err(|e| {
            RemoteError::UnexpectedResponse(format!("malformed session: {e}")).into()
        })
    }

    /// Deletes a session; `"current"` names the one the credential belongs to.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let path = format!("/account/sessions/{}", checked_id("session", session_id)?);
        self.transport.call(ApiCall::delete(path)).await?;
        Ok(())
    }
}

pub struct Databases {
    transport: IdentityTransportHandle,
}

impl Databases {
    pub(crate) fn new(transport: IdentityTransportHandle) -> Self {
        Self { transport }
    }

    fn documents_path(database_id: &str, collection_id: &str) -> Result<String> {
        Ok(format!(
            "/databases/{}/collections/{}/documents",
            checked_id("database", database_id)?,
            checked_id("collection", collection_id)?
        ))
    }

    pub async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value> {
        let path = Self::documents_path(database_id, collection_id)?;
        let body = json!({ "documentId": document_id, "data": data });
        self.transport.call(ApiCall::post(path, body)).await
    }

    pub async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Value> {
        let path = format!(
            "{}/{}",
            Self::documents_path(database_id, collection_id)?,
            checked_id("document", document_id)?
        );
        self.transport.call(ApiCall::get(path)).await
    }

    pub async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[String],
    ) -> Result<Value> {
        let path = Self::documents_path(database_id, collection_id)?;
        self.transport
            .call(ApiCall::get(path).with_queries(queries))
            .await
    }
}

pub struct Users {
    transport: IdentityTransportHandle,
}

impl Users {
    pub(crate) fn new(transport: IdentityTransportHandle) -> Self {
        Self { transport }
    }

    pub async fn get(&self, user_id: &str) -> Result<Value> {
        let path = format!("/users/{}", checked_id("user", user_id)?);
        self.transport.call(ApiCall::get(path)).await
    }

    pub async fn list(&self, queries: &[String]) -> Result<Value> {
        self.transport
            .call(ApiCall::get("/users").with_queries(queries))
            .await
    }

    pub async fn delete(&self, user_id: &str) -> Result<()> {
        let path = format!("/users/{}", checked_id("user", user_id)?);
        self.transport.call(ApiCall::delete(path)).await?;
        Ok(())
    }
}
