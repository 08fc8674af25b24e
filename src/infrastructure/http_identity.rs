use super::{decode_body, ensure_success};
use crate::config::IdentityConfig;
use crate::domain::identity::{ApiCall, Credential, HttpMethod};
use crate::domain::ports::{IdentityConnector, IdentityTransport, IdentityTransportHandle};
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::{Client, Method};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const SESSION_HEADER: &str = "X-Appwrite-Session";
const KEY_HEADER: &str = "X-Appwrite-Key";

/// `IdentityTransport` for one credential against the identity platform.
pub struct HttpIdentityTransport {
    client: Client,
    endpoint: String,
    project_id: String,
    auth_header: (&'static str, HeaderValue),
}

impl HttpIdentityTransport {
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        credential: Credential,
    ) -> Result<Self> {
        let auth_header = match &credential {
            Credential::Session(token) => (SESSION_HEADER, sensitive_header(token.expose_secret())?),
            Credential::ApiKey(key) => (KEY_HEADER, sensitive_header(key.expose_secret())?),
        };
        let client = Client::builder().build().map_err(|e| {
            GatewayError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            auth_header,
        })
    }
}

fn sensitive_header(value: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value).map_err(|_| {
        GatewayError::AuthenticationError("credential contains invalid characters".to_string())
    })?;
    header.set_sensitive(true);
    Ok(header)
}

/// Connector building one `HttpIdentityTransport` per client construction.
pub fn http_connector(config: &IdentityConfig) -> IdentityConnector {
    let endpoint = config.endpoint.clone();
    let project_id = config.project_id.clone();
    Box::new(move |credential| -> Result<IdentityTransportHandle> {
        let transport =
            HttpIdentityTransport::new(endpoint.clone(), project_id.clone(), credential)?;
        Ok(Arc::new(transport) as IdentityTransportHandle)
    })
}

#[async_trait]
impl IdentityTransport for HttpIdentityTransport {
    #[instrument(skip_all, fields(method = ?call.method, path = %call.path))]
    async fn call(&self, call: ApiCall) -> Result<Value> {
        let method = match call.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        };
        let (auth_name, auth_value) = &self.auth_header;

        let mut request = self
            .client
            .request(method, format!("{}{}", self.endpoint, call.path))
            .header(PROJECT_HEADER, &self.project_id)
            .header(*auth_name, auth_value.clone());
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = ensure_success(request.send().await?).await?;
        let body = decode_body(response).await?;
        debug!("identity platform request succeeded");
        Ok(body)
    }
}
