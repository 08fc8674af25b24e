use super::{decode_body, ensure_success};
use crate::config::PaymentsConfig;
use crate::domain::ports::{PaymentsTransport, PostResponse};
use crate::error::{GatewayError, RemoteError, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Media type the payments network speaks.
pub const HAL_JSON: &str = "application/vnd.dwolla.v1.hal+json";

/// Tokens are refreshed this long before the network says they expire.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    access_token: SecretString,
    expires_at: Instant,
}

/// `PaymentsTransport` talking to the payments network over HTTPS.
///
/// Authenticates with the OAuth client-credentials grant and reuses the access
/// token until shortly before it expires. The transport is safe to share
/// across tasks; the token cache is its only mutable state.
pub struct HttpPaymentsTransport {
    client: Client,
    base_url: String,
    key: SecretString,
    secret: SecretString,
    token: RwLock<Option<CachedToken>>,
}

impl HttpPaymentsTransport {
    pub fn new(config: PaymentsConfig) -> Result<Self> {
        let client = Client::builder().build().map_err(|e| {
            GatewayError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url,
            key: config.key,
            secret: config.secret,
            token: RwLock::new(None),
        })
    }

    /// Joins `path` onto the configured base URL. Requests, and the bearer
    /// token with them, never leave that host.
    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn access_token(&self) -> Result<String> {
        {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref()
                && token.expires_at > Instant::now()
            {
                return Ok(token.access_token.expose_secret().to_string());
            }
        }

        let mut cached = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(token) = cached.as_ref()
            && token.expires_at > Instant::now()
        {
            return Ok(token.access_token.expose_secret().to_string());
        }

        debug!("requesting payments network access token");
        let response = self
            .client
            .post(self.url_for("token"))
            .basic_auth(self.key.expose_secret(), Some(self.secret.expose_secret()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::UnexpectedResponse(format!("invalid token response: {e}")))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: SecretString::from(token.access_token),
            expires_at: Instant::now() + lifetime,
        });
        Ok(access_token)
    }
}

#[async_trait]
impl PaymentsTransport for HttpPaymentsTransport {
    #[instrument(skip(self, body))]
    async fn post(&self, path: &str, body: Option<Value>) -> Result<PostResponse> {
        let token = self.access_token().await?;

        let mut request = self
            .client
            .post(self.url_for(path))
            .bearer_auth(token)
            .header(ACCEPT, HAL_JSON);
        if let Some(body) = &body {
            request = request.header(CONTENT_TYPE, HAL_JSON).json(body);
        }

        let response = ensure_success(request.send().await?).await?;
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = decode_body(response).await?;

        debug!(location = ?location, "payments network accepted request");
        Ok(PostResponse { location, body })
    }
}
