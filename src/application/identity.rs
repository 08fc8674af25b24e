use super::capabilities::{Account, Databases, Users};
use crate::config::IdentityConfig;
use crate::domain::identity::{Credential, SESSION_COOKIE};
use crate::domain::ports::{IdentityConnector, IdentityTransportHandle};
use crate::error::{GatewayError, Result};
use crate::infrastructure::http_identity::http_connector;
use cookie::CookieJar;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Builds identity-platform clients, one per request.
///
/// Nothing is cached: every call re-reads the session cookie (or re-attaches
/// the administrator key) and connects a fresh transport.
pub struct IdentityClientFactory {
    connector: IdentityConnector,
    admin_key: Option<SecretString>,
}

impl IdentityClientFactory {
    pub fn new(connector: IdentityConnector, admin_key: Option<SecretString>) -> Self {
        Self {
            connector,
            admin_key,
        }
    }

    /// Factory talking HTTP to the endpoint and project in `config`.
    pub fn from_config(config: IdentityConfig) -> Self {
        let connector = http_connector(&config);
        Self::new(connector, config.api_key)
    }

    /// Client acting as the user whose session token is in `cookies`.
    ///
    /// Fails with `AuthenticationError` when the session cookie is missing or
    /// empty; no transport is built in that case.
    pub fn create_session_client(&self, cookies: &CookieJar) -> Result<SessionClient> {
        let token = cookies
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| GatewayError::AuthenticationError("No session".to_string()))?;

        let transport = (self.connector)(Credential::Session(SecretString::from(token.to_string())))?;
        debug!("session client created");
        Ok(SessionClient { transport })
    }

    /// Client with full administrative privilege.
    ///
    /// Never hand this to code acting on behalf of an end user.
    pub fn create_admin_client(&self) -> Result<AdminClient> {
        let key = self.admin_key.as_ref().ok_or_else(|| {
            GatewayError::ConfigurationError("identity platform API key is not set".to_string())
        })?;

        let credential = Credential::ApiKey(SecretString::from(key.expose_secret().to_string()));
        let transport = (self.connector)(credential)?;
        debug!("admin client created");
        Ok(AdminClient { transport })
    }
}

/// Request-scoped client carrying an end user's session.
pub struct SessionClient {
    transport: IdentityTransportHandle,
}

impl SessionClient {
    pub fn account(&self) -> Account {
        Account::new(self.transport.clone())
    }
}

/// Client authenticated with the administrator API key.
pub struct AdminClient {
    transport: IdentityTransportHandle,
}

impl AdminClient {
    pub fn account(&self) -> Account {
        Account::new(self.transport.clone())
    }

    pub fn database(&self) -> Databases {
        Databases::new(self.transport.clone())
    }

    pub fn user(&self) -> Users {
        Users::new(self.transport.clone())
    }
}
