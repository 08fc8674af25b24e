//! Startup configuration for the two vendor platforms.
//!
//! Both configurations are built once when the process starts and are then
//! handed, read-only, to the transports that need them.

use crate::error::{GatewayError, Result};
use secrecy::SecretString;
use std::fmt;
use std::str::FromStr;

pub const SANDBOX_BASE_URL: &str = "https://api-sandbox.dwolla.com";
pub const PRODUCTION_BASE_URL: &str = "https://api.dwolla.com";
pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// Deployment mode of the payments network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = GatewayError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            _ => Err(GatewayError::ConfigurationError(
                "Dwolla environment should either be set to `sandbox` or `production`".to_string(),
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Credentials and target of the payments network.
#[derive(Debug)]
pub struct PaymentsConfig {
    pub environment: Environment,
    pub key: SecretString,
    pub secret: SecretString,
    pub base_url: String,
}

impl PaymentsConfig {
    /// Validates the deployment mode before anything else is looked at.
    pub fn new(
        environment: &str,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self> {
        let environment: Environment = environment.parse()?;
        Ok(Self {
            environment,
            key: SecretString::from(key.into()),
            secret: SecretString::from(secret.into()),
            base_url: environment.base_url().to_string(),
        })
    }

    /// Reads `DWOLLA_ENV`, `DWOLLA_KEY` and `DWOLLA_SECRET`.
    pub fn from_env() -> Result<Self> {
        let environment = require_env("DWOLLA_ENV")?;
        Self::new(
            &environment,
            require_env("DWOLLA_KEY")?,
            require_env("DWOLLA_SECRET")?,
        )
    }

    /// Points the transport somewhere other than the mode's default host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Endpoint, project and administrator key of the identity platform.
#[derive(Debug)]
pub struct IdentityConfig {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: Option<SecretString>,
}

impl IdentityConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_IDENTITY_ENDPOINT.to_string(),
            project_id: project_id.into(),
            api_key: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Reads `APPWRITE_PROJECT`, and optionally `APPWRITE_ENDPOINT` and `APPWRITE_KEY`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(require_env("APPWRITE_PROJECT")?);
        if let Ok(endpoint) = std::env::var("APPWRITE_ENDPOINT") {
            config = config.with_endpoint(endpoint);
        }
        if let Ok(key) = std::env::var("APPWRITE_KEY") {
            config = config.with_api_key(key);
        }
        Ok(config)
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| GatewayError::ConfigurationError(format!("{name} must be set")))
}
