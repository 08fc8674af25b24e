use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Cookie the identity platform's session token travels in.
pub const SESSION_COOKIE: &str = "appwrite-session";

/// What an identity client authenticates with.
#[derive(Debug)]
pub enum Credential {
    /// End-user session token, scoped to that user's permissions.
    Session(SecretString),
    /// Static administrator API key with full service privilege.
    ApiKey(SecretString),
}

impl Credential {
    pub fn kind(&self) -> CredentialKind {
        match self {
            Credential::Session(_) => CredentialKind::Session,
            Credential::ApiKey(_) => CredentialKind::ApiKey,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CredentialKind {
    Session,
    ApiKey,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// One request against the identity platform, relative to its endpoint.
#[derive(Debug, PartialEq, Clone)]
pub struct ApiCall {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiCall {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path, Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path, None)
    }

    fn new(method: HttpMethod, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body,
        }
    }

    /// Appends one `queries[]` parameter per query string.
    pub fn with_queries(mut self, queries: &[String]) -> Self {
        self.query
            .extend(queries.iter().map(|q| ("queries[]".to_string(), q.clone())));
        self
    }
}

/// A session issued by the identity platform.
///
/// `secret` is what the caller stores in the session cookie.
#[derive(Debug, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub secret: Option<SecretString>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let secret = Option::<String>::deserialize(deserializer)?;
    Ok(secret.filter(|s| !s.is_empty()).map(SecretString::from))
}
