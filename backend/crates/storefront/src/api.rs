//! Gateway API Client
//!
//! The four calls the storefront makes, over a shared `reqwest::Client`.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::StorefrontConfig;
use crate::error::{SessionError, SessionResult};

/// Fixed gateway endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AdminAuth,
    Register,
    Login,
    Profile,
}

impl Endpoint {
    pub fn method(self) -> Method {
        match self {
            Endpoint::AdminAuth | Endpoint::Profile => Method::GET,
            Endpoint::Register | Endpoint::Login => Method::POST,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::AdminAuth => "/api/admin-auth",
            Endpoint::Register => "/api/user/register",
            Endpoint::Login => "/api/user/login",
            Endpoint::Profile => "/api/user/profile",
        }
    }

    /// Whether the stored token is sent as `Authorization: Bearer`
    pub fn requires_bearer(self) -> bool {
        matches!(self, Endpoint::AdminAuth | Endpoint::Profile)
    }
}

/// Register/login request body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Loosely-typed gateway reply.
///
/// Every endpoint answers with some subset of `success`, `token` and
/// `message`; anything else (`payload`, `admin`, error `action`) lands in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResponse {
    /// Only an explicit `success: true` counts.
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    /// Non-empty token, if the response carried one
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &StorefrontConfig) -> SessionResult<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request.
    ///
    /// `token` is attached only for endpoints that take a bearer. Non-2xx
    /// replies become [`SessionError::Status`] with the body decoded when
    /// possible.
    pub async fn send(
        &self,
        endpoint: Endpoint,
        token: Option<&str>,
        body: Option<&Credentials>,
    ) -> SessionResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let mut request = self.http.request(endpoint.method(), &url);

        if endpoint.requires_bearer() {
            if let Some(token) = token {
                request = request.header(
                    AUTHORIZATION,
                    platform::bearer::bearer_header_value(token),
                );
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            tracing::debug!(
                endpoint = ?endpoint,
                status = status.as_u16(),
                "Gateway rejected request"
            );
            return Err(SessionError::Status {
                status: status.as_u16(),
                response: serde_json::from_slice(&bytes).ok(),
            });
        }

        serde_json::from_slice(&bytes).map_err(SessionError::Decode)
    }
}
