//! Client for the external auth API.
//!
//! Every call carries the server-held API key in `x-api-key`. The browser never
//! sees the key.

use anyhow::{Context, Result};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, instrument};
use url::Url;
use utoipa::ToSchema;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Field of a successful auth response that holds the session token.
pub const ACCESS_TOKEN_FIELD: &str = "accessToken";

#[derive(ToSchema, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .field("name", &self.name)
            .finish()
    }
}

/// Status and JSON body of an auth API response, as received.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.body.get(ACCESS_TOKEN_FIELD).and_then(Value::as_str)
    }

    /// The `message` of an error body. Validation errors from the API may
    /// carry a list of messages; those are joined with ", ".
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.body.get("message")? {
            Value::String(message) => Some(message.clone()),
            Value::Array(messages) => {
                let joined = messages
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                (!joined.is_empty()).then_some(joined)
            }
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct AuthApi {
    client: Client,
    base_url: Url,
    api_key: SecretString,
}

impl fmt::Debug for AuthApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthApi")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"***")
            .finish_non_exhaustive()
    }
}

impl AuthApi {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url, api_key: SecretString) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .context("Error creating reqwest client")?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST {base}/auth/login`
    ///
    /// # Errors
    /// Returns an error if the request fails or the response is not JSON.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<ApiReply> {
        self.post("auth/login", request).await
    }

    /// `POST {base}/auth/register`
    ///
    /// # Errors
    /// Returns an error if the request fails or the response is not JSON.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiReply> {
        self.post("auth/register", request).await
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<ApiReply> {
        let url = self.endpoint(path);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .context("request to auth API failed")?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .context("failed to read auth API response")?;

        debug!("auth API replied {} to {}", status, url);

        let body: Value =
            serde_json::from_slice(&bytes).context("malformed response from auth API")?;

        Ok(ApiReply { status, body })
    }
}
