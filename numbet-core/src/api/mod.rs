//! REST client for the numbet backend.
//!
//! Every call validates its input locally before any request is made,
//! sends the bearer token when one is set and maps non-2xx responses to
//! [`NumbetError::Unauthorized`] or [`NumbetError::Server`].

mod auth;
mod betting;
mod wallet;

use crate::config::ClientConfig;
use crate::error::{NumbetError, Result};
use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
    token: Arc<RwLock<Option<String>>>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| NumbetError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let builder = self.http.request(method, url);
        match self.token.read().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn require_token(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(NumbetError::Unauthorized(
                "Not logged in: no bearer token set".to_string(),
            ))
        }
    }

    async fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<R> {
        let builder = self.request(Method::GET, path).query(query);
        Self::send(builder).await
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let builder = self.request(Method::POST, path).json(body);
        Self::send(builder).await
    }

    async fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let builder = self.request(Method::PUT, path).json(body);
        Self::send(builder).await
    }

    async fn send<R: DeserializeOwned>(builder: RequestBuilder) -> Result<R> {
        let res = builder.send().await?;
        let status = res.status();
        let bytes = res.bytes().await?;

        if !status.is_success() {
            return Err(error_from_response(status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            NumbetError::decode(format!(
                "{} (body: {})",
                e,
                String::from_utf8_lossy(&bytes)
            ))
        })
    }
}

fn error_from_response(status: StatusCode, bytes: &[u8]) -> NumbetError {
    let body: ErrorBody = serde_json::from_slice(bytes).unwrap_or_default();
    let message = body
        .message
        .or(body.error)
        .unwrap_or_else(|| match String::from_utf8_lossy(bytes).trim() {
            "" => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            text => text.to_string(),
        });

    tracing::warn!("Request failed with {}: {}", status, message);

    if status == StatusCode::UNAUTHORIZED {
        NumbetError::Unauthorized(message)
    } else {
        NumbetError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_url", &self.config.api_url)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
