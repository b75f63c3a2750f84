//! # asp-client
//!
//! HTTP client for the Aspirant Network backend REST contract.
//!
//! One method per endpoint, grouped by resource:
//! - `auth`: login, register, current user
//! - `questions`: list, fetch, ask, vote, mark solved, save/unsave
//! - `resources`: list, rate, save/unsave
//! - `stories`: list, save/unsave
//! - `activities`: list, mark read, mark all read
//! - `users`: public profile, profile update
//! - `search`: cross-feed search
//!
//! The client carries an optional bearer token but never refreshes or clears
//! it; a 401 surfaces as [`ClientError::Unauthorized`] for the caller to act on.

pub mod activities;
pub mod auth;
pub mod questions;
pub mod resources;
pub mod search;
pub mod stories;
pub mod users;

mod error;
mod http;
mod paged;

pub use auth::{AuthResponse, Credentials, Registration};
pub use error::ClientError;
pub use paged::Paged;
pub use questions::NewQuestion;
pub use search::SearchQuery;

use std::time::Duration;

use asp_config::ApiConfig;
use reqwest::Method;
use serde::de::DeserializeOwned;

/// Async client bound to one backend origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the base URL is not http(s),
    /// or [`ClientError::Http`] if the TLS backend fails to initialize.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        if !config.is_valid() {
            return Err(ClientError::InvalidBaseUrl(config.base_url.clone()));
        }
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            token: None,
        })
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an `/api/...` path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "backend request");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send, check the status, and decode the body as JSON.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let resp = http::check_response(builder.send().await?).await?;
        Ok(resp.json().await?)
    }

    /// Send and check the status, discarding the body.
    pub(crate) async fn send_unit(&self, builder: reqwest::RequestBuilder) -> Result<(), ClientError> {
        http::check_response(builder.send().await?).await?;
        Ok(())
    }
}

/// Percent-encode one path segment so ids cannot escape their route.
pub(crate) fn segment(raw: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(raw)
}
