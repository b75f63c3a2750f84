//! `/api/auth/*` endpoints.

use asp_core::{Exam, UserSummary};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{ApiClient, error::ClientError, http::unwrap_entity};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub primary_exam: Exam,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_exam: Option<Exam>,
}

/// Body of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

impl ApiClient {
    /// `POST /api/auth/login`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status
    /// (bad credentials arrive as [`ClientError::Api`] or
    /// [`ClientError::Unauthorized`] depending on the backend).
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ClientError> {
        let builder = self.request(Method::POST, "/api/auth/login").json(credentials);
        self.send_json(builder).await
    }

    /// `POST /api/auth/register`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ClientError> {
        let builder = self
            .request(Method::POST, "/api/auth/register")
            .json(registration);
        self.send_json(builder).await
    }

    /// `GET /api/auth/me`: the user the current token belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] for a missing or rejected token.
    pub async fn current_user(&self) -> Result<UserSummary, ClientError> {
        let value: serde_json::Value = self.send_json(self.request(Method::GET, "/api/auth/me")).await?;
        unwrap_entity(value, "user")
    }
}
