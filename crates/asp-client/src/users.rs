//! `/api/users/*` endpoints.

use asp_core::{ProfileUpdate, UserSummary};
use reqwest::Method;

use crate::{ApiClient, error::ClientError, http::unwrap_entity, segment};

impl ApiClient {
    /// `GET /api/users/{username}`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 404 for an unknown username.
    pub async fn user_profile(&self, username: &str) -> Result<UserSummary, ClientError> {
        let path = format!("/api/users/{}", segment(username));
        let value = self.send_json(self.request(Method::GET, &path)).await?;
        unwrap_entity(value, "user")
    }

    /// `PUT /api/users/profile`; returns the user as the backend stored it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for an empty update, otherwise
    /// [`ClientError`] on transport failure or a non-2xx status.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserSummary, ClientError> {
        if update.is_empty() {
            return Err(ClientError::InvalidArgument("profile update has no fields".into()));
        }
        let builder = self.request(Method::PUT, "/api/users/profile").json(update);
        let value = self.send_json(builder).await?;
        unwrap_entity(value, "user")
    }
}
