//! `/api/activities*` endpoints.

use asp_core::{Activity, ActivityPage, PageRequest};
use reqwest::Method;

use crate::{ApiClient, error::ClientError, http::unwrap_entity, segment};

impl ApiClient {
    /// `GET /api/activities?page&limit`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn list_activities(&self, page: PageRequest) -> Result<ActivityPage, ClientError> {
        let path = format!("/api/activities?{}", page.to_query());
        self.send_json(self.request(Method::GET, &path)).await
    }

    /// `PATCH /api/activities/{id}/read`; returns the updated activity.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn mark_activity_read(&self, id: &str) -> Result<Activity, ClientError> {
        let path = format!("/api/activities/{}/read", segment(id));
        let value = self.send_json(self.request(Method::PATCH, &path)).await?;
        unwrap_entity(value, "activity")
    }

    /// `PATCH /api/activities/read-all`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn mark_all_activities_read(&self) -> Result<(), ClientError> {
        self.send_unit(self.request(Method::PATCH, "/api/activities/read-all"))
            .await
    }
}
