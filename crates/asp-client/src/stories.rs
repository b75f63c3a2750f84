//! `/api/stories*` endpoints.

use asp_core::{Exam, PageRequest, Story};
use reqwest::Method;

use crate::questions::{feed_query, save_method};
use crate::{ApiClient, Paged, error::ClientError, segment};

impl ApiClient {
    /// `GET /api/stories?exam&page&limit`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn list_stories(
        &self,
        exam: Option<Exam>,
        page: PageRequest,
    ) -> Result<Paged<Story>, ClientError> {
        let path = format!("/api/stories?{}", feed_query(exam, page));
        let paged: Paged<Story> = self.send_json(self.request(Method::GET, &path)).await?;
        Ok(paged.with_fallback(page))
    }

    /// `POST` (save) or `DELETE` (unsave) `/api/stories/{id}/save`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn set_story_saved(&self, id: &str, saved: bool) -> Result<(), ClientError> {
        let path = format!("/api/stories/{}/save", segment(id));
        self.send_unit(self.request(save_method(saved), &path)).await
    }
}
