//! `/api/resources*` endpoints.

use asp_core::{Exam, PageRequest, Resource};
use reqwest::Method;
use serde::Serialize;

use crate::questions::{feed_query, save_method};
use crate::{ApiClient, Paged, error::ClientError, http::unwrap_entity, segment};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Serialize)]
struct RateBody {
    rating: u8,
}

impl ApiClient {
    /// `GET /api/resources?exam&page&limit`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn list_resources(
        &self,
        exam: Option<Exam>,
        page: PageRequest,
    ) -> Result<Paged<Resource>, ClientError> {
        let path = format!("/api/resources?{}", feed_query(exam, page));
        let paged: Paged<Resource> = self.send_json(self.request(Method::GET, &path)).await?;
        Ok(paged.with_fallback(page))
    }

    /// `POST /api/resources/{id}/rate` with `{rating}`; returns the updated resource.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for a rating outside `1..=5`
    /// without sending anything.
    pub async fn rate_resource(&self, id: &str, rating: u8) -> Result<Resource, ClientError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ClientError::InvalidArgument(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
            )));
        }
        let path = format!("/api/resources/{}/rate", segment(id));
        let builder = self.request(Method::POST, &path).json(&RateBody { rating });
        let value = self.send_json(builder).await?;
        unwrap_entity(value, "resource")
    }

    /// `POST` (save) or `DELETE` (unsave) `/api/resources/{id}/save`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn set_resource_saved(&self, id: &str, saved: bool) -> Result<(), ClientError> {
        let path = format!("/api/resources/{}/save", segment(id));
        self.send_unit(self.request(save_method(saved), &path)).await
    }
}

#[cfg(test)]
mod tests {
    use asp_config::ApiConfig;

    use super::*;

    #[tokio::test]
    async fn out_of_range_rating_is_rejected_locally() {
        // Port 9 (discard) is never contacted: validation fails first.
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        for rating in [0, 6] {
            let err = client.rate_resource("r1", rating).await.unwrap_err();
            assert!(matches!(err, ClientError::InvalidArgument(_)));
        }
    }
}
