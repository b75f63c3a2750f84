//! `/api/search/` endpoint.

use asp_core::{FeedItem, FeedKind, PageRequest};
use reqwest::Method;

use crate::{ApiClient, Paged, error::ClientError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    /// Restrict to one feed kind; `None` searches everything.
    pub kind: Option<FeedKind>,
    pub page: PageRequest,
}

impl SearchQuery {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: None,
            page: PageRequest::default(),
        }
    }

    #[must_use]
    pub const fn kind(mut self, kind: FeedKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub const fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    fn to_query(&self) -> String {
        let mut query = format!("q={}", urlencoding::encode(self.text.trim()));
        if let Some(kind) = self.kind {
            query.push_str("&type=");
            query.push_str(kind.as_str());
        }
        query.push('&');
        query.push_str(&self.page.to_query());
        query
    }
}

impl ApiClient {
    /// `GET /api/search/?q&type&page&limit`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for blank search text, otherwise
    /// [`ClientError`] on transport failure or a non-2xx status.
    pub async fn search(&self, query: &SearchQuery) -> Result<Paged<FeedItem>, ClientError> {
        if query.text.trim().is_empty() {
            return Err(ClientError::InvalidArgument("search text is empty".into()));
        }
        let path = format!("/api/search/?{}", query.to_query());
        let paged: Paged<FeedItem> = self.send_json(self.request(Method::GET, &path)).await?;
        Ok(paged.with_fallback(query.page))
    }
}
