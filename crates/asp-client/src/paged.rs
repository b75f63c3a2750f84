use asp_core::{PageRequest, Pagination};
use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
///
/// List endpoints name their array after the collection (`questions`,
/// `resources`, `stories`, `results`); all of them land in `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    #[serde(
        default = "Vec::new",
        alias = "questions",
        alias = "resources",
        alias = "stories",
        alias = "results",
        alias = "data"
    )]
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Paged<T> {
    /// Fill in pagination the backend left out, from the request that was sent.
    #[must_use]
    pub fn with_fallback(mut self, request: PageRequest) -> Self {
        if self.pagination.is_none() {
            let count = u64::try_from(self.items.len()).unwrap_or(u64::MAX);
            self.pagination = Some(Pagination {
                page: request.page,
                limit: request.limit,
                total: count,
                pages: request.page,
            });
        }
        self
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.pagination.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use asp_core::Question;

    use super::*;

    #[test]
    fn collection_named_arrays_are_accepted() {
        let json = r#"{
            "questions": [{"_id": "q1", "title": "Best book for organic?"}],
            "pagination": {"currentPage": 2, "limit": 10, "totalItems": 11, "totalPages": 2}
        }"#;
        let page: Paged<Question> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination().page, 2);
        assert!(!page.pagination().has_next());
    }

    #[test]
    fn missing_pagination_is_filled_from_request() {
        let page: Paged<Question> = serde_json::from_str(r#"{"results": []}"#).unwrap();
        let page = page.with_fallback(PageRequest::new(3, 20));
        assert_eq!(page.pagination().page, 3);
        assert_eq!(page.pagination().limit, 20);
        assert!(!page.pagination().has_next());
    }
}
