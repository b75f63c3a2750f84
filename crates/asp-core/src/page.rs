//! Pagination request and response metadata.

use serde::{Deserialize, Serialize};

const fn default_page() -> u32 {
    1
}

const fn default_limit() -> u32 {
    10
}

/// `?page&limit` parameters sent with every list request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Build a request, clamping `page` to at least 1 and `limit` to `1..=100`.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, 100),
        }
    }

    /// Query-string fragment without the leading `?`.
    #[must_use]
    pub fn to_query(self) -> String {
        format!("page={}&limit={}", self.page, self.limit)
    }
}

/// Pagination block returned alongside list payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page", alias = "currentPage")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default, alias = "totalItems")]
    pub total: u64,
    #[serde(default, alias = "totalPages")]
    pub pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            total: 0,
            pages: 0,
        }
    }
}

impl Pagination {
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }
}
