use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::page::Pagination;

/// A notification in the user's activity stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(alias = "_id")]
    pub id: String,
    /// Backend activity type, e.g. `answer`, `vote`, `follow`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub related_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of `GET /api/activities`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPage {
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub pagination: Pagination,
}

impl ActivityPage {
    /// Unread count derived from the items, ignoring the server's counter.
    #[must_use]
    pub fn counted_unread(&self) -> u32 {
        let unread = self.activities.iter().filter(|a| !a.is_read).count();
        u32::try_from(unread).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_activity_page() {
        let json = r#"{
            "activities": [
                {"_id":"a1","type":"answer","message":"Ravi answered your question","isRead":false},
                {"_id":"a2","type":"vote","message":"Your answer got an upvote","isRead":true,
                 "createdAt":"2026-03-01T10:00:00Z"}
            ],
            "unreadCount": 1,
            "pagination": {"page":1,"limit":20,"total":2,"pages":1}
        }"#;
        let page: ActivityPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.activities[0].kind, "answer");
        assert_eq!(page.unread_count, 1);
        assert_eq!(page.counted_unread(), 1);
        assert!(page.activities[1].created_at.is_some());
    }
}
