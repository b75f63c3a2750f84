use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_optional_exam;
use crate::enums::{Exam, VoteDirection};

/// Author block embedded in feed items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, alias = "content")]
    pub body: String,
    #[serde(default, deserialize_with = "deserialize_optional_exam")]
    pub exam: Option<Exam>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub downvotes: u32,
    #[serde(default)]
    pub user_vote: Option<VoteDirection>,
    #[serde(default)]
    pub answer_count: u32,
    #[serde(default)]
    pub is_solved: bool,
    #[serde(default)]
    pub is_saved: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Question {
    #[must_use]
    pub fn score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_optional_exam")]
    pub exam: Option<Exam>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub user_rating: Option<u8>,
    #[serde(default)]
    pub is_saved: bool,
    #[serde(default)]
    pub saves: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, alias = "content")]
    pub body: String,
    #[serde(default, deserialize_with = "deserialize_optional_exam")]
    pub exam: Option<Exam>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub is_saved: bool,
    #[serde(default)]
    pub saves: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Which feed a post belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Question,
    Resource,
    Story,
}

impl FeedKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Resource => "resource",
            Self::Story => "story",
        }
    }

    /// Collection segment under `/api`.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Question => "questions",
            Self::Resource => "resources",
            Self::Story => "stories",
        }
    }
}

/// A post in the feed, discriminated by `postType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "postType", rename_all = "lowercase")]
pub enum FeedItem {
    Question(Question),
    Resource(Resource),
    Story(Story),
}

impl FeedItem {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Question(q) => &q.id,
            Self::Resource(r) => &r.id,
            Self::Story(s) => &s.id,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FeedKind {
        match self {
            Self::Question(_) => FeedKind::Question,
            Self::Resource(_) => FeedKind::Resource,
            Self::Story(_) => FeedKind::Story,
        }
    }

    #[must_use]
    pub const fn is_saved(&self) -> bool {
        match self {
            Self::Question(q) => q.is_saved,
            Self::Resource(r) => r.is_saved,
            Self::Story(s) => s.is_saved,
        }
    }

    /// Key used for fencing and lookups, e.g. `question:65f1`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind().as_str(), self.id())
    }
}

impl std::fmt::Display for FeedItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind().as_str(), self.id())
    }
}
