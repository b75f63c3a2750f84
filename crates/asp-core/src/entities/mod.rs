//! Entity structs mirroring the backend's JSON payloads.
//!
//! All entities use camelCase field names on the wire and accept Mongo-style
//! `_id` as an alias for `id`.

mod activity;
mod feed;
mod user;

pub use activity::{Activity, ActivityPage};
pub use feed::{Author, FeedItem, FeedKind, Question, Resource, Story};
pub use user::{ProfileUpdate, UserSummary};

use serde::{Deserialize, Deserializer};

use crate::enums::Exam;

/// Treat `null`, a missing field, and `""` alike as "no exam".
pub(crate) fn deserialize_optional_exam<'de, D>(deserializer: D) -> Result<Option<Exam>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
