//! # asp-core
//!
//! Core types and error types for the Aspirant Network client.
//!
//! This crate provides the foundational types shared across all `asp-*` crates:
//! - Entity structs for the backend's JSON payloads (users, feed items, activities)
//! - Exam and session-state enums, the latter with state machine transitions
//! - Pagination types used by every list endpoint
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod page;

pub use entities::{
    Activity, ActivityPage, Author, FeedItem, FeedKind, ProfileUpdate, Question, Resource, Story,
    UserSummary,
};
pub use enums::{Exam, SessionState, VoteDirection};
pub use errors::CoreError;
pub use page::{PageRequest, Pagination};
