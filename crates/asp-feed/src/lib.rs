//! # asp-feed
//!
//! Local feed and activity state plus the optimistic-update discipline used
//! for votes, saves, ratings and read markers.
//!
//! A [`Mutation`] is a command object. [`Optimistic`] sends it and updates
//! local state according to its [`Strategy`]; per-key fencing keeps an older
//! response from overwriting a newer one.

mod error;
mod executor;
mod fence;
mod mutation;
mod state;

pub use error::FeedError;
pub use executor::{Optimistic, Outcome, Strategy};
pub use fence::{Fence, Ticket};
pub use mutation::{ALL_ACTIVITIES_KEY, Compensation, Mutation, ServerAck, activity_key};
pub use state::{ActivityLog, FeedState, LocalState};
