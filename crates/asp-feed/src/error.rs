use asp_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// The mutation targets something not held in local state.
    #[error("{key} is not loaded")]
    NotLoaded { key: String },

    /// The mutation does not apply to this kind of item.
    #[error("cannot {action} {key}")]
    Unsupported { action: &'static str, key: String },

    #[error("invalid rating {0}: must be between 1 and 5")]
    InvalidRating(u8),

    /// The server rejected the request. `rolled_back` reports whether a
    /// local optimistic change was undone.
    #[error("request failed: {source}")]
    Request {
        #[source]
        source: ClientError,
        rolled_back: bool,
    },
}
