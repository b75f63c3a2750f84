//! Runs mutations against the server and local state.
//!
//! Local state sits behind a `std::sync::Mutex` that is only held between
//! awaits, so overlapping mutations on the same key are possible; the fence
//! decides which response wins.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use asp_client::{ApiClient, ClientError};
use asp_config::OptimisticMode;

use crate::error::FeedError;
use crate::fence::{Fence, Ticket};
use crate::mutation::{ALL_ACTIVITIES_KEY, Compensation, Mutation, ServerAck, activity_key};
use crate::state::LocalState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Request first; touch local state only after success.
    #[default]
    ConfirmThenApply,
    /// Apply locally first; compensate if the request fails.
    ApplyThenConfirm,
}

impl From<OptimisticMode> for Strategy {
    fn from(mode: OptimisticMode) -> Self {
        match mode {
            OptimisticMode::ConfirmThenApply => Self::ConfirmThenApply,
            OptimisticMode::ApplyThenConfirm => Self::ApplyThenConfirm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Local state was derived from the mutation.
    Applied,
    /// Local state adopted the server's entity.
    Reconciled,
    /// The server accepted the mutation but nothing it touches is held locally.
    Confirmed,
    /// A newer response for the same key already landed; this one was dropped.
    Stale,
}

#[derive(Debug, Default)]
struct Shared {
    state: LocalState,
    fence: Fence,
}

/// Executes [`Mutation`]s under a [`Strategy`]. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct Optimistic {
    shared: Arc<Mutex<Shared>>,
    strategy: Strategy,
}

impl Optimistic {
    pub fn new(state: LocalState, strategy: Strategy) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                state,
                fence: Fence::default(),
            })),
            strategy,
        }
    }

    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Run `f` against local state under the lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut LocalState) -> R) -> R {
        f(&mut self.lock().state)
    }

    /// Clone of the current local state.
    pub fn snapshot(&self) -> LocalState {
        self.lock().state.clone()
    }

    /// Send `mutation` through `client`.
    ///
    /// # Errors
    ///
    /// See [`Self::run`].
    pub async fn execute(&self, client: &ApiClient, mutation: &Mutation) -> Result<Outcome, FeedError> {
        self.run(mutation, || mutation.send(client)).await
    }

    /// Run `mutation` with `request` standing in for the backend call.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidRating`] before anything is sent, or
    /// [`FeedError::Request`] when `request` fails. Under
    /// `ApplyThenConfirm` the local change is compensated unless a newer
    /// request for the same key was issued meanwhile.
    pub async fn run<F, Fut>(&self, mutation: &Mutation, request: F) -> Result<Outcome, FeedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ServerAck, ClientError>>,
    {
        mutation.validate()?;
        let key = mutation.resource_key();

        let (ticket, compensation) = {
            let mut shared = self.lock();
            let ticket = shared.fence.begin(key.as_str());
            let compensation = match self.strategy {
                Strategy::ApplyThenConfirm if mutation.is_loaded(&shared.state) => {
                    Some(mutation.apply(&mut shared.state)?)
                }
                Strategy::ApplyThenConfirm => {
                    tracing::debug!(%key, "not loaded locally; waiting for the server");
                    None
                }
                Strategy::ConfirmThenApply => None,
            };
            (ticket, compensation)
        };

        match request().await {
            Ok(ack) => Ok(self.settle(mutation, &ticket, compensation.is_some(), ack)),
            Err(source) => {
                let rolled_back = compensation.is_some_and(|c| self.compensate(&ticket, c));
                Err(FeedError::Request {
                    source,
                    rolled_back,
                })
            }
        }
    }

    fn settle(&self, mutation: &Mutation, ticket: &Ticket, applied: bool, ack: ServerAck) -> Outcome {
        let mut shared = self.lock();
        if !shared.fence.complete(ticket) {
            tracing::debug!(key = ticket.key(), seq = ticket.seq(), "dropping stale response");
            return Outcome::Stale;
        }

        let state = &mut shared.state;
        match ack {
            ServerAck::Item(item) => {
                state.feed.upsert(item);
                Outcome::Reconciled
            }
            ServerAck::Activity(activity) => {
                state.activity.replace(activity);
                Outcome::Reconciled
            }
            ServerAck::Done if applied => Outcome::Applied,
            ServerAck::Done if mutation.is_loaded(state) => match mutation.apply(state) {
                Ok(_) => Outcome::Applied,
                Err(error) => {
                    tracing::debug!(%error, "confirmed mutation could not be applied locally");
                    Outcome::Confirmed
                }
            },
            ServerAck::Done => {
                tracing::debug!(key = ticket.key(), "confirmed mutation has no local target");
                Outcome::Confirmed
            }
        }
    }

    /// Undo an optimistic change unless a newer request owns the key.
    ///
    /// Read markers are also owned by `activity:<id>` and `activity:*`, so a
    /// marker touched by a later request on either key is left alone.
    fn compensate(&self, ticket: &Ticket, compensation: Compensation) -> bool {
        let mut shared = self.lock();
        let Shared { state, fence } = &mut *shared;
        if !fence.is_latest(ticket) {
            tracing::debug!(key = ticket.key(), "newer request in flight; keeping local state");
            return false;
        }
        let compensation = compensation.retain_markers(|id| {
            !fence.issued_after(&activity_key(id), ticket) && !fence.issued_after(ALL_ACTIVITIES_KEY, ticket)
        });
        compensation.restore(state);
        tracing::warn!(key = ticket.key(), "request failed; local change rolled back");
        true
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
