//! Send a [`Mutation`] through the optimistic executor and report the result.

use asp_core::{Activity, FeedItem, FeedKind};
use asp_feed::{FeedError, Mutation, Outcome, Strategy};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub action: &'static str,
    pub target: String,
    pub outcome: &'static str,
    pub strategy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<FeedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_count: Option<u32>,
}

/// Load `item` into local state so an apply-first strategy has something to apply to.
pub fn preload(ctx: &AppContext, item: FeedItem) {
    ctx.feed.with_state(|state| state.feed.upsert(item));
}

pub async fn execute(ctx: &AppContext, mutation: Mutation) -> anyhow::Result<MutationResponse> {
    let outcome = ctx
        .feed
        .execute(&ctx.client, &mutation)
        .await
        .map_err(|error| describe_failure(&mutation, error))?;

    Ok(response(ctx, &mutation, outcome))
}

pub async fn run(ctx: &AppContext, mutation: Mutation, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = execute(ctx, mutation).await?;
    output(&response, flags.format)
}

fn describe_failure(mutation: &Mutation, error: FeedError) -> anyhow::Error {
    let rolled_back = matches!(error, FeedError::Request { rolled_back: true, .. });
    let target = mutation.resource_key();
    let error = anyhow::Error::new(error);
    if rolled_back {
        error.context(format!("failed to {} {target}; local change rolled back", mutation.action()))
    } else {
        error.context(format!("failed to {} {target}", mutation.action()))
    }
}

fn response(ctx: &AppContext, mutation: &Mutation, outcome: Outcome) -> MutationResponse {
    let (item, activity, unread_count) = ctx.feed.with_state(|state| match mutation {
        Mutation::MarkRead { id } => (
            None,
            state.activity.get(id).cloned(),
            Some(state.activity.unread_count()),
        ),
        Mutation::MarkAllRead => (None, None, Some(state.activity.unread_count())),
        _ => {
            let item = feed_target(mutation).and_then(|(kind, id)| state.feed.get(kind, id).cloned());
            (item, None, None)
        }
    });

    MutationResponse {
        action: mutation.action(),
        target: mutation.resource_key(),
        outcome: outcome_label(outcome),
        strategy: strategy_label(ctx.feed.strategy()),
        item,
        activity,
        unread_count,
    }
}

fn feed_target(mutation: &Mutation) -> Option<(FeedKind, &str)> {
    match mutation {
        Mutation::Vote { id, .. } | Mutation::MarkSolved { id } => {
            Some((FeedKind::Question, id.as_str()))
        }
        Mutation::Rate { id, .. } => Some((FeedKind::Resource, id.as_str())),
        Mutation::SetSaved { kind, id, .. } => Some((*kind, id.as_str())),
        Mutation::MarkRead { .. } | Mutation::MarkAllRead => None,
    }
}

const fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Applied => "applied",
        Outcome::Reconciled => "reconciled",
        Outcome::Confirmed => "confirmed",
        Outcome::Stale => "stale",
    }
}

const fn strategy_label(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::ConfirmThenApply => "confirm_then_apply",
        Strategy::ApplyThenConfirm => "apply_then_confirm",
    }
}
