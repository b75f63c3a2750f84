use anyhow::Context;
use asp_core::Activity;
use asp_feed::{ActivityLog, Mutation};
use serde::Serialize;

use crate::cli::subcommands::ActivityCommands;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::mutate;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ActivityListResponse {
    unread_count: u32,
    activities: Vec<Activity>,
}

#[derive(Debug, Serialize)]
struct ActivityRow {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    message: String,
    read: bool,
    at: String,
}

#[derive(Debug, Serialize)]
struct ReadAllResponse {
    outcome: &'static str,
    marked: usize,
    unread_count: Option<u32>,
}

/// Handle `aspirant activity <subcommand>`.
pub async fn handle(
    action: &ActivityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ActivityCommands::List { page } => list(ctx, *page, flags).await,
        ActivityCommands::Read { id } => mutate::run(ctx, Mutation::MarkRead { id: id.clone() }, flags).await,
        ActivityCommands::ReadAll => read_all(ctx, flags).await,
    }
}

async fn load(ctx: &AppContext, page: u32, flags: &GlobalFlags) -> anyhow::Result<()> {
    let page = ctx
        .client
        .list_activities(ctx.page(page, flags))
        .await
        .context("failed to load activities")?;
    let log = ActivityLog::from_page(page);
    ctx.feed.with_state(|state| state.activity = log);
    Ok(())
}

async fn list(ctx: &AppContext, page: u32, flags: &GlobalFlags) -> anyhow::Result<()> {
    load(ctx, page, flags).await?;
    let (unread_count, activities) = ctx
        .feed
        .with_state(|state| (state.activity.unread_count(), state.activity.activities().to_vec()));

    if flags.format != OutputFormat::Table {
        return output(
            &ActivityListResponse {
                unread_count,
                activities,
            },
            flags.format,
        );
    }

    let rows = activities.iter().map(activity_row).collect::<Vec<_>>();
    output(&rows, flags.format)?;
    if !flags.quiet {
        println!("{unread_count} unread");
    }
    Ok(())
}

/// Loads the first page so the local log reflects what gets marked.
async fn read_all(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    load(ctx, 1, flags).await?;
    let marked = ctx.feed.with_state(|state| {
        state
            .activity
            .activities()
            .iter()
            .filter(|activity| !activity.is_read)
            .count()
    });

    let response = mutate::execute(ctx, Mutation::MarkAllRead).await?;
    output(
        &ReadAllResponse {
            outcome: response.outcome,
            marked,
            unread_count: response.unread_count,
        },
        flags.format,
    )
}

fn activity_row(activity: &Activity) -> ActivityRow {
    ActivityRow {
        id: activity.id.clone(),
        kind: activity.kind.clone(),
        message: activity.message.clone(),
        read: activity.is_read,
        at: activity
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn row_formats_timestamp() {
        let activity = Activity {
            id: "a1".into(),
            kind: "answer".into(),
            message: "Ravi answered your question".into(),
            is_read: false,
            related_id: Some("q1".into()),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).single(),
        };
        let row = activity_row(&activity);
        assert_eq!(row.at, "2026-03-01 09:30");
        assert!(!row.read);

        let value = serde_json::to_value(&row).expect("row json");
        assert_eq!(value["type"], "answer");
    }
}
