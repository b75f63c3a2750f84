use anyhow::Context;
use asp_core::{FeedItem, FeedKind};
use asp_feed::{Mutation, Strategy};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::QuestionCommands;
use crate::commands::shared::mutate;
use crate::context::AppContext;

/// Handle `aspirant question <subcommand>`.
pub async fn handle(
    action: &QuestionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (id, mutation) = match action {
        QuestionCommands::Vote { id, .. } => {
            let direction = action
                .vote_direction()
                .context("vote command without a direction")?;
            (id, Mutation::Vote {
                id: id.clone(),
                direction,
            })
        }
        QuestionCommands::Solve { id } => (id, Mutation::MarkSolved { id: id.clone() }),
        QuestionCommands::Save { id, remove } => (id, Mutation::SetSaved {
            kind: FeedKind::Question,
            id: id.clone(),
            saved: !remove,
        }),
    };

    if ctx.feed.strategy() == Strategy::ApplyThenConfirm {
        let question = ctx
            .client
            .get_question(id)
            .await
            .with_context(|| format!("failed to load question {id}"))?;
        mutate::preload(ctx, FeedItem::Question(question));
    }

    mutate::run(ctx, mutation, flags).await
}
