use asp_core::FeedKind;
use asp_feed::Mutation;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StoryCommands;
use crate::commands::shared::mutate;
use crate::context::AppContext;

/// Handle `aspirant story <subcommand>`.
pub async fn handle(
    action: &StoryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let StoryCommands::Save { id, remove } = action;
    let mutation = Mutation::SetSaved {
        kind: FeedKind::Story,
        id: id.clone(),
        saved: !remove,
    };
    mutate::run(ctx, mutation, flags).await
}
