use asp_core::FeedKind;
use asp_feed::Mutation;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ResourceCommands;
use crate::commands::shared::mutate;
use crate::context::AppContext;

/// Handle `aspirant resource <subcommand>`.
pub async fn handle(
    action: &ResourceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mutation = match action {
        ResourceCommands::Rate { id, rating } => Mutation::Rate {
            id: id.clone(),
            rating: *rating,
        },
        ResourceCommands::Save { id, remove } => Mutation::SetSaved {
            kind: FeedKind::Resource,
            id: id.clone(),
            saved: !remove,
        },
    };
    mutate::run(ctx, mutation, flags).await
}
