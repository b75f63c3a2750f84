use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed, guard-approved command to its handler.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Exam { action } => commands::exam::handle(&action, ctx, flags),
        Commands::Feed { action } => commands::feed::handle(&action, ctx, flags).await,
        Commands::Question { action } => commands::question::handle(&action, ctx, flags).await,
        Commands::Resource { action } => commands::resource::handle(&action, ctx, flags).await,
        Commands::Story { action } => commands::story::handle(&action, ctx, flags).await,
        Commands::Activity { action } => commands::activity::handle(&action, ctx, flags).await,
        Commands::Profile { action } => commands::profile::handle(&action, ctx, flags).await,
        Commands::Onboard(args) => commands::onboard::handle(&args, ctx, flags).await,
        Commands::Search(args) => commands::search::handle(&args, ctx, flags).await,
        Commands::Secret => commands::secret::handle(flags),
    }
}
