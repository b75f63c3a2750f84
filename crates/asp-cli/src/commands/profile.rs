use anyhow::Context;
use asp_core::ProfileUpdate;
use asp_session::LEVELS;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProfileCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `aspirant profile <subcommand>`.
pub async fn handle(
    action: &ProfileCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProfileCommands::Show { username: Some(username) } => {
            let user = ctx
                .client
                .user_profile(username)
                .await
                .with_context(|| format!("failed to load profile '{username}'"))?;
            output(&user, flags.format)
        }
        ProfileCommands::Show { username: None } => {
            let user = ctx
                .client
                .current_user()
                .await
                .context("failed to load your profile")?;
            ctx.session
                .update_user(user.clone())
                .context("failed to refresh stored user")?;
            output(&user, flags.format)
        }
        ProfileCommands::Update {
            name,
            level,
            attempt_year,
        } => {
            let update = build_update(name.as_deref(), level.as_deref(), *attempt_year)?;
            let user = ctx
                .client
                .update_profile(&update)
                .await
                .context("failed to update profile")?;
            ctx.session
                .update_user(user.clone())
                .context("profile updated, but the stored user could not be refreshed")?;
            output(&user, flags.format)
        }
    }
}

fn build_update(
    name: Option<&str>,
    level: Option<&str>,
    attempt_year: Option<u16>,
) -> anyhow::Result<ProfileUpdate> {
    if let Some(level) = level
        && !LEVELS.contains(&level)
    {
        anyhow::bail!("unknown level '{level}', expected one of: {}", LEVELS.join(", "));
    }

    let update = ProfileUpdate {
        name: name.map(str::trim).filter(|name| !name.is_empty()).map(str::to_owned),
        level: level.map(str::to_owned),
        attempt_year,
        ..ProfileUpdate::default()
    };
    if update.is_empty() {
        anyhow::bail!("nothing to update: pass --name, --level or --attempt-year");
    }
    Ok(update)
}
