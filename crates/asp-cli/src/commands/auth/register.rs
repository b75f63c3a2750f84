use asp_client::Registration;

use super::SignedInResponse;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthRegisterArgs;
use crate::commands::shared::prompt;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    args: &AuthRegisterArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if args.secondary == Some(args.primary) {
        anyhow::bail!("auth register: secondary exam must differ from primary exam");
    }

    let registration = Registration {
        name: args.name.trim().to_string(),
        username: args.username.trim().to_string(),
        email: args.email.trim().to_string(),
        password: prompt::password(args.password.as_deref())?,
        primary_exam: args.primary,
        secondary_exam: args.secondary,
    };

    let auth = ctx
        .client
        .register(&registration)
        .await
        .map_err(|error| anyhow::anyhow!("auth register: {error}"))?;
    tracing::info!(username = %auth.user.username, "registered");

    ctx.sign_in(auth)?;
    output(&SignedInResponse::from_context(ctx), flags.format)
}
