use asp_client::Credentials;

use super::SignedInResponse;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::commands::shared::prompt;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let credentials = Credentials {
        email: args.email.trim().to_string(),
        password: prompt::password(args.password.as_deref())?,
    };

    let auth = ctx
        .client
        .login(&credentials)
        .await
        .map_err(|error| anyhow::anyhow!("auth login: {error}"))?;
    tracing::info!(username = %auth.user.username, "logged in");

    ctx.sign_in(auth)?;
    output(&SignedInResponse::from_context(ctx), flags.format)
}
