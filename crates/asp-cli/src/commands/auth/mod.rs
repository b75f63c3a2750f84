mod login;
mod logout;
mod register;
mod status;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `aspirant auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, ctx, flags).await,
        AuthCommands::Register(args) => register::handle(args, ctx, flags).await,
        AuthCommands::Logout => logout::handle(ctx, flags),
        AuthCommands::Status => status::handle(ctx, flags),
    }
}

/// Printed after a successful login or registration.
#[derive(Serialize)]
struct SignedInResponse {
    authenticated: bool,
    username: String,
    name: String,
    current_exam: Option<String>,
    available_exams: Vec<String>,
}

impl SignedInResponse {
    fn from_context(ctx: &AppContext) -> Self {
        let session = &ctx.session;
        let user = session.user();
        Self {
            authenticated: session.is_authenticated(),
            username: user.map(|u| u.username.clone()).unwrap_or_default(),
            name: user.map(|u| u.name.clone()).unwrap_or_default(),
            current_exam: session.current_exam().map(|exam| exam.to_string()),
            available_exams: session
                .available_exams()
                .into_iter()
                .map(|exam| exam.to_string())
                .collect(),
        }
    }
}
