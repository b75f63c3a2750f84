use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
    was_authenticated: bool,
}

pub fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let was_authenticated = ctx.session.is_authenticated();
    ctx.sign_out()?;
    output(
        &AuthLogoutResponse {
            cleared: true,
            was_authenticated,
        },
        flags.format,
    )
}
