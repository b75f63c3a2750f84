use asp_session::token;
use chrono::Utc;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Default, Serialize)]
struct AuthStatusResponse {
    state: String,
    authenticated: bool,
    username: Option<String>,
    current_exam: Option<String>,
    storage: &'static str,
    api: String,
    /// From the token's `exp` claim. Informational; nothing is enforced.
    expires_at: Option<String>,
    expired: Option<bool>,
    note: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&status(ctx), flags.format)
}

fn status(ctx: &AppContext) -> AuthStatusResponse {
    let session = &ctx.session;
    let mut response = AuthStatusResponse {
        state: session.state().to_string(),
        authenticated: session.is_authenticated(),
        username: session.user().map(|user| user.username.clone()),
        current_exam: session.current_exam().map(|exam| exam.to_string()),
        storage: session.store().backend_name(),
        api: ctx.client.base_url().to_string(),
        ..AuthStatusResponse::default()
    };

    if let Some(jwt) = session.token() {
        match token::decode_expiry(jwt) {
            Ok(expires_at) => {
                response.expired = Some(expires_at <= Utc::now());
                response.expires_at = Some(expires_at.to_rfc3339());
            }
            Err(error) => response.note = Some(error.to_string()),
        }
    }

    response
}
