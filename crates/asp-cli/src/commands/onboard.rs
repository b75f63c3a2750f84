use anyhow::Context;
use asp_core::{Exam, UserSummary};
use asp_session::OnboardingProfile;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::OnboardArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct OnboardResponse {
    current_exam: Option<Exam>,
    user: Option<UserSummary>,
}

/// Handle `aspirant onboard`: validate locally, save remotely, then adopt
/// the returned user into the session.
pub async fn handle(args: &OnboardArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let profile = OnboardingProfile {
        primary_exam: args.primary,
        secondary_exam: args.secondary,
        level: args.level.trim().to_ascii_lowercase(),
        attempt_year: args.attempt_year,
    };
    profile.validate().context("onboarding profile rejected")?;

    let user = ctx
        .client
        .update_profile(&profile.to_profile_update())
        .await
        .context("failed to save onboarding profile")?;
    ctx.session
        .complete_onboarding(&profile, Some(user))
        .context("onboarding saved, but the local session could not be updated")?;

    output(
        &OnboardResponse {
            current_exam: ctx.session.current_exam(),
            user: ctx.session.user().cloned(),
        },
        flags.format,
    )
}
