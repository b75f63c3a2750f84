use anyhow::Context;
use asp_session::guard::{self, LOGIN_PATH};
use asp_session::{KeyValueStore, RouteDecision, RouteKind, Session};
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

use cli::Commands;
use cli::subcommands::AuthCommands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("aspirant error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    if matches!(cli.command, Commands::Secret) {
        return commands::secret::handle(&flags);
    }

    let config = bootstrap::load_config()?;
    let mut ctx = context::AppContext::init(config)
        .context("failed to initialize aspirant session")?;

    let command = cli.command;
    check_route(&command, &ctx.session)?;
    commands::dispatch::dispatch(command, &mut ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ASPIRANT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Which guard a command sits behind.
fn route_kind(command: &Commands) -> RouteKind {
    match command {
        Commands::Auth {
            action: AuthCommands::Login(_) | AuthCommands::Register(_),
        } => RouteKind::Public,
        Commands::Auth { .. } | Commands::Secret => RouteKind::Open,
        Commands::Exam { .. }
        | Commands::Feed { .. }
        | Commands::Question { .. }
        | Commands::Resource { .. }
        | Commands::Story { .. }
        | Commands::Activity { .. }
        | Commands::Profile { .. }
        | Commands::Onboard(_)
        | Commands::Search(_) => RouteKind::Protected,
    }
}

fn check_route<S: KeyValueStore>(command: &Commands, session: &Session<S>) -> anyhow::Result<()> {
    let decision = guard::guard(route_kind(command), session);
    tracing::debug!(%decision, "route guard");

    match decision {
        RouteDecision::Allow => Ok(()),
        RouteDecision::Pending => anyhow::bail!("session is still loading; try again"),
        RouteDecision::Redirect(LOGIN_PATH) => {
            anyhow::bail!("not logged in. Run 'aspirant auth login' first.")
        }
        RouteDecision::Redirect(_) => {
            let forced = matches!(command, Commands::Auth { action } if action.forced());
            if forced {
                return Ok(());
            }
            let username = session.user().map_or("unknown", |user| user.username.as_str());
            anyhow::bail!(
                "already logged in as '{username}'. Run 'aspirant auth logout' first or pass --force."
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use asp_core::{Exam, UserSummary};
    use asp_session::MemoryStore;
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["aspirant"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("cli should parse").command
    }

    fn signed_in() -> Session<MemoryStore> {
        let mut session = Session::open(MemoryStore::new()).expect("hydrate");
        session
            .login(
                UserSummary {
                    id: "u1".into(),
                    name: "Asha".into(),
                    username: "asha".into(),
                    primary_exam: Exam::Jee,
                    secondary_exam: None,
                    level: String::new(),
                    attempt_year: None,
                    credibility_score: 0,
                    badges: Vec::new(),
                },
                "tok",
            )
            .expect("login");
        session
    }

    #[test]
    fn commands_are_classified() {
        assert_eq!(route_kind(&parse(&["auth", "login", "--email", "a@b.c"])), RouteKind::Public);
        assert_eq!(route_kind(&parse(&["auth", "status"])), RouteKind::Open);
        assert_eq!(route_kind(&parse(&["auth", "logout"])), RouteKind::Open);
        assert_eq!(route_kind(&parse(&["secret"])), RouteKind::Open);
        assert_eq!(route_kind(&parse(&["feed", "stories"])), RouteKind::Protected);
        assert_eq!(route_kind(&parse(&["activity", "read-all"])), RouteKind::Protected);
    }

    #[test]
    fn protected_command_needs_login() {
        let session = Session::open(MemoryStore::new()).expect("hydrate");
        let err = check_route(&parse(&["exam", "show"]), &session).expect_err("anonymous");
        assert!(err.to_string().contains("not logged in"));
        assert!(check_route(&parse(&["auth", "status"]), &session).is_ok());
    }

    #[test]
    fn login_is_refused_when_signed_in_unless_forced() {
        let session = signed_in();
        let err = check_route(&parse(&["auth", "login", "--email", "a@b.c"]), &session)
            .expect_err("already signed in");
        assert!(err.to_string().contains("'asha'"));

        let forced = parse(&["auth", "login", "--email", "a@b.c", "--force"]);
        assert!(check_route(&forced, &session).is_ok());
        assert!(check_route(&parse(&["exam", "show"]), &session).is_ok());
    }

    #[test]
    fn uninitialized_session_is_pending() {
        let session = Session::new(MemoryStore::new());
        let err = check_route(&parse(&["exam", "show"]), &session).expect_err("pending");
        assert!(err.to_string().contains("loading"));
    }
}
