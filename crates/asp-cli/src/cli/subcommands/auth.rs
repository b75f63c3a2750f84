use asp_core::Exam;
use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in with email and password.
    Login(AuthLoginArgs),
    /// Create an account and log in.
    Register(AuthRegisterArgs),
    /// Clear the stored session.
    Logout,
    /// Show the current session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    /// Password; read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
    /// Log in even if a session already exists.
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    /// Password; read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub primary: Exam,
    #[arg(long)]
    pub secondary: Option<Exam>,
    /// Register even if a session already exists.
    #[arg(long)]
    pub force: bool,
}

impl AuthCommands {
    /// `--force` lets login/register replace an existing session.
    #[must_use]
    pub const fn forced(&self) -> bool {
        match self {
            Self::Login(args) => args.force,
            Self::Register(args) => args.force,
            Self::Logout | Self::Status => false,
        }
    }
}
