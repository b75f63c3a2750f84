use clap::Subcommand;

/// Profile commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show a user's profile; your own when no username is given.
    Show { username: Option<String> },
    /// Edit your profile.
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        attempt_year: Option<u16>,
    },
}
