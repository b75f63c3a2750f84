use asp_core::Exam;
use clap::{Args, Subcommand};

/// Feed browsing commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FeedCommands {
    Questions(FeedArgs),
    Resources(FeedArgs),
    Stories(FeedArgs),
}

#[derive(Clone, Debug, Args)]
pub struct FeedArgs {
    /// Exam to browse; defaults to the current exam.
    #[arg(long)]
    pub exam: Option<Exam>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}
