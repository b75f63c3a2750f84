use asp_core::Exam;
use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{
    ActivityCommands, AuthCommands, ExamCommands, FeedCommands, ProfileCommands, QuestionCommands,
    ResourceCommands, StoryCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in, register, log out, show session status.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Show or switch the exam whose content you see.
    Exam {
        #[command(subcommand)]
        action: ExamCommands,
    },
    /// Browse questions, resources and stories.
    Feed {
        #[command(subcommand)]
        action: FeedCommands,
    },
    /// Vote on, solve or save a question.
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },
    /// Rate or save a resource.
    Resource {
        #[command(subcommand)]
        action: ResourceCommands,
    },
    /// Save a story.
    Story {
        #[command(subcommand)]
        action: StoryCommands,
    },
    /// Your activity stream.
    Activity {
        #[command(subcommand)]
        action: ActivityCommands,
    },
    /// Show or edit profiles.
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// First-run exam and level setup.
    Onboard(OnboardArgs),
    /// Search across all feeds.
    Search(SearchArgs),
    /// Print a random 64-byte hex secret (for JWT signing keys).
    Secret,
}

/// Arguments for `aspirant onboard`.
#[derive(Clone, Debug, Args)]
pub struct OnboardArgs {
    #[arg(long)]
    pub primary: Exam,
    #[arg(long)]
    pub secondary: Option<Exam>,
    /// beginner, intermediate or advanced
    #[arg(long)]
    pub level: String,
    #[arg(long)]
    pub attempt_year: u16,
}

/// Feed filter for `aspirant search --kind`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SearchKind {
    Question,
    Resource,
    Story,
}

/// Arguments for `aspirant search`.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    pub query: String,
    #[arg(long)]
    pub kind: Option<SearchKind>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}
