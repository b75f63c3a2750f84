use asp_core::VoteDirection;
use clap::Subcommand;

/// Question actions.
#[derive(Clone, Debug, Subcommand)]
pub enum QuestionCommands {
    /// Upvote (or with --down, downvote). Repeating a vote withdraws it.
    Vote {
        id: String,
        #[arg(long)]
        down: bool,
    },
    /// Mark your question as solved.
    Solve { id: String },
    /// Save (or with --remove, unsave) a question.
    Save {
        id: String,
        #[arg(long)]
        remove: bool,
    },
}

impl QuestionCommands {
    #[must_use]
    pub const fn vote_direction(&self) -> Option<VoteDirection> {
        match self {
            Self::Vote { down: true, .. } => Some(VoteDirection::Down),
            Self::Vote { down: false, .. } => Some(VoteDirection::Up),
            Self::Solve { .. } | Self::Save { .. } => None,
        }
    }
}
