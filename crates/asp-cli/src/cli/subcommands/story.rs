use clap::Subcommand;

/// Story actions.
#[derive(Clone, Debug, Subcommand)]
pub enum StoryCommands {
    /// Save (or with --remove, unsave) a story.
    Save {
        id: String,
        #[arg(long)]
        remove: bool,
    },
}
