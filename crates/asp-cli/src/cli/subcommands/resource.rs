use clap::Subcommand;

/// Resource actions.
#[derive(Clone, Debug, Subcommand)]
pub enum ResourceCommands {
    /// Rate a resource from 1 to 5.
    Rate {
        id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
    },
    /// Save (or with --remove, unsave) a resource.
    Save {
        id: String,
        #[arg(long)]
        remove: bool,
    },
}
