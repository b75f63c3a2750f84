use clap::Subcommand;

/// Activity stream commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ActivityCommands {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Mark one activity as read.
    Read { id: String },
    /// Mark every activity as read.
    #[command(name = "read-all")]
    ReadAll,
}
