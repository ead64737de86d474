use clap::Subcommand;

/// Development promise commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PromiseCommands {
    /// Record a promise made by an official.
    Create {
        #[arg(long)]
        official: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Get a promise by ID.
    Get { id: String },
    /// List promises made by an official.
    List { official: String },
    /// Update promise details and progress.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// 0-100
        #[arg(long)]
        progress: Option<u8>,
    },
    /// Move a promise to a new status.
    Transition {
        id: String,
        /// ongoing, completed, cancelled
        status: String,
        #[arg(long)]
        reason: Option<String>,
    },
}
