use clap::Subcommand;

/// Community commands. A community may be given by ID or by name.
#[derive(Clone, Debug, Subcommand)]
pub enum CommunityCommands {
    /// Create a community; the creator joins it.
    Create {
        name: String,
        #[arg(long, default_value = "")]
        display_name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "general")]
        category: String,
        /// Creating user ID.
        #[arg(long)]
        by: Option<String>,
    },
    /// Get a community.
    Get { community: String },
    /// List communities, largest first.
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Join a community.
    Join {
        community: String,
        #[arg(long)]
        user: String,
    },
    /// Leave a community.
    Leave {
        community: String,
        #[arg(long)]
        user: String,
    },
    /// List members in join order.
    Members { community: String },
}
