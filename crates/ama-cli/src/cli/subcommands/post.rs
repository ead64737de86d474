use clap::Subcommand;

/// Post commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PostCommands {
    /// Create a post.
    Create {
        #[arg(long)]
        author: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Tag (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        community: Option<String>,
    },
    /// Get a post by ID.
    Get { id: String },
    /// Update a post.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Replacement tags (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        community: Option<String>,
    },
    /// Delete a post with its comments and votes.
    Delete { id: String },
    /// List posts by one author, newest first.
    List {
        #[arg(long)]
        author: String,
    },
    /// Search titles and content.
    Search { query: String },
}
