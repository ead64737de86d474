use clap::Subcommand;

/// Comment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CommentCommands {
    /// Comment on a post, optionally as a reply.
    Create {
        #[arg(long)]
        post: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// Get a comment by ID.
    Get { id: String },
    /// List comments on a post in thread order.
    List {
        post: String,
        #[arg(long)]
        include_hidden: bool,
    },
    /// Delete a comment and its replies.
    Delete { id: String },
    /// Hide a comment from readers.
    Hide {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Restore a hidden comment.
    Unhide { id: String },
}
