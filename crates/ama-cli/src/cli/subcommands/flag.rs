use clap::Subcommand;

/// Feature flag commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FlagCommands {
    /// Create a flag, or update its metadata. An existing flag keeps its state.
    Create {
        key: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "general")]
        category: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        enabled: bool,
    },
    /// Get a flag by key.
    Get { key: String },
    /// Whether a flag is on. Unknown flags are off.
    Check { key: String },
    /// Flip a flag.
    Toggle { key: String },
    /// Turn a flag on.
    Enable { key: String },
    /// Turn a flag off.
    Disable { key: String },
    /// List flags.
    List {
        #[arg(long)]
        category: Option<String>,
    },
}
