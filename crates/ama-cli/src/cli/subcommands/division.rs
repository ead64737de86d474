use clap::Subcommand;

/// Administrative division commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DivisionCommands {
    /// Create a division. Without `--parent` it becomes a root.
    Create {
        #[arg(long)]
        name: String,
        /// Governance level label, e.g. county, constituency, ward.
        #[arg(long)]
        level: String,
        /// ISO country code; required for roots, inherited by children.
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        population: Option<u64>,
    },
    /// Get a division by ID.
    Get { id: String },
    /// Rename or re-describe a division.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        population: Option<u64>,
    },
    /// Delete a division that has no children.
    Delete { id: String },
    /// Direct children of a division.
    Children { id: String },
    /// Top-level divisions.
    Roots {
        #[arg(long)]
        country: Option<String>,
    },
    /// Chain from the root down to a division.
    Ancestors { id: String },
}
