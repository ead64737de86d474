use clap::Subcommand;

/// Government project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Register a project.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        official: Option<String>,
        #[arg(long)]
        institution: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long)]
        county: Option<String>,
        #[arg(long)]
        constituency: Option<String>,
        #[arg(long)]
        ward: Option<String>,
    },
    /// Get a project by ID.
    Get { id: String },
    /// List projects.
    List {
        #[arg(long)]
        official: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        county: Option<String>,
        #[arg(long)]
        verified_only: bool,
    },
    /// Update project details and progress.
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
        #[arg(long)]
        budget_allocated: Option<f64>,
        #[arg(long)]
        budget_used: Option<f64>,
        #[arg(long)]
        official: Option<String>,
    },
    /// Move a project to a new status.
    Transition {
        id: String,
        /// planned, ongoing, delayed, completed, cancelled
        status: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Mark a project verified.
    Verify {
        id: String,
        /// Clear the verified mark instead.
        #[arg(long)]
        revoke: bool,
    },
    /// Delete a project.
    Delete { id: String },
}
