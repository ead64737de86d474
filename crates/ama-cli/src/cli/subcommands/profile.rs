use clap::Subcommand;

/// Profile commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProfileCommands {
    /// Create a profile.
    Create {
        username: String,
        #[arg(long)]
        display_name: Option<String>,
        /// citizen, official, expert, journalist, moderator, admin, super_admin
        #[arg(long, default_value = "citizen")]
        role: String,
    },
    /// Get a profile by ID.
    Get { id: String },
    /// Get a profile by username.
    Lookup { username: String },
    /// List profiles.
    List,
    /// Update a profile. Any location flag replaces the whole home location.
    Update {
        id: String,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        ward: Option<String>,
        #[arg(long)]
        constituency: Option<String>,
        #[arg(long)]
        county: Option<String>,
    },
    /// Set verification flags; unset flags are cleared.
    Verify {
        id: String,
        #[arg(long)]
        resident: bool,
        #[arg(long)]
        user: bool,
        #[arg(long)]
        official: bool,
    },
}
