use clap::Subcommand;

/// Civic action commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ActionCommands {
    /// Report an issue.
    Report {
        #[arg(long)]
        user: String,
        /// water, roads, garbage, street_lights, security, housing, health, other
        #[arg(long)]
        category: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// low, medium, high
        #[arg(long)]
        urgency: Option<String>,
        /// Override the level derived from the category.
        #[arg(long)]
        level: Option<String>,
        /// Free-text location.
        #[arg(long)]
        location: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,
        #[arg(long)]
        ward: Option<String>,
        #[arg(long)]
        constituency: Option<String>,
        #[arg(long)]
        county: Option<String>,
        /// Hide the report from public listings.
        #[arg(long)]
        private: bool,
    },
    /// Get an action with its history, by ID or case number.
    Get { id: String },
    /// List actions.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        public_only: bool,
    },
    /// Edit an action's details.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        urgency: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        public: Option<bool>,
    },
    /// Move an action to a new status.
    Transition {
        id: String,
        /// acknowledged, in_progress, resolved, rejected
        status: String,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Status history of an action.
    History { id: String },
    /// Add or withdraw support for an action.
    Support {
        id: String,
        #[arg(long)]
        user: String,
    },
}
