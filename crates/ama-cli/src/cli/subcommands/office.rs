use clap::Subcommand;

/// Institution commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InstitutionCommands {
    /// Register an institution.
    Create {
        #[arg(long)]
        name: String,
        /// e.g. county_assembly, national_assembly, ministry
        #[arg(long = "type")]
        institution_type: String,
        #[arg(long)]
        division: Option<String>,
    },
    /// Get an institution by ID.
    Get { id: String },
    /// List institutions.
    List {
        #[arg(long)]
        division: Option<String>,
    },
}

/// Office-holder commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OfficeCommands {
    /// Claim an office; the claim starts pending.
    Claim {
        #[arg(long)]
        user: String,
        #[arg(long)]
        position: String,
        #[arg(long)]
        institution: Option<String>,
        #[arg(long)]
        division: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        term_start: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        term_end: Option<String>,
    },
    /// Get an office holder by ID.
    Get { id: String },
    /// List office holders.
    List {
        /// pending, verified, rejected
        #[arg(long)]
        status: Option<String>,
    },
    /// Decide a pending claim.
    Verify {
        id: String,
        /// verified or rejected
        #[arg(default_value = "verified")]
        decision: String,
    },
    /// Mark an office holder inactive.
    Deactivate { id: String },
}
