use clap::Subcommand;

/// Official scorecard commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ScorecardCommands {
    /// Cached scorecard, computed on the fly when none is stored.
    Show { official: String },
    /// Compute from current records without storing.
    Compute { official: String },
    /// Recompute and store.
    Refresh { official: String },
}
