use clap::Subcommand;

/// Civic impact commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ImpactCommands {
    /// Impact rating, trust tier and level progress for a user.
    Show { user: String },
    /// Award XP, promoting the user when a threshold is crossed.
    Award { user: String, amount: u64 },
}

/// GOAT level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LevelCommands {
    /// List level definitions.
    List,
    /// Insert the default levels that are missing.
    Seed,
}
