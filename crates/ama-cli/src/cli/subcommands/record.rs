use clap::Subcommand;

/// Attendance commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AttendanceCommands {
    /// Record presence at a sitting. Re-recording a date overwrites it.
    Record {
        official: String,
        /// Sitting date, YYYY-MM-DD.
        date: String,
        #[arg(long)]
        absent: bool,
    },
    /// List sittings for an official, oldest first.
    List { official: String },
}

/// Citizen query commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QueryCommands {
    /// Ask an official a question.
    Ask {
        #[arg(long)]
        official: String,
        #[arg(long)]
        asker: String,
        question: String,
    },
    /// Get a query by ID.
    Get { id: String },
    /// Answer a query.
    Respond { id: String, response: String },
    /// List queries addressed to an official.
    List {
        official: String,
        #[arg(long)]
        unanswered: bool,
    },
}
