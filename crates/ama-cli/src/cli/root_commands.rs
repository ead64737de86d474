use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    ActionCommands, AttendanceCommands, CommentCommands, CommunityCommands, DivisionCommands,
    FlagCommands,
    ImpactCommands, InstitutionCommands, LevelCommands, OfficeCommands, PostCommands,
    ProfileCommands, ProjectCommands, PromiseCommands, QueryCommands, ScorecardCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the database and seed GOAT levels.
    Init(InitArgs),
    /// User profiles.
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Communities and membership.
    Community {
        #[command(subcommand)]
        action: CommunityCommands,
    },
    /// Community posts.
    Post {
        #[command(subcommand)]
        action: PostCommands,
    },
    /// Threaded comments.
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
    /// Toggle an up/down vote on a post or comment.
    Vote(VoteArgs),
    /// Ranked, paged post feed.
    Feed(FeedArgs),
    /// Citizen-reported civic actions.
    Action {
        #[command(subcommand)]
        action: ActionCommands,
    },
    /// Government projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Development promises made by officials.
    Promise {
        #[command(subcommand)]
        action: PromiseCommands,
    },
    /// Sitting attendance of officials.
    Attendance {
        #[command(subcommand)]
        action: AttendanceCommands,
    },
    /// Citizen questions to officials.
    Query {
        #[command(subcommand)]
        action: QueryCommands,
    },
    /// Administrative divisions.
    Division {
        #[command(subcommand)]
        action: DivisionCommands,
    },
    /// Government institutions.
    Institution {
        #[command(subcommand)]
        action: InstitutionCommands,
    },
    /// Office-holder claims and verification.
    Office {
        #[command(subcommand)]
        action: OfficeCommands,
    },
    /// Feature flags.
    Flag {
        #[command(subcommand)]
        action: FlagCommands,
    },
    /// Official scorecards.
    Scorecard {
        #[command(subcommand)]
        action: ScorecardCommands,
    },
    /// Civic impact scores and XP.
    Impact {
        #[command(subcommand)]
        action: ImpactCommands,
    },
    /// GOAT level definitions.
    Level {
        #[command(subcommand)]
        action: LevelCommands,
    },
    /// Activity counters for a user.
    Stats(StatsArgs),
    /// Classify an issue with the routing service.
    Route(RouteArgs),
    /// Ask the moderation service for a verdict.
    Moderate(ModerateArgs),
    /// View audit trail.
    Audit(AuditArgs),
}

/// Arguments for `ama init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Skip seeding the default GOAT levels.
    #[arg(long)]
    pub no_seed: bool,
}

/// Arguments for `ama vote`.
#[derive(Clone, Debug, Args)]
pub struct VoteArgs {
    /// What is voted on: post or comment.
    pub target: String,
    /// ID of the post or comment.
    pub target_id: String,
    /// Voting user.
    #[arg(long)]
    pub user: String,
    /// Vote direction: up or down.
    #[arg(long, default_value = "up")]
    pub direction: String,
}

/// Arguments for `ama feed`.
#[derive(Clone, Debug, Args)]
pub struct FeedArgs {
    /// Ordering: hot, new, top, rising (defaults to `feed.default_sort`).
    #[arg(long)]
    pub sort: Option<String>,
    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    /// Restrict to one community (ID or name).
    #[arg(long)]
    pub community: Option<String>,
    /// Show trending posts instead of a page.
    #[arg(long)]
    pub trending: bool,
}

/// Arguments for `ama stats`.
#[derive(Clone, Debug, Args)]
pub struct StatsArgs {
    /// Profile ID.
    pub user: String,
}

/// Arguments for `ama route`.
#[derive(Clone, Debug, Args)]
pub struct RouteArgs {
    /// Free-text description of the issue.
    pub description: String,
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,
    #[arg(long)]
    pub ward: Option<String>,
    #[arg(long)]
    pub constituency: Option<String>,
    #[arg(long)]
    pub county: Option<String>,
    /// Free-text location.
    #[arg(long)]
    pub location: Option<String>,
    /// Photo URL (repeatable).
    #[arg(long = "photo")]
    pub photos: Vec<String>,
}

/// Arguments for `ama moderate`.
#[derive(Clone, Debug, Args)]
pub struct ModerateArgs {
    /// Content to check.
    pub content: String,
    /// Kind of content: post, comment, promise.
    #[arg(long, default_value = "post")]
    pub content_type: String,
}

/// Arguments for `ama audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
    /// Only entries recorded for this actor.
    #[arg(long)]
    pub by: Option<String>,
}
