mod action;
mod comment;
mod community;
mod division;
mod flag;
mod impact;
mod office;
mod post;
mod profile;
mod project;
mod promise;
mod record;
mod scorecard;

pub use action::ActionCommands;
pub use comment::CommentCommands;
pub use community::CommunityCommands;
pub use division::DivisionCommands;
pub use flag::FlagCommands;
pub use impact::{ImpactCommands, LevelCommands};
pub use office::{InstitutionCommands, OfficeCommands};
pub use post::PostCommands;
pub use profile::ProfileCommands;
pub use project::ProjectCommands;
pub use promise::PromiseCommands;
pub use record::{AttendanceCommands, QueryCommands};
pub use scorecard::ScorecardCommands;
