//! Entity structs for every ama platform record.
//!
//! Each entity maps to a table in the libSQL database (see `ama-db/migrations`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON output
//! and schema validation.

mod audit;
mod civic_action;
mod comment;
mod community;
mod division;
mod feature_flag;
mod impact;
mod institution;
mod post;
mod profile;
mod project;
mod promise;
mod record;
mod scorecard;
mod vote;

pub use audit::AuditEntry;
pub use civic_action::{CivicAction, CivicActionUpdate};
pub use comment::Comment;
pub use community::{Community, CommunityMember};
pub use division::AdministrativeDivision;
pub use feature_flag::FeatureFlag;
pub use impact::{CivicImpactScore, GoatLevel};
pub use institution::{GovernmentInstitution, OfficeHolder};
pub use post::Post;
pub use profile::Profile;
pub use project::GovernmentProject;
pub use promise::DevelopmentPromise;
pub use record::{AttendanceSession, CitizenQuery};
pub use scorecard::OfficialScorecard;
pub use vote::Vote;
