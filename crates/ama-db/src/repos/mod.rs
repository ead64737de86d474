//! Repository modules. Each adds an `impl AmaService` block for one area of
//! the domain.

pub mod attendance;
pub mod audit;
pub mod citizen_query;
pub mod civic_action;
pub mod comment;
pub mod community;
pub mod division;
pub mod feature_flag;
pub mod impact;
pub mod institution;
pub mod post;
pub mod profile;
pub mod project;
pub mod promise;
pub mod scorecard;
pub mod stats;
pub mod vote;
