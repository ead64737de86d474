pub mod action;
pub mod attendance;
pub mod audit;
pub mod comment;
pub mod community;
pub mod dispatch;
pub mod division;
pub mod feed;
pub mod flag;
pub mod impact;
pub mod init;
pub mod institution;
pub mod office;
pub mod post;
pub mod profile;
pub mod project;
pub mod promise;
pub mod query;
pub mod route;
pub mod scorecard;
pub mod shared;
pub mod stats;
pub mod vote;
