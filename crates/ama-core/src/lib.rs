//! # ama-core
//!
//! Core types and pure computations for the ama civic engagement platform.
//!
//! This crate provides the foundational types shared across all ama crates:
//! - Entity structs for every platform record (posts, civic actions, projects, etc.)
//! - Status enums with state machine transitions
//! - ID prefix constants and case number formatting
//! - Cross-cutting error types
//! - Official scorecard aggregation and grading
//! - Civic impact trust tiers and GOAT level progress
//! - Feed ranking and pagination
//! - Vote toggle resolution
//! - CLI response types

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod feed;
pub mod ids;
pub mod impact;
pub mod responses;
pub mod scorecard;
pub mod votes;
