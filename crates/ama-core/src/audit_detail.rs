//! Typed audit detail payloads.
//!
//! Each audit action can carry a structured `detail` JSON blob. These types
//! give the common shapes a schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{VoteAction, VoteTarget, VoteType};

/// Detail for `AuditAction::StatusChanged`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusChangedDetail {
    pub from: String,
    pub to: String,
    pub reason: Option<String>,
}

/// Detail for `AuditAction::Voted`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VotedDetail {
    pub target: VoteTarget,
    pub vote_type: VoteType,
    pub outcome: VoteAction,
}

/// Detail for `AuditAction::Toggled`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ToggledDetail {
    pub feature_key: String,
    pub enabled: bool,
}

/// Detail for `AuditAction::Hidden`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HiddenDetail {
    pub reason: Option<String>,
}

/// Detail for `AuditAction::Updated` on impact scores when XP is awarded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct XpAwardedDetail {
    pub amount: u64,
    pub total_xp: u64,
    pub previous_level: u32,
    pub new_level: u32,
}
