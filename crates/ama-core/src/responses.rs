//! CLI response types returned as JSON by `ama` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    AdministrativeDivision, CivicAction, CivicActionUpdate, CivicImpactScore, GoatLevel, Post,
};
use crate::enums::{CivicActionStatus, FeedSort, ImpactBand, TrustTier, VoteAction, VoteTarget, VoteType};

/// A post as shown in the feed, with its content cut to a preview.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeedItem {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub preview: String,
    pub tags: Vec<String>,
    pub upvotes: u32,
    pub downvotes: u32,
    pub comment_count: u32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FeedItem {
    #[must_use]
    pub fn from_post(post: &Post, preview_length: usize) -> Self {
        Self {
            id: post.id.clone(),
            author_id: post.author_id.clone(),
            title: post.title.clone(),
            preview: crate::feed::content_preview(&post.content, preview_length),
            tags: post.tags.clone(),
            upvotes: post.upvotes,
            downvotes: post.downvotes,
            comment_count: post.comment_count,
            created_at: post.created_at,
        }
    }
}

/// Response from `ama feed`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeedPage {
    pub sort: FeedSort,
    pub page: u32,
    pub page_size: u32,
    pub has_next_page: bool,
    pub items: Vec<FeedItem>,
}

/// Response from `ama vote`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VoteResponse {
    pub target: VoteTarget,
    pub target_id: String,
    pub action: VoteAction,
    pub vote_type: Option<VoteType>,
    pub upvotes: u32,
    pub downvotes: u32,
}

/// Response from `ama action show`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CivicActionDetail {
    pub action: CivicAction,
    pub progress_percent: u8,
    pub updates: Vec<CivicActionUpdate>,
}

/// Response from `ama action transition`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TransitionResponse {
    pub action: CivicAction,
    pub previous_status: CivicActionStatus,
    pub update: CivicActionUpdate,
}

/// Response from `ama impact show`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ImpactSummary {
    pub user_id: String,
    pub score: Option<CivicImpactScore>,
    pub trust_tier: TrustTier,
    pub trust_label: String,
    pub impact_band: ImpactBand,
    pub goat_level: u32,
    pub goat_title: String,
    pub goat_xp: u64,
    pub next_level: Option<GoatLevel>,
    pub xp_into_level: u64,
    pub xp_for_next_level: u64,
    pub progress_percent: u8,
}

/// Response from `ama stats`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UserStats {
    pub user_id: String,
    pub posts: u32,
    pub comments: u32,
    pub civic_actions: u32,
    pub resolved_actions: u32,
    pub post_karma: i64,
    pub comment_karma: i64,
    pub karma: i64,
    pub impact_rating: f64,
    pub goat_level: u32,
}

/// Response from `ama division ancestors`: the chain from the division up
/// to its root.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DivisionPath {
    pub division_id: String,
    pub path: Vec<AdministrativeDivision>,
}

/// Response from `ama community join` and `ama community leave`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MembershipResponse {
    pub community_id: String,
    pub user_id: String,
    pub is_member: bool,
    pub member_count: u32,
}

/// Response from `ama flag check`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeatureCheckResponse {
    pub feature_key: String,
    pub enabled: bool,
}
