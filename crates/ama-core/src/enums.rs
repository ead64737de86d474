//! Status enums, categories, tiers, and audit vocabulary for ama.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! (except [`Grade`], which serializes as the bare letter). Status enums with
//! state machines provide `allowed_next_states()` to enforce valid transitions
//! at the service layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CivicActionStatus
// ---------------------------------------------------------------------------

/// Status of a citizen-reported civic action.
///
/// ```text
/// submitted → acknowledged → in_progress → resolved
///           ↘ rejected     ↘ rejected    ↘ rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CivicActionStatus {
    Submitted,
    Acknowledged,
    InProgress,
    Resolved,
    Rejected,
}

impl CivicActionStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Submitted => &[Self::Acknowledged, Self::Rejected],
            Self::Acknowledged => &[Self::InProgress, Self::Rejected],
            Self::InProgress => &[Self::Resolved, Self::Rejected],
            Self::Resolved | Self::Rejected => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// How far along the lifecycle the action is, in percent.
    ///
    /// Rejected actions report 0.
    #[must_use]
    pub const fn progress_percent(self) -> u8 {
        match self {
            Self::Submitted => 20,
            Self::Acknowledged => 40,
            Self::InProgress => 60,
            Self::Resolved => 100,
            Self::Rejected => 0,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Acknowledged => "acknowledged",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CivicActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionLevel
// ---------------------------------------------------------------------------

/// Government level responsible for handling a civic action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionLevel {
    Ward,
    Constituency,
    County,
    National,
}

impl ActionLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ward => "ward",
            Self::Constituency => "constituency",
            Self::County => "county",
            Self::National => "national",
        }
    }
}

impl fmt::Display for ActionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IssueCategory
// ---------------------------------------------------------------------------

/// Category of a reported civic issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Water,
    Roads,
    Garbage,
    StreetLights,
    Security,
    Housing,
    Health,
    Other,
}

impl IssueCategory {
    /// The government level that handles this category unless overridden.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn default_action_level(self) -> ActionLevel {
        match self {
            Self::Water | Self::Garbage | Self::StreetLights => ActionLevel::Ward,
            Self::Roads | Self::Housing | Self::Health => ActionLevel::County,
            Self::Security => ActionLevel::National,
            Self::Other => ActionLevel::Ward,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Roads => "roads",
            Self::Garbage => "garbage",
            Self::StreetLights => "street_lights",
            Self::Security => "security",
            Self::Housing => "housing",
            Self::Health => "health",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

/// Reporter-assessed urgency of a civic action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PromiseStatus
// ---------------------------------------------------------------------------

/// Status of an official's development promise.
///
/// ```text
/// not_started → ongoing → completed
///             ↘ cancelled ↘ cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PromiseStatus {
    NotStarted,
    Ongoing,
    Completed,
    Cancelled,
}

impl PromiseStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NotStarted => &[Self::Ongoing, Self::Cancelled],
            Self::Ongoing => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PromiseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Status of a government project.
///
/// ```text
/// planned → ongoing → completed
///                   → delayed → ongoing (resumed)
/// any non-terminal  → cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planned,
    Ongoing,
    Delayed,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Planned => &[Self::Ongoing, Self::Cancelled],
            Self::Ongoing => &[Self::Delayed, Self::Completed, Self::Cancelled],
            Self::Delayed => &[Self::Ongoing, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Ongoing => "ongoing",
            Self::Delayed => "delayed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VerificationStatus
// ---------------------------------------------------------------------------

/// Review state of an office holder's claim to a position.
///
/// ```text
/// pending → verified
///         → rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Verified, Self::Rejected],
            Self::Verified | Self::Rejected => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TrustTier
// ---------------------------------------------------------------------------

/// Verification level shown on a user's profile.
///
/// Ordered from least to most trusted, so `Ord` follows precedence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TrustTier {
    Resident,
    VerifiedResident,
    VerifiedUser,
    VerifiedOfficial,
}

impl TrustTier {
    /// Human-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Resident => "Resident",
            Self::VerifiedResident => "Verified Resident",
            Self::VerifiedUser => "Verified User",
            Self::VerifiedOfficial => "Verified Official",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resident => "resident",
            Self::VerifiedResident => "verified_resident",
            Self::VerifiedUser => "verified_user",
            Self::VerifiedOfficial => "verified_official",
        }
    }
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AppRole
// ---------------------------------------------------------------------------

/// Platform role of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    Citizen,
    Official,
    Expert,
    Journalist,
    Moderator,
    Admin,
    SuperAdmin,
}

impl AppRole {
    /// Whether this role may moderate content and manage platform data.
    #[must_use]
    pub const fn can_moderate(self) -> bool {
        matches!(self, Self::Moderator | Self::Admin | Self::SuperAdmin)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Official => "official",
            Self::Expert => "expert",
            Self::Journalist => "journalist",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a vote is cast on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoteTarget {
    Post,
    Comment,
}

impl VoteTarget {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effect of a vote toggle on the stored vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoteAction {
    Added,
    Removed,
    Changed,
}

impl VoteAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
        }
    }
}

impl fmt::Display for VoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FeedSort
// ---------------------------------------------------------------------------

/// Feed ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedSort {
    #[default]
    Hot,
    New,
    Top,
    Rising,
}

impl FeedSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::Top => "top",
            Self::Rising => "rising",
        }
    }
}

impl fmt::Display for FeedSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Overall letter grade of an official's scorecard.
///
/// Declared worst to best so `Ord` follows letter quality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
}

impl Grade {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ImpactBand
// ---------------------------------------------------------------------------

/// Coarse bucket of a user's impact rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImpactBand {
    Low,
    Medium,
    High,
}

impl ImpactBand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ImpactBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    StatusChanged,
    Voted,
    Supported,
    Responded,
    Verified,
    Toggled,
    Hidden,
    Unhidden,
    Recalculated,
    Joined,
    Left,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::StatusChanged => "status_changed",
            Self::Voted => "voted",
            Self::Supported => "supported",
            Self::Responded => "responded",
            Self::Verified => "verified",
            Self::Toggled => "toggled",
            Self::Hidden => "hidden",
            Self::Unhidden => "unhidden",
            Self::Recalculated => "recalculated",
            Self::Joined => "joined",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Every record kind the platform stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Profile,
    Community,
    Post,
    Comment,
    Vote,
    CivicAction,
    GovernmentProject,
    DevelopmentPromise,
    AttendanceSession,
    CitizenQuery,
    AdministrativeDivision,
    GovernmentInstitution,
    OfficeHolder,
    FeatureFlag,
    ImpactScore,
    GoatLevel,
    Scorecard,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Community => "community",
            Self::Post => "post",
            Self::Comment => "comment",
            Self::Vote => "vote",
            Self::CivicAction => "civic_action",
            Self::GovernmentProject => "government_project",
            Self::DevelopmentPromise => "development_promise",
            Self::AttendanceSession => "attendance_session",
            Self::CitizenQuery => "citizen_query",
            Self::AdministrativeDivision => "administrative_division",
            Self::GovernmentInstitution => "government_institution",
            Self::OfficeHolder => "office_holder",
            Self::FeatureFlag => "feature_flag",
            Self::ImpactScore => "impact_score",
            Self::GoatLevel => "goat_level",
            Self::Scorecard => "scorecard",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(
        action_in_progress,
        CivicActionStatus,
        CivicActionStatus::InProgress,
        "in_progress"
    );
    test_serde_roundtrip!(
        category_street_lights,
        IssueCategory,
        IssueCategory::StreetLights,
        "street_lights"
    );
    test_serde_roundtrip!(
        promise_not_started,
        PromiseStatus,
        PromiseStatus::NotStarted,
        "not_started"
    );
    test_serde_roundtrip!(
        trust_verified_official,
        TrustTier,
        TrustTier::VerifiedOfficial,
        "verified_official"
    );
    test_serde_roundtrip!(role_super_admin, AppRole, AppRole::SuperAdmin, "super_admin");
    test_serde_roundtrip!(grade_a, Grade, Grade::A, "A");
    test_serde_roundtrip!(
        audit_status_changed,
        AuditAction,
        AuditAction::StatusChanged,
        "status_changed"
    );
    test_serde_roundtrip!(
        entity_division,
        EntityType,
        EntityType::AdministrativeDivision,
        "administrative_division"
    );

    // --- Transition tests ---

    #[test]
    fn civic_action_valid_transitions() {
        use CivicActionStatus::*;
        assert!(Submitted.can_transition_to(Acknowledged));
        assert!(Submitted.can_transition_to(Rejected));
        assert!(Acknowledged.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Resolved));
        assert!(InProgress.can_transition_to(Rejected));
    }

    #[test]
    fn civic_action_invalid_transitions() {
        use CivicActionStatus::*;
        assert!(!Submitted.can_transition_to(Resolved));
        assert!(!Submitted.can_transition_to(InProgress));
        assert!(!Resolved.can_transition_to(Submitted));
        assert!(!Rejected.can_transition_to(Acknowledged));
        assert!(Resolved.is_terminal());
        assert!(Rejected.allowed_next_states().is_empty());
    }

    #[test]
    fn civic_action_progress_follows_lifecycle() {
        use CivicActionStatus::*;
        let path = [Submitted, Acknowledged, InProgress, Resolved];
        for pair in path.windows(2) {
            assert!(pair[0].progress_percent() < pair[1].progress_percent());
        }
        assert_eq!(Rejected.progress_percent(), 0);
    }

    #[test]
    fn promise_transitions() {
        use PromiseStatus::*;
        assert!(NotStarted.can_transition_to(Ongoing));
        assert!(Ongoing.can_transition_to(Completed));
        assert!(Ongoing.can_transition_to(Cancelled));
        assert!(!NotStarted.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Ongoing));
    }

    #[test]
    fn project_transitions() {
        use ProjectStatus::*;
        assert!(Planned.can_transition_to(Ongoing));
        assert!(Ongoing.can_transition_to(Delayed));
        assert!(Delayed.can_transition_to(Ongoing));
        assert!(Ongoing.can_transition_to(Completed));
        assert!(!Planned.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Planned));
        assert!(!Completed.can_transition_to(Delayed));
    }

    #[test]
    fn verification_transitions() {
        use VerificationStatus::*;
        assert!(Pending.can_transition_to(Verified));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Verified.can_transition_to(Rejected));
    }

    #[test]
    fn category_default_levels() {
        assert_eq!(IssueCategory::Water.default_action_level(), ActionLevel::Ward);
        assert_eq!(IssueCategory::Roads.default_action_level(), ActionLevel::County);
        assert_eq!(
            IssueCategory::Security.default_action_level(),
            ActionLevel::National
        );
        assert_eq!(IssueCategory::Other.default_action_level(), ActionLevel::Ward);
    }

    #[test]
    fn grade_order_follows_letter_quality() {
        assert!(Grade::A > Grade::B);
        assert!(Grade::B > Grade::C);
        assert!(Grade::D > Grade::F);
    }

    #[test]
    fn trust_tier_order_follows_precedence() {
        assert!(TrustTier::VerifiedOfficial > TrustTier::VerifiedUser);
        assert!(TrustTier::VerifiedUser > TrustTier::VerifiedResident);
        assert!(TrustTier::VerifiedResident > TrustTier::Resident);
    }

    #[test]
    fn moderation_roles() {
        assert!(AppRole::Admin.can_moderate());
        assert!(AppRole::Moderator.can_moderate());
        assert!(!AppRole::Citizen.can_moderate());
        assert!(!AppRole::Official.can_moderate());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", CivicActionStatus::InProgress), "in_progress");
        assert_eq!(format!("{}", ActionLevel::National), "national");
        assert_eq!(format!("{}", Urgency::High), "high");
        assert_eq!(format!("{}", ProjectStatus::Delayed), "delayed");
        assert_eq!(format!("{}", VoteType::Down), "down");
        assert_eq!(format!("{}", VoteTarget::Comment), "comment");
        assert_eq!(format!("{}", VoteAction::Changed), "changed");
        assert_eq!(format!("{}", FeedSort::Rising), "rising");
        assert_eq!(format!("{}", Grade::C), "C");
        assert_eq!(format!("{}", ImpactBand::Medium), "medium");
        assert_eq!(format!("{}", EntityType::CitizenQuery), "citizen_query");
    }
}
