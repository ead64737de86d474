//! Civic impact: trust tiers, impact bands and GOAT level progress.

use serde::{Deserialize, Serialize};

use crate::entities::GoatLevel;
use crate::enums::{ImpactBand, TrustTier};

/// Verification flags stored on a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerificationFlags {
    pub is_verified_resident: bool,
    pub is_verified_user: bool,
    pub is_verified_official: bool,
}

/// Highest tier whose flag is set. Precedence is
/// official > user > verified resident > resident.
#[must_use]
pub const fn resolve_trust_tier(flags: VerificationFlags) -> TrustTier {
    if flags.is_verified_official {
        TrustTier::VerifiedOfficial
    } else if flags.is_verified_user {
        TrustTier::VerifiedUser
    } else if flags.is_verified_resident {
        TrustTier::VerifiedResident
    } else {
        TrustTier::Resident
    }
}

/// Color band for an impact rating.
#[must_use]
pub fn impact_band(rating: f64) -> ImpactBand {
    if rating >= 80.0 {
        ImpactBand::High
    } else if rating >= 50.0 {
        ImpactBand::Medium
    } else {
        ImpactBand::Low
    }
}

/// Progress toward the next GOAT level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpProgress {
    /// XP earned since the current level's threshold.
    pub current: u64,
    /// XP span between the current and next thresholds (0 at the top level).
    pub required: u64,
    /// 0..=100.
    pub percent: u8,
    pub next_level: Option<GoatLevel>,
}

/// Smallest level strictly above `current_level`, regardless of input order.
#[must_use]
pub fn next_level(current_level: u32, levels: &[GoatLevel]) -> Option<&GoatLevel> {
    levels
        .iter()
        .filter(|l| l.level > current_level)
        .min_by_key(|l| l.level)
}

/// Highest level whose threshold `xp` meets. `None` if no level qualifies.
#[must_use]
pub fn level_for_xp(xp: u64, levels: &[GoatLevel]) -> Option<&GoatLevel> {
    levels
        .iter()
        .filter(|l| l.xp_required <= xp)
        .max_by_key(|l| l.level)
}

/// XP progress from the current level toward the next one.
///
/// The current threshold is the `xp_required` of `current_level`, or 0 when
/// that level is missing from `levels`. With no higher level the percent is
/// 100.
#[must_use]
pub fn xp_progress(current_level: u32, xp: u64, levels: &[GoatLevel]) -> XpProgress {
    let current_threshold = levels
        .iter()
        .find(|l| l.level == current_level)
        .map_or(0, |l| l.xp_required);
    let earned = xp.saturating_sub(current_threshold);

    let Some(next) = next_level(current_level, levels) else {
        return XpProgress {
            current: earned,
            required: 0,
            percent: 100,
            next_level: None,
        };
    };

    let required = next.xp_required.saturating_sub(current_threshold);
    let percent = if required == 0 {
        100
    } else {
        // round-half-up of earned / required * 100, clamped to 100
        let scaled = (u128::from(earned) * 200 + u128::from(required)) / (u128::from(required) * 2);
        u8::try_from(scaled.min(100)).unwrap_or(100)
    };

    XpProgress {
        current: earned,
        required,
        percent,
        next_level: Some(next.clone()),
    }
}

/// Default level table seeded by `ama init`.
#[must_use]
pub fn default_goat_levels() -> Vec<GoatLevel> {
    [
        (1, "Newcomer", 0, "#9CA3AF"),
        (2, "Active Citizen", 100, "#60A5FA"),
        (3, "Community Voice", 300, "#34D399"),
        (4, "Civic Champion", 700, "#FBBF24"),
        (5, "Ward Hero", 1500, "#F97316"),
        (6, "GOAT", 3000, "#A855F7"),
    ]
    .into_iter()
    .map(|(level, title, xp_required, color)| GoatLevel {
        level,
        title: title.to_string(),
        xp_required,
        description: None,
        badge_color: Some(color.to_string()),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn lvl(level: u32, xp_required: u64) -> GoatLevel {
        GoatLevel {
            level,
            title: format!("L{level}"),
            xp_required,
            description: None,
            badge_color: None,
        }
    }

    #[rstest]
    #[case(false, false, false, TrustTier::Resident)]
    #[case(true, false, false, TrustTier::VerifiedResident)]
    #[case(true, true, false, TrustTier::VerifiedUser)]
    #[case(false, true, false, TrustTier::VerifiedUser)]
    #[case(true, true, true, TrustTier::VerifiedOfficial)]
    #[case(false, false, true, TrustTier::VerifiedOfficial)]
    fn trust_tier_precedence(
        #[case] resident: bool,
        #[case] user: bool,
        #[case] official: bool,
        #[case] expected: TrustTier,
    ) {
        let flags = VerificationFlags {
            is_verified_resident: resident,
            is_verified_user: user,
            is_verified_official: official,
        };
        assert_eq!(resolve_trust_tier(flags), expected);
    }

    #[rstest]
    #[case(100.0, ImpactBand::High)]
    #[case(80.0, ImpactBand::High)]
    #[case(79.9, ImpactBand::Medium)]
    #[case(50.0, ImpactBand::Medium)]
    #[case(49.9, ImpactBand::Low)]
    #[case(0.0, ImpactBand::Low)]
    fn impact_bands(#[case] rating: f64, #[case] expected: ImpactBand) {
        assert_eq!(impact_band(rating), expected);
    }

    #[test]
    fn halfway_to_next_level() {
        let levels = vec![lvl(1, 0), lvl(2, 100), lvl(3, 300)];
        let progress = xp_progress(2, 200, &levels);
        assert_eq!(progress.current, 100);
        assert_eq!(progress.required, 200);
        assert_eq!(progress.percent, 50);
        assert_eq!(progress.next_level.map(|l| l.level), Some(3));
    }

    #[test]
    fn next_level_ignores_input_order() {
        let levels = vec![lvl(5, 1500), lvl(3, 300), lvl(4, 700)];
        assert_eq!(next_level(3, &levels).map(|l| l.level), Some(4));
    }

    #[test]
    fn top_level_is_complete() {
        let levels = vec![lvl(1, 0), lvl(2, 100)];
        let progress = xp_progress(2, 5_000, &levels);
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.next_level, None);
    }

    #[test]
    fn missing_reference_data_is_complete() {
        let progress = xp_progress(1, 42, &[]);
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.current, 42);
    }

    #[test]
    fn missing_current_level_uses_zero_threshold() {
        let levels = vec![lvl(3, 400)];
        let progress = xp_progress(2, 100, &levels);
        assert_eq!(progress.required, 400);
        assert_eq!(progress.percent, 25);
    }

    #[test]
    fn overshoot_is_clamped() {
        let levels = vec![lvl(1, 0), lvl(2, 100)];
        assert_eq!(xp_progress(1, 250, &levels).percent, 100);
    }

    #[test]
    fn xp_below_threshold_is_zero() {
        let levels = vec![lvl(1, 50), lvl(2, 100)];
        assert_eq!(xp_progress(1, 10, &levels).percent, 0);
    }

    #[test]
    fn progress_always_in_range() {
        let levels = default_goat_levels();
        for level in 0..8 {
            for xp in (0..4_000).step_by(37) {
                assert!(xp_progress(level, xp, &levels).percent <= 100);
            }
        }
    }

    #[test]
    fn level_for_xp_picks_highest_met() {
        let levels = default_goat_levels();
        assert_eq!(level_for_xp(0, &levels).map(|l| l.level), Some(1));
        assert_eq!(level_for_xp(299, &levels).map(|l| l.level), Some(2));
        assert_eq!(level_for_xp(300, &levels).map(|l| l.level), Some(3));
        assert_eq!(level_for_xp(10_000, &levels).map(|l| l.level), Some(6));
        assert_eq!(level_for_xp(10, &[]), None);
    }
}
