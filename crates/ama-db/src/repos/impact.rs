//! Civic impact scores and the GOAT level table.

use chrono::Utc;

use ama_core::audit_detail::XpAwardedDetail;
use ama_core::entities::{CivicImpactScore, GoatLevel};
use ama_core::enums::{AuditAction, EntityType};
use ama_core::impact::{
    default_goat_levels, impact_band, level_for_xp, resolve_trust_tier, xp_progress,
};
use ama_core::responses::ImpactSummary;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u32, get_u64, opt_text, parse_datetime, parse_enum};
use crate::repos::profile::verification_flags;
use crate::service::AmaService;

const SCORE_COLS: &str = "user_id, impact_rating, trust_tier, goat_level, goat_title, goat_xp, \
     actions_score, resolution_score, community_score, reliability_score, calculated_at";

const STARTING_LEVEL: u32 = 1;
const STARTING_TITLE: &str = "Newcomer";

fn row_to_score(row: &libsql::Row) -> Result<CivicImpactScore, DatabaseError> {
    Ok(CivicImpactScore {
        user_id: row.get(0)?,
        impact_rating: row.get(1)?,
        trust_tier: parse_enum(&row.get::<String>(2)?)?,
        goat_level: get_u32(row, 3)?,
        goat_title: row.get(4)?,
        goat_xp: get_u64(row, 5)?,
        actions_score: row.get(6)?,
        resolution_score: row.get(7)?,
        community_score: row.get(8)?,
        reliability_score: row.get(9)?,
        calculated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

fn row_to_level(row: &libsql::Row) -> Result<GoatLevel, DatabaseError> {
    Ok(GoatLevel {
        level: get_u32(row, 0)?,
        title: row.get(1)?,
        xp_required: get_u64(row, 2)?,
        description: get_opt_string(row, 3)?,
        badge_color: get_opt_string(row, 4)?,
    })
}

fn xp_value(xp: u64) -> i64 {
    i64::try_from(xp).unwrap_or(i64::MAX)
}

impl AmaService {
    pub async fn get_impact_score(
        &self,
        user_id: &str,
    ) -> Result<Option<CivicImpactScore>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SCORE_COLS} FROM civic_impact_scores WHERE user_id = ?1"),
                [user_id],
            )
            .await?;
        rows.next()
            .await?
            .map(|row| row_to_score(&row))
            .transpose()
    }

    /// Insert or replace a user's impact score.
    pub async fn upsert_impact_score(
        &self,
        score: &CivicImpactScore,
    ) -> Result<(), DatabaseError> {
        if !(0.0..=100.0).contains(&score.impact_rating) {
            return Err(DatabaseError::Validation(format!(
                "impact_rating {} must be between 0 and 100",
                score.impact_rating
            )));
        }

        self.write_impact_score(score).await?;
        self.audit(
            EntityType::ImpactScore,
            &score.user_id,
            AuditAction::Recalculated,
            Some(score),
        )
        .await
    }

    async fn write_impact_score(&self, score: &CivicImpactScore) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO civic_impact_scores ({SCORE_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                     ON CONFLICT (user_id) DO UPDATE SET
                         impact_rating = excluded.impact_rating,
                         trust_tier = excluded.trust_tier,
                         goat_level = excluded.goat_level,
                         goat_title = excluded.goat_title,
                         goat_xp = excluded.goat_xp,
                         actions_score = excluded.actions_score,
                         resolution_score = excluded.resolution_score,
                         community_score = excluded.community_score,
                         reliability_score = excluded.reliability_score,
                         calculated_at = excluded.calculated_at"
                ),
                libsql::params![
                    score.user_id.as_str(),
                    score.impact_rating,
                    score.trust_tier.as_str(),
                    i64::from(score.goat_level),
                    score.goat_title.as_str(),
                    xp_value(score.goat_xp),
                    score.actions_score,
                    score.resolution_score,
                    score.community_score,
                    score.reliability_score,
                    score.calculated_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(())
    }

    /// Level table ordered by level.
    pub async fn list_goat_levels(&self) -> Result<Vec<GoatLevel>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT level, title, xp_required, description, badge_color FROM goat_levels
                 ORDER BY level",
                (),
            )
            .await?;
        let mut levels = Vec::new();
        while let Some(row) = rows.next().await? {
            levels.push(row_to_level(&row)?);
        }
        Ok(levels)
    }

    pub async fn upsert_goat_level(&self, level: &GoatLevel) -> Result<(), DatabaseError> {
        if level.title.trim().is_empty() {
            return Err(DatabaseError::Validation("level title must not be empty".into()));
        }
        self.db()
            .conn()
            .execute(
                "INSERT INTO goat_levels (level, title, xp_required, description, badge_color)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (level) DO UPDATE SET
                     title = excluded.title,
                     xp_required = excluded.xp_required,
                     description = excluded.description,
                     badge_color = excluded.badge_color",
                vec![
                    libsql::Value::from(i64::from(level.level)),
                    level.title.as_str().into(),
                    xp_value(level.xp_required).into(),
                    opt_text(level.description.as_deref()),
                    opt_text(level.badge_color.as_deref()),
                ],
            )
            .await?;
        self.audit(
            EntityType::GoatLevel,
            &level.level.to_string(),
            AuditAction::Updated,
            Some(level),
        )
        .await
    }

    /// Insert the default level table where levels are missing. Returns the
    /// number of levels added.
    pub async fn seed_default_goat_levels(&self) -> Result<usize, DatabaseError> {
        let existing = self.list_goat_levels().await?;
        let mut added = 0;
        for level in default_goat_levels() {
            if existing.iter().any(|l| l.level == level.level) {
                continue;
            }
            self.upsert_goat_level(&level).await?;
            added += 1;
        }
        if added > 0 {
            tracing::info!(added, "seeded GOAT levels");
        }
        Ok(added)
    }

    /// Everything the profile badge needs: tier, band, level and progress.
    pub async fn impact_summary(&self, user_id: &str) -> Result<ImpactSummary, DatabaseError> {
        let profile = self.get_profile(user_id).await?;
        let score = self.get_impact_score(user_id).await?;
        let levels = self.list_goat_levels().await?;

        let trust_tier = resolve_trust_tier(verification_flags(&profile));
        let (goat_level, goat_xp, rating) = score.as_ref().map_or((STARTING_LEVEL, 0, 0.0), |s| {
            (s.goat_level, s.goat_xp, s.impact_rating)
        });
        let goat_title = score.as_ref().map_or_else(
            || {
                levels
                    .iter()
                    .find(|l| l.level == goat_level)
                    .map_or_else(|| STARTING_TITLE.to_string(), |l| l.title.clone())
            },
            |s| s.goat_title.clone(),
        );
        let progress = xp_progress(goat_level, goat_xp, &levels);

        Ok(ImpactSummary {
            user_id: user_id.to_string(),
            trust_label: trust_tier.label().to_string(),
            trust_tier,
            impact_band: impact_band(rating),
            goat_level,
            goat_title,
            goat_xp,
            next_level: progress.next_level,
            xp_into_level: progress.current,
            xp_for_next_level: progress.required,
            progress_percent: progress.percent,
            score,
        })
    }

    /// Add XP and promote to the highest level whose threshold is met.
    /// Levels never go down.
    pub async fn award_xp(
        &self,
        user_id: &str,
        amount: u64,
    ) -> Result<CivicImpactScore, DatabaseError> {
        let profile = self.get_profile(user_id).await?;
        let levels = self.list_goat_levels().await?;
        let now = Utc::now();

        let mut score = self
            .get_impact_score(user_id)
            .await?
            .unwrap_or_else(|| CivicImpactScore {
                user_id: user_id.to_string(),
                impact_rating: 0.0,
                trust_tier: resolve_trust_tier(verification_flags(&profile)),
                goat_level: STARTING_LEVEL,
                goat_title: STARTING_TITLE.to_string(),
                goat_xp: 0,
                actions_score: 0.0,
                resolution_score: 0.0,
                community_score: 0.0,
                reliability_score: 0.0,
                calculated_at: now,
            });

        let previous_level = score.goat_level;
        score.goat_xp = score.goat_xp.saturating_add(amount);
        score.trust_tier = resolve_trust_tier(verification_flags(&profile));
        score.calculated_at = now;
        if let Some(reached) = level_for_xp(score.goat_xp, &levels).filter(|l| l.level > previous_level) {
            score.goat_level = reached.level;
            score.goat_title.clone_from(&reached.title);
        }

        self.write_impact_score(&score).await?;

        let detail = XpAwardedDetail {
            amount,
            total_xp: score.goat_xp,
            previous_level,
            new_level: score.goat_level,
        };
        self.audit(EntityType::ImpactScore, user_id, AuditAction::Updated, Some(&detail))
            .await?;
        if score.goat_level > previous_level {
            tracing::info!(user_id, level = score.goat_level, "GOAT level up");
        }
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{citizen, official, test_service};
    use ama_core::enums::{ImpactBand, TrustTier};
    use ama_core::impact::VerificationFlags;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let svc = test_service().await;
        assert_eq!(svc.seed_default_goat_levels().await.unwrap(), 6);
        assert_eq!(svc.seed_default_goat_levels().await.unwrap(), 0);
        let levels = svc.list_goat_levels().await.unwrap();
        assert_eq!(levels.len(), 6);
        assert_eq!(levels[0].title, "Newcomer");
    }

    #[tokio::test]
    async fn summary_without_score_uses_defaults() {
        let svc = test_service().await;
        svc.seed_default_goat_levels().await.unwrap();
        let user = citizen(&svc, "imani").await;

        let summary = svc.impact_summary(&user.id).await.unwrap();
        assert_eq!(summary.score, None);
        assert_eq!(summary.trust_tier, TrustTier::Resident);
        assert_eq!(summary.impact_band, ImpactBand::Low);
        assert_eq!(summary.goat_level, 1);
        assert_eq!(summary.goat_title, "Newcomer");
        assert_eq!(summary.next_level.map(|l| l.level), Some(2));
        assert_eq!(summary.progress_percent, 0);
    }

    #[tokio::test]
    async fn trust_tier_follows_profile_flags() {
        let svc = test_service().await;
        let mp = official(&svc, "mp_verified").await;
        svc.set_verification_flags(
            &mp.id,
            VerificationFlags {
                is_verified_resident: true,
                is_verified_user: true,
                is_verified_official: true,
            },
        )
        .await
        .unwrap();
        let summary = svc.impact_summary(&mp.id).await.unwrap();
        assert_eq!(summary.trust_tier, TrustTier::VerifiedOfficial);
        assert_eq!(summary.trust_label, TrustTier::VerifiedOfficial.label());
    }

    #[tokio::test]
    async fn award_xp_promotes_across_levels() {
        let svc = test_service().await;
        svc.seed_default_goat_levels().await.unwrap();
        let user = citizen(&svc, "jabari").await;

        let score = svc.award_xp(&user.id, 50).await.unwrap();
        assert_eq!((score.goat_level, score.goat_xp), (1, 50));

        let score = svc.award_xp(&user.id, 300).await.unwrap();
        assert_eq!(score.goat_level, 3);
        assert_eq!(score.goat_title, "Community Voice");

        let summary = svc.impact_summary(&user.id).await.unwrap();
        // 350 xp: level 3 starts at 300, level 4 at 700
        assert_eq!(summary.xp_into_level, 50);
        assert_eq!(summary.xp_for_next_level, 400);
        assert_eq!(summary.progress_percent, 13);
    }

    #[tokio::test]
    async fn award_xp_writes_one_audit_entry() {
        let svc = test_service().await;
        svc.seed_default_goat_levels().await.unwrap();
        let user = citizen(&svc, "wanjiru").await;

        svc.award_xp(&user.id, 120).await.unwrap();

        let filter = crate::repos::audit::AuditFilter {
            entity_type: Some(EntityType::ImpactScore),
            entity_id: Some(user.id.clone()),
            ..Default::default()
        };
        let entries = svc.query_audit(&filter).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Updated);
    }

    #[tokio::test]
    async fn top_level_reports_full_progress() {
        let svc = test_service().await;
        svc.seed_default_goat_levels().await.unwrap();
        let user = citizen(&svc, "kioko").await;
        let score = svc.award_xp(&user.id, 10_000).await.unwrap();
        assert_eq!(score.goat_level, 6);

        let summary = svc.impact_summary(&user.id).await.unwrap();
        assert_eq!(summary.next_level, None);
        assert_eq!(summary.progress_percent, 100);
    }

    #[tokio::test]
    async fn rating_out_of_range_rejected() {
        let svc = test_service().await;
        let user = citizen(&svc, "lulu").await;
        let score = CivicImpactScore {
            user_id: user.id.clone(),
            impact_rating: 120.0,
            trust_tier: TrustTier::Resident,
            goat_level: 1,
            goat_title: "Newcomer".into(),
            goat_xp: 0,
            actions_score: 0.0,
            resolution_score: 0.0,
            community_score: 0.0,
            reliability_score: 0.0,
            calculated_at: Utc::now(),
        };
        let result = svc.upsert_impact_score(&score).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }
}
