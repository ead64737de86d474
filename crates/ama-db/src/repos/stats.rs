//! Per-user activity counters.

use ama_core::enums::CivicActionStatus;
use ama_core::responses::UserStats;

use crate::error::DatabaseError;
use crate::service::AmaService;

impl AmaService {
    /// Posts, comments and civic actions by a user, with their karma, impact
    /// rating and level (0 and 1 when no score exists).
    pub async fn user_stats(&self, user_id: &str) -> Result<UserStats, DatabaseError> {
        let profile = self.get_profile(user_id).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT
                     (SELECT count(*) FROM posts WHERE author_id = ?1),
                     (SELECT count(*) FROM comments WHERE author_id = ?1),
                     (SELECT count(*) FROM civic_actions WHERE user_id = ?1),
                     (SELECT count(*) FROM civic_actions WHERE user_id = ?1 AND status = ?2)",
                libsql::params![user_id, CivicActionStatus::Resolved.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = |idx: i32| -> Result<u32, DatabaseError> {
            let raw = row.get::<i64>(idx)?;
            u32::try_from(raw).map_err(|_| DatabaseError::Query(format!("count {raw} out of range")))
        };
        let (posts, comments, civic_actions, resolved_actions) =
            (count(0)?, count(1)?, count(2)?, count(3)?);

        let score = self.get_impact_score(user_id).await?;
        Ok(UserStats {
            user_id: user_id.to_string(),
            posts,
            comments,
            civic_actions,
            resolved_actions,
            post_karma: profile.post_karma,
            comment_karma: profile.comment_karma,
            karma: profile.karma,
            impact_rating: score.as_ref().map_or(0.0, |s| s.impact_rating),
            goat_level: score.as_ref().map_or(1, |s| s.goat_level),
        })
    }
}
