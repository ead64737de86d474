//! Vote repository.
//!
//! A vote toggles: repeating it removes it, the opposite direction flips it.
//! The vote row and the target's counters change in one transaction.

use chrono::Utc;

use ama_core::audit_detail::VotedDetail;
use ama_core::entities::Vote;
use ama_core::enums::{AuditAction, EntityType, VoteAction, VoteTarget, VoteType};
use ama_core::ids::PREFIX_VOTE;
use ama_core::responses::VoteResponse;
use ama_core::votes::resolve_vote;

use crate::error::DatabaseError;
use crate::helpers::{entity_type_to_table, get_u32, parse_datetime, parse_enum};
use crate::service::AmaService;

const fn target_entity(target: VoteTarget) -> EntityType {
    match target {
        VoteTarget::Post => EntityType::Post,
        VoteTarget::Comment => EntityType::Comment,
    }
}

fn row_to_vote(row: &libsql::Row) -> Result<Vote, DatabaseError> {
    Ok(Vote {
        id: row.get(0)?,
        user_id: row.get(1)?,
        target: parse_enum(&row.get::<String>(2)?)?,
        target_id: row.get(3)?,
        vote_type: parse_enum(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl AmaService {
    /// The user's current vote on a target, if any.
    pub async fn get_vote(
        &self,
        user_id: &str,
        target: VoteTarget,
        target_id: &str,
    ) -> Result<Option<Vote>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, user_id, target_type, target_id, vote_type, created_at FROM votes
                 WHERE user_id = ?1 AND target_type = ?2 AND target_id = ?3",
                libsql::params![user_id, target.as_str(), target_id],
            )
            .await?;
        rows.next()
            .await?
            .map(|row| row_to_vote(&row))
            .transpose()
    }

    /// Apply a vote toggle and return the target's new counters.
    pub async fn cast_vote(
        &self,
        user_id: &str,
        target: VoteTarget,
        target_id: &str,
        vote_type: VoteType,
    ) -> Result<VoteResponse, DatabaseError> {
        let table = entity_type_to_table(target_entity(target));
        // Missing target surfaces as NoResult.
        self.vote_counts(table, target_id).await?;

        let tx = self.db().conn().transaction().await?;

        let existing = self.get_vote(user_id, target, target_id).await?;
        let outcome = resolve_vote(existing.as_ref().map(|v| v.vote_type), vote_type);

        match (outcome.action, existing) {
            (VoteAction::Added, _) => {
                let id = self.db().generate_id(PREFIX_VOTE).await?;
                tx.execute(
                    "INSERT INTO votes (id, user_id, target_type, target_id, vote_type, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    libsql::params![
                        id.as_str(),
                        user_id,
                        target.as_str(),
                        target_id,
                        vote_type.as_str(),
                        Utc::now().to_rfc3339()
                    ],
                )
                .await?;
            }
            (VoteAction::Removed, Some(prev)) => {
                tx.execute("DELETE FROM votes WHERE id = ?1", [prev.id.as_str()])
                    .await?;
            }
            (VoteAction::Changed, Some(prev)) => {
                tx.execute(
                    "UPDATE votes SET vote_type = ?1, created_at = ?2 WHERE id = ?3",
                    libsql::params![vote_type.as_str(), Utc::now().to_rfc3339(), prev.id.as_str()],
                )
                .await?;
            }
            (action, None) => {
                return Err(DatabaseError::InvalidState(format!(
                    "vote outcome {action} without an existing vote"
                )));
            }
        }

        tx.execute(
            &format!(
                "UPDATE {table} SET upvotes = upvotes + ?1, downvotes = downvotes + ?2 WHERE id = ?3"
            ),
            libsql::params![outcome.up_delta, outcome.down_delta, target_id],
        )
        .await?;

        let detail = VotedDetail {
            target,
            vote_type,
            outcome: outcome.action,
        };
        self.audit(target_entity(target), target_id, AuditAction::Voted, Some(&detail))
            .await?;

        tx.commit().await?;

        let (upvotes, downvotes) = self.vote_counts(table, target_id).await?;
        tracing::debug!(user_id, target_id, action = %outcome.action, "vote cast");
        Ok(VoteResponse {
            target,
            target_id: target_id.to_string(),
            action: outcome.action,
            vote_type: outcome.new_vote,
            upvotes,
            downvotes,
        })
    }

    async fn vote_counts(&self, table: &str, target_id: &str) -> Result<(u32, u32), DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT upvotes, downvotes FROM {table} WHERE id = ?1"),
                [target_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok((get_u32(&row, 0)?, get_u32(&row, 1)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{citizen, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn toggle_sequence_on_post() {
        let svc = test_service().await;
        let author = citizen(&svc, "mercy").await;
        let voter = citizen(&svc, "njoroge").await;
        let post = svc.create_post(&author.id, "P", "", &[], None).await.unwrap();

        let added = svc
            .cast_vote(&voter.id, VoteTarget::Post, &post.id, VoteType::Up)
            .await
            .unwrap();
        assert_eq!(added.action, VoteAction::Added);
        assert_eq!((added.upvotes, added.downvotes), (1, 0));

        let changed = svc
            .cast_vote(&voter.id, VoteTarget::Post, &post.id, VoteType::Down)
            .await
            .unwrap();
        assert_eq!(changed.action, VoteAction::Changed);
        assert_eq!((changed.upvotes, changed.downvotes), (0, 1));
        assert_eq!(
            svc.get_vote(&voter.id, VoteTarget::Post, &post.id)
                .await
                .unwrap()
                .map(|v| v.vote_type),
            Some(VoteType::Down)
        );

        let removed = svc
            .cast_vote(&voter.id, VoteTarget::Post, &post.id, VoteType::Down)
            .await
            .unwrap();
        assert_eq!(removed.action, VoteAction::Removed);
        assert_eq!(removed.vote_type, None);
        assert_eq!((removed.upvotes, removed.downvotes), (0, 0));
        assert!(svc
            .get_vote(&voter.id, VoteTarget::Post, &post.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn votes_from_several_users_accumulate() {
        let svc = test_service().await;
        let author = citizen(&svc, "olive").await;
        let post = svc.create_post(&author.id, "P", "", &[], None).await.unwrap();
        let comment = svc
            .create_comment(&post.id, &author.id, "c", None)
            .await
            .unwrap();

        for name in ["u1", "u2", "u3"] {
            let voter = citizen(&svc, name).await;
            svc.cast_vote(&voter.id, VoteTarget::Comment, &comment.id, VoteType::Up)
                .await
                .unwrap();
        }
        let comment = svc.get_comment(&comment.id).await.unwrap();
        assert_eq!(comment.upvotes, 3);
        assert_eq!(comment.downvotes, 0);
    }

    #[tokio::test]
    async fn karma_follows_votes_on_posts_and_comments() {
        let svc = test_service().await;
        let author = citizen(&svc, "rehema").await;
        let post = svc.create_post(&author.id, "P", "", &[], None).await.unwrap();
        let comment = svc
            .create_comment(&post.id, &author.id, "c", None)
            .await
            .unwrap();
        let a = citizen(&svc, "sam").await;
        let b = citizen(&svc, "tumaini").await;

        svc.cast_vote(&a.id, VoteTarget::Post, &post.id, VoteType::Up).await.unwrap();
        svc.cast_vote(&b.id, VoteTarget::Post, &post.id, VoteType::Up).await.unwrap();
        svc.cast_vote(&a.id, VoteTarget::Comment, &comment.id, VoteType::Down)
            .await
            .unwrap();

        let profile = svc.get_profile(&author.id).await.unwrap();
        assert_eq!((profile.post_karma, profile.comment_karma, profile.karma), (2, -1, 1));

        // b flips to a downvote, a withdraws theirs
        svc.cast_vote(&b.id, VoteTarget::Post, &post.id, VoteType::Down).await.unwrap();
        svc.cast_vote(&a.id, VoteTarget::Comment, &comment.id, VoteType::Down)
            .await
            .unwrap();

        let stats = svc.user_stats(&author.id).await.unwrap();
        assert_eq!((stats.post_karma, stats.comment_karma, stats.karma), (0, 0, 0));
        let voter = svc.get_profile(&a.id).await.unwrap();
        assert_eq!(voter.karma, 0);
    }

    #[tokio::test]
    async fn vote_on_missing_target() {
        let svc = test_service().await;
        let voter = citizen(&svc, "peter").await;
        let result = svc
            .cast_vote(&voter.id, VoteTarget::Post, "pst-missing0", VoteType::Up)
            .await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }
}
