//! Comment repository: threaded replies, comment counters and moderation.

use chrono::Utc;

use ama_core::audit_detail::HiddenDetail;
use ama_core::entities::Comment;
use ama_core::enums::{AuditAction, EntityType};
use ama_core::ids::PREFIX_COMMENT;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, get_u32, parse_datetime};
use crate::service::AmaService;

const SELECT_COLS: &str = "id, post_id, author_id, parent_id, content, depth, upvotes, downvotes, \
     is_hidden, moderation_reason, created_at, updated_at";

/// Replies nest at most this deep; deeper replies attach to the deepest level.
pub const MAX_COMMENT_DEPTH: u32 = 8;

fn row_to_comment(row: &libsql::Row) -> Result<Comment, DatabaseError> {
    Ok(Comment {
        id: row.get(0)?,
        post_id: row.get(1)?,
        author_id: row.get(2)?,
        parent_id: get_opt_string(row, 3)?,
        content: row.get(4)?,
        depth: get_u32(row, 5)?,
        upvotes: get_u32(row, 6)?,
        downvotes: get_u32(row, 7)?,
        is_hidden: get_bool(row, 8)?,
        moderation_reason: get_opt_string(row, 9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

impl AmaService {
    /// Add a comment to a post, optionally replying to another comment on
    /// the same post. Bumps the post's `comment_count`.
    pub async fn create_comment(
        &self,
        post_id: &str,
        author_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<Comment, DatabaseError> {
        if content.trim().is_empty() {
            return Err(DatabaseError::Validation("comment must not be empty".into()));
        }
        self.get_post(post_id).await?;

        let depth = match parent_id {
            Some(parent_id) => {
                let parent = self.get_comment(parent_id).await?;
                if parent.post_id != post_id {
                    return Err(DatabaseError::Validation(format!(
                        "comment {parent_id} belongs to a different post"
                    )));
                }
                (parent.depth + 1).min(MAX_COMMENT_DEPTH)
            }
            None => 0,
        };

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_COMMENT).await?;

        let tx = self.db().conn().transaction().await?;
        tx.execute(
            "INSERT INTO comments (id, post_id, author_id, parent_id, content, depth, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            libsql::params![
                id.as_str(),
                post_id,
                author_id,
                parent_id,
                content,
                i64::from(depth),
                now.to_rfc3339(),
                now.to_rfc3339()
            ],
        )
        .await?;
        tx.execute(
            "UPDATE posts SET comment_count = comment_count + 1 WHERE id = ?1",
            [post_id],
        )
        .await?;
        self.audit::<()>(EntityType::Comment, &id, AuditAction::Created, None)
            .await?;
        tx.commit().await?;

        Ok(Comment {
            id,
            post_id: post_id.to_string(),
            author_id: author_id.to_string(),
            parent_id: parent_id.map(String::from),
            content: content.to_string(),
            depth,
            upvotes: 0,
            downvotes: 0,
            is_hidden: false,
            moderation_reason: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_comment(&self, id: &str) -> Result<Comment, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM comments WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_comment(&row)
    }

    /// Comments on a post, oldest first. Hidden comments are skipped unless
    /// `include_hidden` is set (moderator view).
    pub async fn list_comments(
        &self,
        post_id: &str,
        include_hidden: bool,
    ) -> Result<Vec<Comment>, DatabaseError> {
        let hidden_clause = if include_hidden { "" } else { "AND is_hidden = 0" };
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM comments WHERE post_id = ?1 {hidden_clause}
                     ORDER BY created_at, rowid"
                ),
                [post_id],
            )
            .await?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next().await? {
            comments.push(row_to_comment(&row)?);
        }
        Ok(comments)
    }

    /// Delete a comment and its replies, keeping the post's counter in step.
    pub async fn delete_comment(&self, comment_id: &str) -> Result<(), DatabaseError> {
        let comment = self.get_comment(comment_id).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "WITH RECURSIVE thread(id) AS (
                     SELECT ?1
                     UNION ALL
                     SELECT c.id FROM comments c JOIN thread t ON c.parent_id = t.id
                 )
                 SELECT count(*) FROM thread",
                [comment_id],
            )
            .await?;
        let removed = rows
            .next()
            .await?
            .ok_or(DatabaseError::NoResult)?
            .get::<i64>(0)?;

        let tx = self.db().conn().transaction().await?;
        tx.execute(
            "DELETE FROM votes WHERE target_type = 'comment' AND target_id IN (
                 WITH RECURSIVE thread(id) AS (
                     SELECT ?1
                     UNION ALL
                     SELECT c.id FROM comments c JOIN thread t ON c.parent_id = t.id
                 )
                 SELECT id FROM thread
             )",
            [comment_id],
        )
        .await?;
        tx.execute("DELETE FROM comments WHERE id = ?1", [comment_id])
            .await?;
        tx.execute(
            "UPDATE posts SET comment_count = max(0, comment_count - ?1) WHERE id = ?2",
            libsql::params![removed, comment.post_id.as_str()],
        )
        .await?;
        self.audit::<()>(EntityType::Comment, comment_id, AuditAction::Deleted, None)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Hide a comment from public listings.
    pub async fn hide_comment(
        &self,
        comment_id: &str,
        reason: Option<&str>,
    ) -> Result<Comment, DatabaseError> {
        self.set_comment_hidden(comment_id, true, reason).await
    }

    pub async fn unhide_comment(&self, comment_id: &str) -> Result<Comment, DatabaseError> {
        self.set_comment_hidden(comment_id, false, None).await
    }

    async fn set_comment_hidden(
        &self,
        comment_id: &str,
        hidden: bool,
        reason: Option<&str>,
    ) -> Result<Comment, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE comments SET is_hidden = ?1, moderation_reason = ?2, updated_at = ?3 WHERE id = ?4",
                libsql::params![
                    i64::from(hidden),
                    reason,
                    Utc::now().to_rfc3339(),
                    comment_id
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        let (action, detail) = if hidden {
            (
                AuditAction::Hidden,
                Some(HiddenDetail {
                    reason: reason.map(String::from),
                }),
            )
        } else {
            (AuditAction::Unhidden, None)
        };
        self.audit(EntityType::Comment, comment_id, action, detail.as_ref())
            .await?;
        tracing::debug!(comment_id, hidden, "comment moderation");
        self.get_comment(comment_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{citizen, test_service};
    use ama_core::enums::{VoteTarget, VoteType};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn replies_nest_and_count() {
        let svc = test_service().await;
        let author = citizen(&svc, "hassan").await;
        let post = svc
            .create_post(&author.id, "Road repairs", "", &[], None)
            .await
            .unwrap();

        let top = svc
            .create_comment(&post.id, &author.id, "When?", None)
            .await
            .unwrap();
        let reply = svc
            .create_comment(&post.id, &author.id, "Next week", Some(&top.id))
            .await
            .unwrap();
        assert_eq!(top.depth, 0);
        assert_eq!(reply.depth, 1);
        assert_eq!(reply.parent_id.as_deref(), Some(top.id.as_str()));

        let post = svc.get_post(&post.id).await.unwrap();
        assert_eq!(post.comment_count, 2);
    }

    #[tokio::test]
    async fn reply_must_share_post() {
        let svc = test_service().await;
        let author = citizen(&svc, "irene").await;
        let a = svc.create_post(&author.id, "A", "", &[], None).await.unwrap();
        let b = svc.create_post(&author.id, "B", "", &[], None).await.unwrap();
        let on_a = svc
            .create_comment(&a.id, &author.id, "hi", None)
            .await
            .unwrap();

        let result = svc
            .create_comment(&b.id, &author.id, "cross", Some(&on_a.id))
            .await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn failed_comment_insert_leaves_counter_unchanged() {
        let svc = test_service().await;
        let author = citizen(&svc, "kamau").await;
        let post = svc.create_post(&author.id, "P", "", &[], None).await.unwrap();

        // Unknown author trips the foreign key after the post lookup.
        let result = svc
            .create_comment(&post.id, "usr-ghost000", "hello", None)
            .await;
        assert!(result.is_err());
        assert_eq!(svc.get_post(&post.id).await.unwrap().comment_count, 0);

        svc.create_comment(&post.id, &author.id, "real", None)
            .await
            .unwrap();
        assert_eq!(svc.get_post(&post.id).await.unwrap().comment_count, 1);
    }

    #[tokio::test]
    async fn deleting_thread_clears_its_votes() {
        let svc = test_service().await;
        let author = citizen(&svc, "lwazi").await;
        let voter = citizen(&svc, "moraa").await;
        let post = svc.create_post(&author.id, "P", "", &[], None).await.unwrap();
        let top = svc
            .create_comment(&post.id, &author.id, "top", None)
            .await
            .unwrap();
        let reply = svc
            .create_comment(&post.id, &author.id, "reply", Some(&top.id))
            .await
            .unwrap();
        svc.cast_vote(&voter.id, VoteTarget::Comment, &reply.id, VoteType::Up)
            .await
            .unwrap();
        assert_eq!(svc.get_profile(&author.id).await.unwrap().comment_karma, 1);

        svc.delete_comment(&top.id).await.unwrap();
        assert!(svc
            .get_vote(&voter.id, VoteTarget::Comment, &reply.id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(svc.get_post(&post.id).await.unwrap().comment_count, 0);
        assert_eq!(svc.get_profile(&author.id).await.unwrap().comment_karma, 0);
    }

    #[tokio::test]
    async fn comment_on_missing_post() {
        let svc = test_service().await;
        let author = citizen(&svc, "joseph").await;
        let result = svc
            .create_comment("pst-missing0", &author.id, "hello", None)
            .await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn hide_and_unhide() {
        let svc = test_service().await;
        let author = citizen(&svc, "kevin").await;
        let post = svc.create_post(&author.id, "P", "", &[], None).await.unwrap();
        let comment = svc
            .create_comment(&post.id, &author.id, "spam spam", None)
            .await
            .unwrap();

        let hidden = svc.hide_comment(&comment.id, Some("spam")).await.unwrap();
        assert!(hidden.is_hidden);
        assert_eq!(hidden.moderation_reason.as_deref(), Some("spam"));
        assert!(svc.list_comments(&post.id, false).await.unwrap().is_empty());
        assert_eq!(svc.list_comments(&post.id, true).await.unwrap().len(), 1);

        let visible = svc.unhide_comment(&comment.id).await.unwrap();
        assert!(!visible.is_hidden);
        assert_eq!(visible.moderation_reason, None);
        assert_eq!(svc.list_comments(&post.id, false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_thread_updates_counter() {
        let svc = test_service().await;
        let author = citizen(&svc, "lucy").await;
        let post = svc.create_post(&author.id, "P", "", &[], None).await.unwrap();
        let top = svc
            .create_comment(&post.id, &author.id, "top", None)
            .await
            .unwrap();
        svc.create_comment(&post.id, &author.id, "reply", Some(&top.id))
            .await
            .unwrap();
        svc.create_comment(&post.id, &author.id, "other", None)
            .await
            .unwrap();

        svc.delete_comment(&top.id).await.unwrap();
        let post = svc.get_post(&post.id).await.unwrap();
        assert_eq!(post.comment_count, 1);
        assert_eq!(svc.list_comments(&post.id, true).await.unwrap().len(), 1);
    }
}
