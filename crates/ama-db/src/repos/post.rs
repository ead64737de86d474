//! Post repository: CRUD, ranked feed pages, trending and FTS search.
//!
//! `new` and `top` pages are ordered and cut in SQL. `hot` and `rising` depend
//! on post age at read time and are ranked with `ama_core::feed::sort_posts`,
//! which breaks ties the same way (`created_at` descending, then `id`).

use chrono::{DateTime, Duration, Utc};

use ama_core::entities::Post;
use ama_core::enums::{AuditAction, EntityType, FeedSort};
use ama_core::feed::{Page, sort_posts};
use ama_core::ids::PREFIX_POST;
use ama_core::responses::{FeedItem, FeedPage};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u32, parse_datetime, parse_string_list};
use crate::service::AmaService;
use crate::updates::SetClauses;
use crate::updates::post::PostUpdate;

const SELECT_COLS: &str = "id, author_id, community_id, title, content, tags, upvotes, downvotes, \
     comment_count, created_at, updated_at";

/// Window considered for the trending list.
const TRENDING_WINDOW_HOURS: i64 = 72;

fn row_to_post(row: &libsql::Row) -> Result<Post, DatabaseError> {
    Ok(Post {
        id: row.get(0)?,
        author_id: row.get(1)?,
        community_id: get_opt_string(row, 2)?,
        title: row.get(3)?,
        content: row.get(4)?,
        tags: parse_string_list(&row.get::<String>(5)?)?,
        upvotes: get_u32(row, 6)?,
        downvotes: get_u32(row, 7)?,
        comment_count: get_u32(row, 8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

/// Quote each whitespace-separated term as an FTS5 string so punctuation and
/// operator words (`AND`, `NEAR`) match literally. Terms without a letter or
/// digit are dropped; `None` when nothing searchable remains.
fn fts_query(input: &str) -> Option<String> {
    let terms = input
        .split_whitespace()
        .filter(|term| term.chars().any(char::is_alphanumeric))
        .map(|term| format!("\"{}\"", term.replace('"', "\"\"")))
        .collect::<Vec<_>>();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}

const fn sql_order(sort: FeedSort) -> Option<&'static str> {
    match sort {
        FeedSort::New => Some("created_at DESC, id"),
        FeedSort::Top => Some("(upvotes - downvotes) DESC, created_at DESC, id"),
        FeedSort::Hot | FeedSort::Rising => None,
    }
}

fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

impl AmaService {
    pub async fn create_post(
        &self,
        author_id: &str,
        title: &str,
        content: &str,
        tags: &[String],
        community_id: Option<&str>,
    ) -> Result<Post, DatabaseError> {
        if title.trim().is_empty() {
            return Err(DatabaseError::Validation("post title must not be empty".into()));
        }
        if let Some(community) = community_id {
            self.get_community(community).await?;
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_POST).await?;
        let tags = normalize_tags(tags);

        self.db()
            .conn()
            .execute(
                "INSERT INTO posts (id, author_id, community_id, title, content, tags, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    author_id,
                    community_id,
                    title,
                    content,
                    serde_json::to_string(&tags)?,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        self.audit::<()>(EntityType::Post, &id, AuditAction::Created, None)
            .await?;

        Ok(Post {
            id,
            author_id: author_id.to_string(),
            community_id: community_id.map(String::from),
            title: title.to_string(),
            content: content.to_string(),
            tags,
            upvotes: 0,
            downvotes: 0,
            comment_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM posts WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_post(&row)
    }

    pub async fn update_post(&self, post_id: &str, update: PostUpdate) -> Result<Post, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(ref title) = update.title {
            if title.trim().is_empty() {
                return Err(DatabaseError::Validation("post title must not be empty".into()));
            }
            sets.push("title", title.clone());
        }
        if let Some(ref content) = update.content {
            sets.push("content", content.clone());
        }
        if let Some(ref tags) = update.tags {
            sets.push("tags", serde_json::to_string(&normalize_tags(tags))?);
        }
        if let Some(ref community_id) = update.community_id {
            sets.push("community_id", community_id.clone());
        }

        if sets.is_empty() {
            return self.get_post(post_id).await;
        }
        sets.push("updated_at", Utc::now().to_rfc3339());

        let (sql, params) = sets.into_update("posts", "id", post_id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.audit(EntityType::Post, post_id, AuditAction::Updated, Some(&update))
            .await?;
        self.get_post(post_id).await
    }

    /// Delete a post with its comments and any votes cast on them.
    pub async fn delete_post(&self, post_id: &str) -> Result<(), DatabaseError> {
        let tx = self.db().conn().transaction().await?;
        tx.execute(
            "DELETE FROM votes WHERE (target_type = 'post' AND target_id = ?1)
             OR (target_type = 'comment' AND target_id IN (SELECT id FROM comments WHERE post_id = ?1))",
            [post_id],
        )
        .await?;
        let changed = tx
            .execute("DELETE FROM posts WHERE id = ?1", [post_id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.audit::<()>(EntityType::Post, post_id, AuditAction::Deleted, None)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn list_posts_by_author(
        &self,
        author_id: &str,
        limit: u32,
    ) -> Result<Vec<Post>, DatabaseError> {
        self.query_posts(
            &format!(
                "SELECT {SELECT_COLS} FROM posts WHERE author_id = ?1
                 ORDER BY created_at DESC LIMIT {limit}"
            ),
            vec![author_id.into()],
        )
        .await
    }

    /// One page of the feed, ranked at `now`.
    pub async fn feed_at(
        &self,
        sort: FeedSort,
        page: Page,
        community_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, DatabaseError> {
        let (filter, mut params) = match community_id {
            Some(community) => ("WHERE community_id = ?1", vec![libsql::Value::from(community)]),
            None => ("", Vec::new()),
        };

        if let Some(order) = sql_order(sort) {
            let next = params.len() + 1;
            params.push(i64::from(page.size).into());
            params.push(i64::try_from(page.offset()).unwrap_or(i64::MAX).into());
            return self
                .query_posts(
                    &format!(
                        "SELECT {SELECT_COLS} FROM posts {filter}
                         ORDER BY {order} LIMIT ?{next} OFFSET ?{}",
                        next + 1
                    ),
                    params,
                )
                .await;
        }

        let mut posts = self
            .query_posts(&format!("SELECT {SELECT_COLS} FROM posts {filter}"), params)
            .await?;
        sort_posts(&mut posts, sort, now);

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        Ok(posts
            .into_iter()
            .skip(offset)
            .take(page.size as usize)
            .collect())
    }

    /// Feed page with previews and a next-page flag.
    pub async fn feed_page(
        &self,
        sort: FeedSort,
        page: Page,
        community_id: Option<&str>,
        preview_length: usize,
    ) -> Result<FeedPage, DatabaseError> {
        let posts = self.feed_at(sort, page, community_id, Utc::now()).await?;
        Ok(FeedPage {
            sort,
            page: page.index,
            page_size: page.size,
            has_next_page: page.has_next(posts.len()),
            items: posts
                .iter()
                .map(|p| FeedItem::from_post(p, preview_length))
                .collect(),
        })
    }

    /// Hottest posts from the last few days.
    pub async fn trending_posts_at(
        &self,
        limit: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, DatabaseError> {
        let since = now - Duration::hours(TRENDING_WINDOW_HOURS);
        let mut posts = self
            .query_posts(
                &format!("SELECT {SELECT_COLS} FROM posts WHERE created_at >= ?1"),
                vec![since.to_rfc3339().into()],
            )
            .await?;
        sort_posts(&mut posts, FeedSort::Hot, now);
        posts.truncate(limit as usize);
        Ok(posts)
    }

    /// Full-text search over titles and content. Every term must match.
    pub async fn search_posts(&self, query: &str, limit: u32) -> Result<Vec<Post>, DatabaseError> {
        let Some(expression) = fts_query(query) else {
            return Ok(Vec::new());
        };
        self.query_posts(
            "SELECT p.id, p.author_id, p.community_id, p.title, p.content, p.tags, p.upvotes, \
             p.downvotes, p.comment_count, p.created_at, p.updated_at \
             FROM posts_fts \
             JOIN posts p ON p.rowid = posts_fts.rowid \
             WHERE posts_fts MATCH ?1 \
             ORDER BY rank LIMIT ?2",
            vec![expression.into(), i64::from(limit).into()],
        )
        .await
    }

    async fn query_posts(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<Post>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next().await? {
            posts.push(row_to_post(&row)?);
        }
        Ok(posts)
    }
}
