//! # ama-db
//!
//! libSQL storage for the ama civic platform.
//!
//! Holds every relational record: profiles, communities, posts, comments, votes, civic
//! actions and their history, accountability records for officials, the
//! administrative hierarchy, feature flags, impact scores and the audit trail.
//! All domain operations live on [`service::AmaService`], one repo module per
//! table.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and a single connection. Provides ID generation.
pub struct AmaDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl AmaDb {
    /// Open a local database at `path` (`:memory:` for tests).
    ///
    /// Runs migrations on every open; they are idempotent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:" {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DatabaseError::Migration(format!("create {}: {e}", parent.display()))
                    })?;
                }
            }
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Must be enabled per connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let ama_db = Self { db, conn };
        ama_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(ama_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g. `"pst-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// `bytes` random bytes as upper-case hex.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn random_hex(&self, bytes: u8) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(&format!("SELECT upper(hex(randomblob({bytes})))"), ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> AmaDb {
        AmaDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "profiles",
            "communities",
            "community_members",
            "posts",
            "posts_fts",
            "comments",
            "votes",
            "civic_actions",
            "civic_action_updates",
            "civic_action_supporters",
            "government_projects",
            "development_promises",
            "attendance_sessions",
            "citizen_queries",
            "administrative_divisions",
            "government_institutions",
            "office_holders",
            "feature_flags",
            "civic_impact_scores",
            "goat_levels",
            "official_scorecards",
            "audit_trail",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("pst").await.unwrap();
        assert!(id.starts_with("pst-"), "ID should start with 'pst-': {id}");
        assert_eq!(id.len(), 12, "3 prefix + 1 dash + 8 hex: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn random_hex_length() {
        let db = test_db().await;
        let hex = db.random_hex(3).await.unwrap();
        assert_eq!(hex.len(), 6);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn file_backed_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ama.db");
        let path = path.to_str().unwrap();

        {
            let db = AmaDb::open_local(path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO goat_levels (level, title, xp_required) VALUES (1, 'Newcomer', 0)",
                    (),
                )
                .await
                .unwrap();
        }

        let db = AmaDb::open_local(path).await.unwrap();
        let mut rows = db
            .conn()
            .query("SELECT title FROM goat_levels WHERE level = 1", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "Newcomer");
    }

    #[tokio::test]
    async fn vote_uniqueness_is_enforced() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO profiles (id, username, created_at, updated_at) VALUES ('usr-1', 'amina', '2026-01-01T00:00:00+00:00', '2026-01-01T00:00:00+00:00')",
                (),
            )
            .await
            .unwrap();
        let insert = "INSERT INTO votes (id, user_id, target_type, target_id, vote_type, created_at) VALUES (?1, 'usr-1', 'post', 'pst-1', 'up', '2026-01-01T00:00:00+00:00')";
        db.conn().execute(insert, ["vot-1"]).await.unwrap();
        let dup = db.conn().execute(insert, ["vot-2"]).await;
        assert!(dup.is_err(), "second vote on the same target should be rejected");
    }
}
