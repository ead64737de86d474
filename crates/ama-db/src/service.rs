//! Service layer orchestrating database mutations with an audit trail.
//!
//! `AmaService` wraps `AmaDb` and the acting user. All repo methods are
//! implemented as `impl AmaService` blocks under [`crate::repos`].

use crate::AmaDb;
use crate::error::DatabaseError;

/// Runs every domain operation against one database connection.
///
/// Every mutation:
/// 1. Validates input and state-machine rules
/// 2. Executes SQL
/// 3. Appends an audit entry attributed to [`AmaService::actor`]
pub struct AmaService {
    db: AmaDb,
    actor: Option<String>,
}

impl AmaService {
    /// Open (or create) a local database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = AmaDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Wrap an existing handle with no actor.
    #[must_use]
    pub const fn from_db(db: AmaDb) -> Self {
        Self { db, actor: None }
    }

    /// Attribute subsequent mutations to `actor` in the audit trail.
    #[must_use]
    pub fn with_actor(mut self, actor: Option<String>) -> Self {
        self.actor = actor;
        self
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &AmaDb {
        &self.db
    }

    /// The user ID recorded on audit entries, if any.
    #[must_use]
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}
