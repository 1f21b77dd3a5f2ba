use std::str::FromStr;

use chrono::{NaiveDateTime, Utc};
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{NewClient, NewEntry, NewProject, Session, User};

mod scope;

pub use scope::{OwnerScope, Owned};

/// Schema migrations embedded from `migrations/`, applied in version order.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(config.database_url())?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// A private in-memory database. Every connection to `:memory:` opens a
    /// fresh database, so the pool is pinned to a single connection that
    /// never expires.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply any pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(self.get_pool()).await?;
        Ok(())
    }

    /// Queries restricted to rows authored by `author_id`.
    pub fn scope(&self, author_id: i64) -> OwnerScope<'_> {
        OwnerScope::new(self.get_pool(), author_id)
    }

    // User operations
    pub async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now().naive_utc())
        .fetch_one(self.get_pool())
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::DuplicateUsername(username.to_string())
            }
            err => err.into(),
        })?;

        Ok(user)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(user)
    }

    // Session operations

    /// Start a session for `user_id`. Expired sessions of every user are
    /// purged first.
    pub async fn create_session(&self, user_id: i64, ttl: chrono::Duration) -> Result<Session> {
        let now = Utc::now().naive_utc();
        self.delete_expired_sessions(now).await?;

        let token = uuid::Uuid::new_v4().simple().to_string();

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            RETURNING token, user_id, created_at, expires_at
            "#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(now)
        .bind(now + ttl)
        .fetch_one(self.get_pool())
        .await?;

        Ok(session)
    }

    /// The user behind an unexpired session token.
    pub async fn get_session_user(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.password_hash, u.created_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = ? AND s.expires_at > ?
            "#,
        )
        .bind(token)
        .bind(Utc::now().naive_utc())
        .fetch_optional(self.get_pool())
        .await?;

        Ok(user)
    }

    /// Returns the number of rows removed.
    pub async fn delete_expired_sessions(&self, now: NaiveDateTime) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(self.get_pool())
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_session(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.get_pool())
            .await?;

        Ok(())
    }

    // Client operations
    pub async fn create_client(&self, author_id: i64, client: &NewClient) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO clients (name, author_id) VALUES (?, ?) RETURNING id",
        )
        .bind(&client.name)
        .bind(author_id)
        .fetch_one(self.get_pool())
        .await?;

        Ok(id)
    }

    /// Fails with `NotFound` unless the client exists and `author_id` owns it.
    pub async fn update_client(&self, author_id: i64, id: i64, client: &NewClient) -> Result<()> {
        let result = sqlx::query("UPDATE clients SET name = ? WHERE id = ? AND author_id = ?")
            .bind(&client.name)
            .bind(id)
            .bind(author_id)
            .execute(self.get_pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    // Project operations
    pub async fn create_project(&self, author_id: i64, project: &NewProject) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO projects (name, client_id, author_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&project.name)
        .bind(project.client_id)
        .bind(author_id)
        .fetch_one(self.get_pool())
        .await?;

        Ok(id)
    }

    pub async fn update_project(
        &self,
        author_id: i64,
        id: i64,
        project: &NewProject,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE projects SET name = ?, client_id = ? WHERE id = ? AND author_id = ?",
        )
        .bind(&project.name)
        .bind(project.client_id)
        .bind(id)
        .bind(author_id)
        .execute(self.get_pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    // Entry operations
    pub async fn create_entry(&self, author_id: i64, entry: &NewEntry) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO entries (start, stop, project_id, description, author_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(entry.start)
        .bind(entry.stop)
        .bind(entry.project_id)
        .bind(&entry.description)
        .bind(author_id)
        .fetch_one(self.get_pool())
        .await?;

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Client;

    async fn setup() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn duplicate_username_is_reported() {
        let db = setup().await;
        db.create_user("alice", "x").await.unwrap();
        let err = db.create_user("alice", "y").await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUsername(name) if name == "alice"));
    }

    #[tokio::test]
    async fn expired_sessions_resolve_to_nobody() {
        let db = setup().await;
        let user = db.create_user("alice", "x").await.unwrap();

        let live = db.create_session(user.id, chrono::Duration::hours(1)).await.unwrap();
        let dead = db.create_session(user.id, chrono::Duration::hours(-1)).await.unwrap();

        assert_eq!(db.get_session_user(&live.token).await.unwrap(), Some(user));
        assert_eq!(db.get_session_user(&dead.token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn new_session_purges_expired_ones() {
        let db = setup().await;
        let user = db.create_user("alice", "x").await.unwrap();
        for _ in 0..3 {
            db.create_session(user.id, chrono::Duration::hours(-1)).await.unwrap();
        }
        let live = db.create_session(user.id, chrono::Duration::hours(1)).await.unwrap();

        let rows: Vec<String> = sqlx::query_scalar("SELECT token FROM sessions")
            .fetch_all(db.get_pool())
            .await
            .unwrap();
        assert_eq!(rows, vec![live.token]);
    }

    #[tokio::test]
    async fn purge_keeps_live_sessions() {
        let db = setup().await;
        let user = db.create_user("alice", "x").await.unwrap();
        let live = db.create_session(user.id, chrono::Duration::hours(1)).await.unwrap();

        let removed = db.delete_expired_sessions(Utc::now().naive_utc()).await.unwrap();
        assert_eq!(removed, 0);
        assert!(db.get_session_user(&live.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleted_session_no_longer_resolves() {
        let db = setup().await;
        let user = db.create_user("alice", "x").await.unwrap();
        let session = db.create_session(user.id, chrono::Duration::hours(1)).await.unwrap();

        db.delete_session(&session.token).await.unwrap();
        assert_eq!(db.get_session_user(&session.token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_client_of_another_author_is_not_found() {
        let db = setup().await;
        let alice = db.create_user("alice", "x").await.unwrap();
        let bob = db.create_user("bob", "x").await.unwrap();
        let id = db
            .create_client(alice.id, &NewClient { name: "Acme".into() })
            .await
            .unwrap();

        let err = db
            .update_client(bob.id, id, &NewClient { name: "Stolen".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        let client: Client = db.scope(alice.id).get(id).await.unwrap();
        assert_eq!(client.name, "Acme");
    }
}
