//! Ownership filtering shared by every authored table.

use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::FromRow;

use crate::error::{AppError, Result};
use crate::models::{Client, Entry, Project};

/// A row type whose table carries a nullable `author_id` column.
pub trait Owned: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static {
    /// `SELECT ... FROM <table> <alias>` producing the row's columns.
    const SELECT: &'static str;
    const ALIAS: &'static str;
    const ORDER_BY: &'static str;
}

impl Owned for Client {
    const SELECT: &'static str = "SELECT c.id, c.name, c.author_id FROM clients c";
    const ALIAS: &'static str = "c";
    const ORDER_BY: &'static str = "c.name ASC, c.id ASC";
}

impl Owned for Project {
    const SELECT: &'static str = r#"
        SELECT p.id, p.name, p.client_id, p.author_id, c.name AS client_name
        FROM projects p
        JOIN clients c ON c.id = p.client_id"#;
    const ALIAS: &'static str = "p";
    const ORDER_BY: &'static str = "p.name ASC, p.id ASC";
}

impl Owned for Entry {
    const SELECT: &'static str = r#"
        SELECT e.id, e.start, e.stop, e.project_id, e.description, e.author_id,
               p.name AS project_name
        FROM entries e
        JOIN projects p ON p.id = e.project_id"#;
    const ALIAS: &'static str = "e";
    const ORDER_BY: &'static str = "e.start DESC, e.id DESC";
}

/// Queries that only see rows whose author is one user.
///
/// Rows with a NULL author match no scope.
pub struct OwnerScope<'a> {
    pool: &'a SqlitePool,
    author_id: i64,
}

impl<'a> OwnerScope<'a> {
    pub fn new(pool: &'a SqlitePool, author_id: i64) -> Self {
        Self { pool, author_id }
    }

    pub async fn all<T: Owned>(&self) -> Result<Vec<T>> {
        let sql = format!(
            "{} WHERE {}.author_id = ? ORDER BY {}",
            T::SELECT,
            T::ALIAS,
            T::ORDER_BY
        );

        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(self.author_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn find<T: Owned>(&self, id: i64) -> Result<Option<T>> {
        let sql = format!(
            "{select} WHERE {alias}.author_id = ? AND {alias}.id = ?",
            select = T::SELECT,
            alias = T::ALIAS
        );

        let row = sqlx::query_as::<_, T>(&sql)
            .bind(self.author_id)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Like [`find`](Self::find), but a missing or foreign row is `NotFound`.
    pub async fn get<T: Owned>(&self, id: i64) -> Result<T> {
        self.find(id).await?.ok_or(AppError::NotFound)
    }
}
