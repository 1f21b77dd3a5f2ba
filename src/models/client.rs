#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Client {
    pub id: i64,
    pub name: String,
    /// Owning user; `None` for rows created before authorship was recorded.
    pub author_id: Option<i64>,
}

/// Validated fields of the client form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
}
