#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client_id: i64,
    pub author_id: Option<i64>,
    /// Joined from `clients` for display.
    pub client_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub client_id: i64,
}
