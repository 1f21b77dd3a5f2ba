use chrono::{Duration, NaiveDateTime};

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: i64,
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
    pub project_id: i64,
    pub description: String,
    pub author_id: Option<i64>,
    pub project_name: String,
}

impl Entry {
    pub fn duration(&self) -> Duration {
        self.stop - self.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
    pub project_id: i64,
    pub description: String,
}
