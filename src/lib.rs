//! A small time-tracking web application: clients, projects and time
//! entries, each visible only to the user who created them.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod models;
pub mod templates;
pub mod views;

pub use config::Config;
pub use db::Database;
pub use error::{AppError, Result};
pub use views::{router, AppState};
