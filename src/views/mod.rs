//! HTTP routing and request handlers.

use std::sync::Arc;

use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::auth::LoginRequiredLayer;
use crate::config::Config;
use crate::db::Database;
use crate::error::{self, AppError, Result};

mod accounts;
mod clients;
mod entries;
mod extract;
mod projects;

pub use extract::FormData;

pub const CLIENT_LIST: &str = "/clients";
pub const PROJECT_LIST: &str = "/projects";
pub const ENTRY_LIST: &str = "/entries";

pub fn client_detail_url(id: i64) -> String {
    format!("{CLIENT_LIST}/{id}")
}

pub fn project_detail_url(id: i64) -> String {
    format!("{PROJECT_LIST}/{id}")
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(accounts::root))
        .route(CLIENT_LIST, get(clients::list).post(clients::create))
        .route("/clients/{id}", get(clients::detail).post(clients::update))
        .route(PROJECT_LIST, get(projects::list).post(projects::create))
        .route("/projects/{id}", get(projects::detail).post(projects::update))
        .route(ENTRY_LIST, get(entries::list).post(entries::create))
        .route_layer(LoginRequiredLayer::new(state.db.clone()));

    Router::new()
        .route("/login", get(accounts::login_form).post(accounts::login))
        .route("/logout", get(accounts::logout).post(accounts::logout))
        .merge(protected)
        .fallback(fallback)
        .with_state(state)
}

async fn fallback() -> Response {
    error::not_found()
}

/// Primary keys in paths; anything that isn't one is simply not found.
fn parse_id(raw: &str) -> Result<i64> {
    raw.parse().map_err(|_| AppError::NotFound)
}
