//! Authentication: password hashing, session cookies and the guard that
//! keeps anonymous requests out of the application routes.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};

use crate::error::Result;
use crate::models::User;

mod middleware;
mod session;

pub use middleware::{LoginRequiredLayer, LoginRequiredService};
pub use session::{expired_session_cookie, session_cookie, session_token, SESSION_COOKIE};

pub const LOGIN_PATH: &str = "/login";

/// The user a request was authenticated as.
///
/// Inserted into request extensions by [`LoginRequiredLayer`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| redirect_to_login(parts.uri.path_and_query().map(|pq| pq.as_str())))
    }
}

/// `/login?next=<path>`, or bare `/login` without a path to return to.
pub fn login_url(next: Option<&str>) -> String {
    match next {
        Some(next) => match serde_urlencoded::to_string([("next", next)]) {
            Ok(query) => format!("{LOGIN_PATH}?{query}"),
            Err(_) => LOGIN_PATH.to_string(),
        },
        None => LOGIN_PATH.to_string(),
    }
}

pub fn redirect_to_login(next: Option<&str>) -> Response {
    Redirect::to(&login_url(next)).into_response()
}

/// Hash a password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes())?;
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
