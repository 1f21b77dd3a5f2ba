use serde::Deserialize;

use super::{FormErrors, REQUIRED};

pub const INVALID_LOGIN: &str = "Please enter a correct username and password.";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: String,
}

impl LoginForm {
    /// Checks presence only; credentials are verified against the store.
    pub fn validate(&self) -> Result<(&str, &str), FormErrors> {
        let mut errors = FormErrors::default();
        let username = self.username.trim();
        if username.is_empty() {
            errors.add("username", REQUIRED);
        }
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }

        errors.finish(|| (username, self.password.as_str()))
    }

    pub fn invalid_credentials() -> FormErrors {
        let mut errors = FormErrors::default();
        errors.add_non_field(INVALID_LOGIN);
        errors
    }
}

/// Where to send the user after login. Only local absolute paths are
/// honored, so `next` cannot bounce the user to another site.
pub fn safe_next(next: &str) -> Option<&str> {
    let next = next.trim();
    // Browsers drop tabs and newlines while parsing, so "/\t/host" would
    // become "//host".
    let local = next.starts_with('/')
        && !next.starts_with("//")
        && !next.starts_with("/\\")
        && !next.chars().any(|c| c.is_ascii_control());
    local.then_some(next)
}
