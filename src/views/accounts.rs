use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use super::{AppState, FormData, CLIENT_LIST};
use crate::auth::{expired_session_cookie, session_cookie, session_token, verify_password, CurrentUser};
use crate::error::Result;
use crate::forms::{safe_next, FormErrors, LoginForm};
use crate::templates;

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    next: String,
}

fn render_login(form: &LoginForm, errors: &FormErrors) -> Response {
    Html(templates::login_page(form, errors)).into_response()
}

pub async fn login_form(Query(query): Query<NextQuery>) -> Response {
    let form = LoginForm {
        next: query.next,
        ..Default::default()
    };
    render_login(&form, &FormErrors::default())
}

pub async fn login(
    State(state): State<AppState>,
    FormData(form): FormData<LoginForm>,
) -> Result<Response> {
    let (username, password) = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(render_login(&form, &errors)),
    };

    let user = match state.db.get_user_by_username(username).await? {
        Some(user) if verify_password(password, &user.password_hash)? => user,
        _ => {
            tracing::warn!(username, "failed login attempt");
            return Ok(render_login(&form, &LoginForm::invalid_credentials()));
        }
    };

    let target = safe_next(&form.next).unwrap_or(CLIENT_LIST);

    let ttl = state.config.session_ttl();
    let session = state.db.create_session(user.id, ttl).await?;
    tracing::info!(user_id = user.id, username = %user.username, "logged in");

    let cookie = session_cookie(&session.token, ttl, state.config.secure_cookies);
    Ok(([(SET_COOKIE, cookie)], Redirect::to(target)).into_response())
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    if let Some(token) = session_token(&headers) {
        state.db.delete_session(&token).await?;
    }

    Ok(([(SET_COOKIE, expired_session_cookie())], Redirect::to("/")).into_response())
}

pub async fn root(_user: CurrentUser) -> Redirect {
    Redirect::temporary(CLIENT_LIST)
}
