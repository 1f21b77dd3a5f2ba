use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};

use super::{AppState, FormData, ENTRY_LIST};
use crate::auth::CurrentUser;
use crate::error::Result;
use crate::forms::{EntryForm, FormErrors};
use crate::models::{Entry, Project};
use crate::templates;

async fn render_list(
    state: &AppState,
    user: &CurrentUser,
    projects: &[Project],
    form: &EntryForm,
    errors: &FormErrors,
) -> Result<Response> {
    let entries: Vec<Entry> = state.db.scope(user.id()).all().await?;
    let page = templates::entries_page(user.username(), &entries, projects, form, errors);
    Ok(Html(page).into_response())
}

pub async fn list(State(state): State<AppState>, user: CurrentUser) -> Result<Response> {
    let projects: Vec<Project> = state.db.scope(user.id()).all().await?;
    render_list(
        &state,
        &user,
        &projects,
        &EntryForm::default(),
        &FormErrors::default(),
    )
    .await
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    FormData(form): FormData<EntryForm>,
) -> Result<Response> {
    let projects: Vec<Project> = state.db.scope(user.id()).all().await?;
    let project_ids: Vec<i64> = projects.iter().map(|p| p.id).collect();

    match form.validate(&project_ids) {
        Ok(entry) => {
            let id = state.db.create_entry(user.id(), &entry).await?;
            tracing::info!(entry_id = id, author = user.username(), "entry created");
            Ok(Redirect::to(ENTRY_LIST).into_response())
        }
        Err(errors) => render_list(&state, &user, &projects, &form, &errors).await,
    }
}
