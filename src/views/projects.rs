use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use super::{parse_id, AppState, FormData, PROJECT_LIST};
use crate::auth::CurrentUser;
use crate::error::Result;
use crate::forms::{FormErrors, ProjectForm};
use crate::models::{Client, Project};
use crate::templates;

fn ids(clients: &[Client]) -> Vec<i64> {
    clients.iter().map(|c| c.id).collect()
}

async fn render_list(
    state: &AppState,
    user: &CurrentUser,
    clients: &[Client],
    form: &ProjectForm,
    errors: &FormErrors,
) -> Result<Response> {
    let projects: Vec<Project> = state.db.scope(user.id()).all().await?;
    let page = templates::projects_page(user.username(), &projects, clients, form, errors);
    Ok(Html(page).into_response())
}

pub async fn list(State(state): State<AppState>, user: CurrentUser) -> Result<Response> {
    let clients: Vec<Client> = state.db.scope(user.id()).all().await?;
    render_list(
        &state,
        &user,
        &clients,
        &ProjectForm::default(),
        &FormErrors::default(),
    )
    .await
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    FormData(form): FormData<ProjectForm>,
) -> Result<Response> {
    let clients: Vec<Client> = state.db.scope(user.id()).all().await?;

    match form.validate(&ids(&clients)) {
        Ok(project) => {
            let id = state.db.create_project(user.id(), &project).await?;
            tracing::info!(project_id = id, author = user.username(), "project created");
            Ok(Redirect::to(PROJECT_LIST).into_response())
        }
        Err(errors) => render_list(&state, &user, &clients, &form, &errors).await,
    }
}

pub async fn detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let scope = state.db.scope(user.id());
    let project: Project = scope.get(parse_id(&id)?).await?;
    let clients: Vec<Client> = scope.all().await?;

    let page = templates::project_detail_page(
        user.username(),
        &project,
        &clients,
        &ProjectForm::from(&project),
        &FormErrors::default(),
    );
    Ok(Html(page).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    FormData(form): FormData<ProjectForm>,
) -> Result<Response> {
    let scope = state.db.scope(user.id());
    let project: Project = scope.get(parse_id(&id)?).await?;
    let clients: Vec<Client> = scope.all().await?;

    match form.validate(&ids(&clients)) {
        Ok(changes) => {
            state.db.update_project(user.id(), project.id, &changes).await?;
            tracing::info!(project_id = project.id, author = user.username(), "project updated");
            Ok(Redirect::to(PROJECT_LIST).into_response())
        }
        Err(errors) => {
            let page =
                templates::project_detail_page(user.username(), &project, &clients, &form, &errors);
            Ok(Html(page).into_response())
        }
    }
}
