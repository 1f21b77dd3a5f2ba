use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use super::{parse_id, AppState, FormData, CLIENT_LIST};
use crate::auth::CurrentUser;
use crate::error::Result;
use crate::forms::{ClientForm, FormErrors};
use crate::models::Client;
use crate::templates;

async fn render_list(
    state: &AppState,
    user: &CurrentUser,
    form: &ClientForm,
    errors: &FormErrors,
) -> Result<Response> {
    let clients: Vec<Client> = state.db.scope(user.id()).all().await?;
    let page = templates::clients_page(user.username(), &clients, form, errors);
    Ok(Html(page).into_response())
}

pub async fn list(State(state): State<AppState>, user: CurrentUser) -> Result<Response> {
    render_list(&state, &user, &ClientForm::default(), &FormErrors::default()).await
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    FormData(form): FormData<ClientForm>,
) -> Result<Response> {
    match form.validate() {
        Ok(client) => {
            let id = state.db.create_client(user.id(), &client).await?;
            tracing::info!(client_id = id, author = user.username(), "client created");
            Ok(Redirect::to(CLIENT_LIST).into_response())
        }
        Err(errors) => render_list(&state, &user, &form, &errors).await,
    }
}

pub async fn detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let client: Client = state.db.scope(user.id()).get(parse_id(&id)?).await?;
    let page = templates::client_detail_page(
        user.username(),
        &client,
        &ClientForm::from(&client),
        &FormErrors::default(),
    );
    Ok(Html(page).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    FormData(form): FormData<ClientForm>,
) -> Result<Response> {
    let client: Client = state.db.scope(user.id()).get(parse_id(&id)?).await?;

    match form.validate() {
        Ok(changes) => {
            state.db.update_client(user.id(), client.id, &changes).await?;
            tracing::info!(client_id = client.id, author = user.username(), "client updated");
            Ok(Redirect::to(CLIENT_LIST).into_response())
        }
        Err(errors) => {
            let page = templates::client_detail_page(user.username(), &client, &form, &errors);
            Ok(Html(page).into_response())
        }
    }
}
