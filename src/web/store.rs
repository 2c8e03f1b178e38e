use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use crate::web::{AppState, PageError, redirect_found, session, views};

pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let homes = state.store.list_homes().await?;
    let is_logged_in = session::is_logged_in(&session).await;
    Ok(Html(views::index_page(&homes, is_logged_in)))
}

pub async fn home_list(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let homes = state.store.list_homes().await?;
    let is_logged_in = session::is_logged_in(&session).await;
    Ok(Html(views::home_list_page(&homes, is_logged_in)))
}

pub async fn bookings(session: Session) -> Html<String> {
    Html(views::bookings_page(session::is_logged_in(&session).await))
}

/// Absent homes redirect back to the listing index rather than erroring.
pub async fn home_detail(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let Some(home) = state.store.get_home(id).await? else {
        return Ok(redirect_found("/homes"));
    };

    let is_logged_in = session::is_logged_in(&session).await;
    Ok(Html(views::home_detail_page(&home, is_logged_in)).into_response())
}

pub async fn rules(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let Some(home) = state.store.get_home(id).await? else {
        return Ok(redirect_found("/homes"));
    };

    let is_logged_in = session::is_logged_in(&session).await;
    Ok(Html(views::rules_page(&home, is_logged_in)).into_response())
}

pub async fn favourite_list(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, PageError> {
    let Some(user) = session::current_user(&session).await else {
        return Ok(redirect_found("/login"));
    };

    let homes = state.store.list_favourite_homes(user.id).await?;
    Ok(Html(views::favourite_list_page(&homes)).into_response())
}

#[derive(Deserialize)]
pub struct FavouriteForm {
    pub id: i32,
}

pub async fn add_favourite(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<FavouriteForm>,
) -> Result<Response, PageError> {
    let Some(user) = session::current_user(&session).await else {
        return Ok(redirect_found("/login"));
    };

    state.store.add_favourite(user.id, form.id).await?;
    Ok(redirect_found("/favourite-list"))
}

pub async fn remove_favourite(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let Some(user) = session::current_user(&session).await else {
        return Ok(redirect_found("/login"));
    };

    state.store.remove_favourite(user.id, id).await?;
    Ok(redirect_found("/favourite-list"))
}
