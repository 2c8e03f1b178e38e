use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;
use tower_sessions::Session;

use crate::db::{HomeUpdate, NewHome};
use crate::services::UploadError;
use crate::web::{AppState, PageError, redirect_found, session, views};

pub async fn host_home_list(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let homes = state.listing.list_homes().await?;
    let user = session::current_user(&session).await;

    let user = match user {
        Some(u) => state.store.get_user_by_id(u.id).await?,
        None => None,
    };
    Ok(Html(views::host_home_list_page(&homes, user.as_ref())))
}

pub async fn get_add_home() -> Html<String> {
    Html(views::edit_home_page(None))
}

pub async fn get_edit_home(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let Some(home) = state.listing.get_home(id).await? else {
        tracing::warn!(home_id = id, "Home not found for editing");
        return Ok(redirect_found("/host/host-home-list"));
    };

    Ok(Html(views::edit_home_page(Some(&home))).into_response())
}

/// Parsed multipart add/edit form. Files are already written to the
/// upload directory by the time parsing returns.
#[derive(Debug, Default)]
struct HomeFormData {
    id: Option<i32>,
    house_name: String,
    price: Option<f64>,
    location: String,
    rating: Option<f64>,
    description: String,
    photo: Option<String>,
    rules_document: Option<String>,
}

impl HomeFormData {
    fn price(&self) -> Result<f64, PageError> {
        self.price
            .ok_or_else(|| PageError::Validation("price must be a number".to_string()))
    }

    fn rating(&self) -> Result<f64, PageError> {
        self.rating
            .ok_or_else(|| PageError::Validation("rating must be a number".to_string()))
    }

    fn description(&self) -> Option<String> {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

fn multipart_error(state: &AppState, e: &axum::extract::multipart::MultipartError) -> PageError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PageError::Upload(UploadError::TooLarge {
            limit: state.uploads.max_file_size(),
        })
    } else {
        PageError::Validation("Invalid form data".to_string())
    }
}

async fn parse_home_form(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<HomeFormData, PageError> {
    let mut data = HomeFormData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(state, &e))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        match name.as_str() {
            "photo" | "Rulephoto" => {
                let Some(file_name) = field.file_name().map(ToString::to_string) else {
                    continue;
                };
                if file_name.is_empty() {
                    continue;
                }

                let content_type = field
                    .content_type()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(state, &e))?;

                let path = state
                    .uploads
                    .store(&file_name, &content_type, &bytes)
                    .await?;

                if name == "photo" {
                    data.photo = Some(path);
                } else {
                    data.rules_document = Some(path);
                }
            }
            _ => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(state, &e))?;
                match name.as_str() {
                    "id" => data.id = text.trim().parse().ok(),
                    "houseName" => data.house_name = text,
                    "price" => data.price = text.trim().parse().ok(),
                    "location" => data.location = text,
                    "rating" => data.rating = text.trim().parse().ok(),
                    "description" => data.description = text,
                    _ => {}
                }
            }
        }
    }

    Ok(data)
}

pub async fn post_add_home(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let data = parse_home_form(&state, multipart).await?;

    let Some(photo) = data.photo.clone() else {
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, "No images provided").into_response());
    };

    let new_home = NewHome {
        house_name: data.house_name.clone(),
        price: data.price()?,
        location: data.location.clone(),
        rating: data.rating()?,
        description: data.description(),
        photo,
        rules_document: data.rules_document.clone(),
    };

    state.listing.add_home(new_home).await?;
    Ok(redirect_found("/host/host-home-list"))
}

pub async fn post_edit_home(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let data = parse_home_form(&state, multipart).await?;

    let Some(id) = data.id else {
        return Err(PageError::Validation("Missing home id".to_string()));
    };

    let update = HomeUpdate {
        house_name: data.house_name.clone(),
        price: data.price()?,
        location: data.location.clone(),
        rating: data.rating()?,
        description: data.description(),
        photo: data.photo.clone(),
        rules_document: data.rules_document.clone(),
    };

    // A failed update is logged, never shown: the host lands back on the
    // listing view either way.
    match state.listing.edit_home(id, update).await {
        Ok(Some(_)) => {}
        Ok(None) => tracing::warn!(home_id = id, "Home not found for update"),
        Err(e) => tracing::error!(home_id = id, "Error while updating home: {e:#}"),
    }

    Ok(redirect_found("/host/host-home-list"))
}

pub async fn post_delete_home(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Response {
    match state.listing.delete_home(id).await {
        Ok(true) => {}
        Ok(false) => tracing::warn!(home_id = id, "Home not found for deletion"),
        Err(e) => tracing::error!(home_id = id, "Error while deleting home: {e:#}"),
    }

    redirect_found("/host/host-home-list")
}
