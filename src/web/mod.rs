use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT, LOCATION};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::{Router, middleware};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, ListingService, UploadService};

pub mod auth;
mod error;
pub mod host;
pub mod session;
pub mod store;
mod system;
pub mod validation;
pub mod views;

pub use error::PageError;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub auth: AuthService,

    pub listing: ListingService,

    pub uploads: UploadService,

    pub start_time: std::time::Instant,
}

pub async fn create_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_url,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let uploads = UploadService::new(config.uploads.clone());
    uploads.ensure_directory().await?;

    let auth = AuthService::new(store.clone(), config.security.clone());
    let listing = ListingService::new(store.clone(), uploads.clone());

    Ok(Arc::new(AppState {
        config,
        store,
        auth,
        listing,
        uploads,
        start_time: std::time::Instant::now(),
    }))
}

/// Browser-style 302 redirect. `axum::response::Redirect::to` answers 303,
/// which breaks clients that replay form POSTs against the redirect target.
pub fn redirect_found(to: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, to.to_string())]).into_response()
}

fn session_signing_key(secret: &str) -> anyhow::Result<Key> {
    anyhow::ensure!(!secret.is_empty(), "Session secret must not be empty");

    // Key::from wants at least 64 bytes of material, so short secrets
    // are repeated up to that length.
    let mut material = secret.as_bytes().to_vec();
    while material.len() < 64 {
        material.extend_from_slice(secret.as_bytes());
    }
    Ok(Key::from(&material))
}

pub async fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let config = &state.config;

    let session_store = SqliteStore::new(state.store.sqlite_pool());
    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.server.secure_cookies || config.is_production())
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(
            config.session.expiry_hours,
        )))
        .with_signed(session_signing_key(&config.session.secret)?);

    let host_routes = create_host_router();
    let upload_dir = config.uploads.directory.clone();

    // Uploaded paths are stored relative to the process root, so the same
    // directory is mounted both at /uploads and under the /host prefix.
    let app = Router::new()
        .route("/login", get(auth::get_login).post(auth::post_login))
        .route("/logout", post(auth::post_logout))
        .route("/signup", get(auth::get_signup))
        .route("/Signup", post(auth::post_signup))
        .route("/", get(store::index))
        .route("/homes", get(store::home_list))
        .route("/homes/{id}", get(store::home_detail))
        .route("/rules/{id}", get(store::rules))
        .route(
            "/favourite-list",
            get(store::favourite_list).post(store::add_favourite),
        )
        .route("/favourite/delete/{id}", post(store::remove_favourite))
        .route("/store/bookings", get(store::bookings))
        .route("/store/home-list", get(store::home_list))
        .nest("/host", host_routes)
        .route("/api/health", get(system::health))
        .nest_service("/uploads", ServeDir::new(&upload_dir))
        .nest_service("/host/uploads", ServeDir::new(&upload_dir))
        .fallback(not_found)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(
            config.uploads.max_file_size + 1024 * 1024,
        ))
        .with_state(state);

    Ok(app)
}

fn create_host_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/host-home-list", get(host::host_home_list))
        .route(
            "/add-home",
            get(host::get_add_home).post(host::post_add_home),
        )
        .route("/edit-home/{id}", get(host::get_edit_home))
        .route("/edit-home", post(host::post_edit_home))
        .route("/delete-home/{id}", post(host::post_delete_home))
        .route_layer(middleware::from_fn(session::require_login))
}

async fn not_found(
    session: tower_sessions::Session,
    uri: axum::http::Uri,
    headers: HeaderMap,
) -> Response {
    let wants_json = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    if wants_json {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Page not found" })),
        )
            .into_response();
    }

    let is_logged_in = session::is_logged_in(&session).await;
    (
        StatusCode::NOT_FOUND,
        Html(views::not_found_page(uri.path(), is_logged_in)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signing_key_accepts_secrets_shorter_than_the_key_length() {
        let a = session_signing_key("short-secret").unwrap();
        let b = session_signing_key("short-secret").unwrap();
        assert_eq!(a.master(), b.master());
    }

    #[test]
    fn signing_key_differs_per_secret() {
        let a = session_signing_key("secret-a").unwrap();
        let b = session_signing_key("secret-b").unwrap();
        assert_ne!(a.master(), b.master());
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(session_signing_key("").is_err());
    }
}
