use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::db::User;
use crate::web::redirect_found;

const IS_LOGGED_IN_KEY: &str = "is_logged_in";
const USER_KEY: &str = "user";

/// Minimal typed snapshot of the authenticated user held in the session.
/// Deliberately excludes the password hash; display fields only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_type: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            user_type: user.user_type.clone(),
        }
    }
}

/// Mark the session authenticated and store the user snapshot. The session
/// id is rotated first so a pre-login id never carries authentication.
pub async fn establish(session: &Session, user: &User) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(IS_LOGGED_IN_KEY, true).await?;
    session.insert(USER_KEY, SessionUser::from(user)).await?;
    Ok(())
}

pub async fn clear(session: &Session) {
    let _ = session.flush().await;
}

pub async fn is_logged_in(session: &Session) -> bool {
    session
        .get::<bool>(IS_LOGGED_IN_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

pub async fn current_user(session: &Session) -> Option<SessionUser> {
    session.get::<SessionUser>(USER_KEY).await.ok().flatten()
}

/// Gate in front of host routes: unauthenticated requests are redirected
/// to the login page instead of reaching the handler.
pub async fn require_login(session: Session, request: Request, next: Next) -> Response {
    if is_logged_in(&session).await {
        return next.run(request).await;
    }

    tracing::warn!(path = %request.uri().path(), "Unauthorized access attempt to host route");
    redirect_found("/login")
}
