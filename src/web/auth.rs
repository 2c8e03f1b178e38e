use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use crate::db::NewUser;
use crate::services::LoginOutcome;
use crate::web::validation::{self, SignupForm};
use crate::web::views::{self, SignupOldInput};
use crate::web::{AppState, PageError, redirect_found, session};

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn get_login() -> Html<String> {
    Html(views::login_page("", &[]))
}

fn login_failure(email: &str, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(views::login_page(email, &[message.to_string()])),
    )
        .into_response()
}

pub async fn post_login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let email = validation::normalize_email(&form.email);

    let user = match state.auth.login(&email, &form.password).await? {
        LoginOutcome::UserNotFound => return Ok(login_failure(&form.email, "User does not exist")),
        LoginOutcome::InvalidPassword => return Ok(login_failure(&form.email, "Invalid Password")),
        LoginOutcome::Success(user) => user,
    };

    // A session that cannot be persisted is a soft failure: send the
    // visitor back to the login page rather than a 500.
    if let Err(e) = session::establish(&session, &user).await {
        tracing::warn!("Session save error: {e}");
        return Ok(redirect_found("/login"));
    }

    Ok(redirect_found("/"))
}

pub async fn post_logout(session: Session) -> Response {
    session::clear(&session).await;
    redirect_found("/login")
}

pub async fn get_signup() -> Html<String> {
    Html(views::signup_page(&SignupOldInput::default(), &[]))
}

fn signup_failure(form: &SignupForm, messages: Vec<String>) -> Response {
    let old = SignupOldInput {
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        email: form.email.clone(),
        user_type: form.user_type.clone(),
    };
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(views::signup_page(&old, &messages)),
    )
        .into_response()
}

pub async fn post_signup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignupForm>,
) -> Result<Response, PageError> {
    let errors = validation::validate_signup(&form);
    if !errors.is_empty() {
        let messages = errors.iter().map(|e| e.message.to_string()).collect();
        return Ok(signup_failure(&form, messages));
    }

    let new_user = NewUser {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: validation::normalize_email(&form.email),
        password: form.password.trim().to_string(),
        user_type: form.user_type.clone(),
    };

    if let Err(e) = state.auth.register(new_user).await {
        let message = match e.downcast_ref::<sea_orm::DbErr>().and_then(sea_orm::DbErr::sql_err) {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => "email already exists",
            _ => {
                tracing::error!("Error while saving user: {e:#}");
                "Could not create the account"
            }
        };
        return Ok(signup_failure(&form, vec![message.to_string()]));
    }

    Ok(redirect_found("/login"))
}
