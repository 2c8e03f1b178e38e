use anyhow::Result;

use crate::config::SecurityConfig;
use crate::db::{NewUser, Store, User};

/// Outcome of a login attempt. Both failure variants are user-visible
/// conditions, not errors.
#[derive(Debug)]
pub enum LoginOutcome {
    UserNotFound,
    InvalidPassword,
    Success(User),
}

/// Registration and credential verification on top of the user repository.
#[derive(Clone)]
pub struct AuthService {
    store: Store,
    security: SecurityConfig,
}

impl AuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    /// Persist a validated signup. Duplicate emails surface as a database
    /// unique-constraint error for the caller to render.
    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        let user = self.store.create_user(new_user, &self.security).await?;
        tracing::info!(email = %user.email, user_type = %user.user_type, "User registered");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let Some(user) = self.store.get_user_by_email(email).await? else {
            return Ok(LoginOutcome::UserNotFound);
        };

        if !self.store.verify_user_password(email, password).await? {
            return Ok(LoginOutcome::InvalidPassword);
        }

        tracing::info!(email = %user.email, "Login successful");
        Ok(LoginOutcome::Success(user))
    }
}
