use std::sync::LazyLock;

use axum::extract::State;
use axum::{Form, Json};
use axum_extra::extract::CookieJar;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::auth::password;
use crate::auth::session::{self, Claims};
use crate::error::AppError;
use crate::models::UserView;
use crate::state::SharedState;

const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserView,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials.".to_string())
}

fn something_went_wrong(context: &str, err: impl std::fmt::Display) -> AppError {
    tracing::error!("{context}: {err}");
    AppError::Internal("Something went wrong.".to_string())
}

/// Credential login. A rejected credential, malformed or merely wrong,
/// answers 401 with the same message; only infrastructure failures
/// surface as 500.
pub async fn login(
    State(state): State<SharedState>,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let (Some(email), Some(submitted)) = (form.email, form.password) else {
        return Err(invalid_credentials());
    };
    if submitted.len() < MIN_PASSWORD_LEN || !EMAIL_SHAPE.is_match(&email) {
        return Err(invalid_credentials());
    }

    let user = state
        .store
        .users
        .find_by_email(&email)
        .await
        .map_err(|e| something_went_wrong("Failed to fetch user", e))?
        .ok_or_else(invalid_credentials)?;

    let matched = password::verify(&submitted, &user.password)
        .map_err(|e| something_went_wrong("Password verification failed", e))?;
    if !matched {
        return Err(invalid_credentials());
    }

    let token = session::encode_token(&Claims::new(&user), &state.config.session_secret)
        .map_err(AppError::Internal)?;

    tracing::info!(user = %user.email, "user logged in");

    Ok((
        session::session_cookie(&token),
        Json(LoginResponse {
            message: "Logged in successfully".to_string(),
            user: user.view(),
        }),
    ))
}

pub async fn logout() -> (CookieJar, Json<MessageResponse>) {
    (
        session::clear_session_cookie(),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}
