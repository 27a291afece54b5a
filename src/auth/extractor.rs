use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use mongodb::bson::oid::ObjectId;

use crate::auth::session::{self, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::SharedState;

/// The signed-in user, resolved from the session cookie or a bearer
/// token. Handlers that take this extractor reject anonymous requests.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: ObjectId,
    pub name: String,
    pub email: String,
}

impl AuthUser {
    fn from_token(token: &str, secret: &str) -> Result<Self, AppError> {
        let claims = session::decode_token(token, secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired session".to_string()))?;
        let user_id = ObjectId::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid or expired session".to_string()))?;

        Ok(AuthUser {
            user_id,
            name: claims.name,
            email: claims.email,
        })
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Bearer token from the Authorization header first
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Self::from_token(token, &state.config.session_secret);
            }
        }

        // Then the session cookie
        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            return Self::from_token(cookie.value(), &state.config.session_secret);
        }

        Err(AppError::Unauthorized("Missing session".to_string()))
    }
}
