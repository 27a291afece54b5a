//! Stateless sessions: a signed claims token carried in an HttpOnly
//! cookie (or a bearer header for non-browser clients).

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::User;

pub const SESSION_COOKIE: &str = "session";

const SESSION_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id, hex encoded.
    pub sub: String,
    pub name: String,
    pub email: String,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User) -> Self {
        Self {
            sub: user.id.to_hex(),
            name: user.name.clone(),
            email: user.email.clone(),
            exp: (Utc::now() + Duration::days(SESSION_DAYS)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("Session encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Session decode failed: {e}"))
}

/// Jar holding the freshly issued session cookie.
pub fn session_cookie(token: &str) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_DAYS))
        .build();
    CookieJar::new().add(cookie)
}

/// Jar holding an expired cookie that clears the session.
pub fn clear_session_cookie() -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(cookie)
}
