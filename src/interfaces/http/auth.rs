use super::error::ApiError;
use super::router::AppState;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    #[error("Authorization header missing")]
    MissingHeader,
    #[error("Token expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
    #[error("Invalid credentials")]
    BadCredentials,
}

/// JWT claims for the admin session. Consumed only for authorization
/// gating; the transaction processor never sees them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: i64,
}

pub fn issue_token(
    secret: &str,
    admin_id: &str,
    email: &str,
    expires_minutes: i64,
) -> Result<String, AuthError> {
    let claims = Claims {
        sub: admin_id.to_string(),
        email: email.to_string(),
        exp: (Utc::now() + Duration::minutes(expires_minutes)).timestamp(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Invalid)
}

pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Invalid,
    })
}

/// Bearer-credential extractor. Rejects the request with 401 before any
/// handler (and therefore any store access) runs.
pub struct AuthClaims(pub Claims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingHeader)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MissingHeader)?;
        let claims = verify_token(&state.auth.secret, token)?;
        Ok(AuthClaims(claims))
    }
}

/// Auth material shared with the router state.
#[derive(Clone)]
pub struct AuthSettings {
    pub secret: String,
    pub expires_minutes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let token = issue_token("devsecret", "admin-1", "root@zenith.in", 5).unwrap();
        let claims = verify_token("devsecret", &token).unwrap();
        assert_eq!(claims.sub, "admin-1");
        assert_eq!(claims.email, "root@zenith.in");
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = issue_token("devsecret", "admin-1", "root@zenith.in", 5).unwrap();
        assert_eq!(verify_token("other", &token).unwrap_err(), AuthError::Invalid);
    }

    #[test]
    fn test_expired_token_is_distinguished() {
        let token = issue_token("devsecret", "admin-1", "root@zenith.in", -5).unwrap();
        assert_eq!(verify_token("devsecret", &token).unwrap_err(), AuthError::Expired);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert_eq!(
            verify_token("devsecret", "not.a.jwt").unwrap_err(),
            AuthError::Invalid
        );
    }
}
