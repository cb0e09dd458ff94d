//! Request identity
//!
//! Authentication itself is delegated to the fronting identity-aware proxy,
//! which verifies the caller and forwards the identity as trusted headers.
//! This extractor only reads those headers; a request without them is
//! unauthenticated.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

/// Header carrying the stable user id set by the identity proxy.
pub const USER_ID_HEADER: &str = "x-auth-user";

/// Header carrying the user's email address set by the identity proxy.
pub const USER_EMAIL_HEADER: &str = "x-auth-email";

/// The authenticated caller, extracted from gateway identity headers.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: String,
}

impl CurrentUser {
    /// Display name used when a profile is first created: the local part of
    /// the email address.
    pub fn default_display_name(&self) -> String {
        self.email
            .split('@')
            .next()
            .unwrap_or(&self.email)
            .to_string()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_value(parts, USER_ID_HEADER)?;
        let email = header_value(parts, USER_EMAIL_HEADER)?;
        Ok(CurrentUser { user_id, email })
    }
}

fn header_value(parts: &Parts, name: &str) -> Result<String, ApiError> {
    let value = parts
        .headers
        .get(name)
        .ok_or_else(|| ApiError::Unauthorized("Authorization required".to_string()))?;

    let value = value
        .to_str()
        .map_err(|_| ApiError::Unauthorized(format!("Invalid {} header", name)))?
        .trim();

    if value.is_empty() {
        return Err(ApiError::Unauthorized("Authorization required".to_string()));
    }

    Ok(value.to_string())
}
