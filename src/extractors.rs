use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor gating the admin write endpoints.
///
/// With a token configured, the request must carry it as a bearer token.
/// With none configured, writes stay open for local development - except in
/// production, where an unconfigured token means the console is locked.
#[derive(Debug, Clone)]
pub struct AdminUser;

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match &state.config.admin.token {
            Some(expected) => {
                let presented = extract_bearer_token(parts).ok_or(AppError::Unauthorized)?;
                if presented == expected {
                    Ok(AdminUser)
                } else {
                    Err(AppError::Unauthorized)
                }
            }
            None if state.config.deployment.production => Err(AppError::Unauthorized),
            None => Ok(AdminUser),
        }
    }
}

fn extract_bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
