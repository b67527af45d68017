use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use platform_id::Role;

use super::handlers::ApiError;
use crate::credential::models::CredentialId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated credential in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedCredential {
    pub credential_id: CredentialId,
    pub platform_id: String,
    pub role: Option<Role>,
}

/// Middleware that validates bearer tokens and adds credential info to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        ApiError::unauthorized("Invalid or expired token").into_response()
    })?;

    let credential_id = CredentialId::from_string(&claims.sub).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse credential id from token");
        ApiError::unauthorized("Invalid token format").into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedCredential {
        credential_id,
        platform_id: claims.platform_id,
        role: claims.role.parse().ok(),
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header").into_response())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header").into_response())?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
            .into_response()
    })
}
