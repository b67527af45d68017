use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedCredential;
use crate::inbound::http::router::AppState;

pub async fn me(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedCredential>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    tracing::debug!(
        credential_id = %session.credential_id,
        platform_id = %session.platform_id,
        role = ?session.role,
        "Loading current credential"
    );

    state
        .auth_service
        .current_credential(&session.credential_id)
        .await
        .map_err(|e| state.api_error(e))
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
