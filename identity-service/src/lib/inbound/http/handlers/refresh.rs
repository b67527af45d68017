use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokensData;
use crate::inbound::http::router::AppState;

/// A missing or unreadable body is treated like a missing token.
pub async fn refresh(
    State(state): State<AppState>,
    body: Option<Json<RefreshRequestBody>>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let refresh_token = body.and_then(|Json(body)| body.refresh_token);

    state
        .auth_service
        .refresh(refresh_token)
        .await
        .map_err(|e| state.api_error(e))
        .map(|tokens| {
            ApiSuccess::new(
                StatusCode::OK,
                RefreshResponseData {
                    tokens: tokens.into(),
                },
            )
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequestBody {
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub tokens: TokensData,
}
