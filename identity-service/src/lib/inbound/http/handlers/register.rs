use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::fmt;

use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionResponseData;
use crate::credential::models::REDACTED;
use crate::credential::validation::RegistrationForm;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .register(body.into())
        .await
        .map_err(|e| state.api_error(e))
        .map(|session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registration (raw JSON).
///
/// Missing fields deserialize as empty strings so they are reported by field
/// validation along with everything else.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequestBody {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    phone: String,
    profile_type: String,
    country: String,
}

impl fmt::Debug for RegisterRequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequestBody")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone", &self.phone)
            .field("profile_type", &self.profile_type)
            .field("country", &self.country)
            .finish()
    }
}

impl From<RegisterRequestBody> for RegistrationForm {
    fn from(body: RegisterRequestBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            phone: body.phone,
            profile_type: body.profile_type,
            country: body.country,
        }
    }
}
