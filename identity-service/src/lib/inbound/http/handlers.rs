use auth::TokenPair;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::credential::errors::AuthError;
use crate::credential::errors::FieldViolation;
use crate::credential::models::AuthSession;
use crate::credential::models::CredentialProfile;

pub mod health;
pub mod login;
pub mod me;
pub mod refresh;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(ApiErrorData),
    BadRequest(ApiErrorData),
    Unauthorized(ApiErrorData),
    Forbidden(ApiErrorData),
    NotFound(ApiErrorData),
}

impl ApiError {
    /// Translate a workflow error into its HTTP form.
    ///
    /// Internal failures are logged in full here; their detail only reaches the
    /// client when `expose_internal` is set.
    pub fn from_auth_error(err: AuthError, expose_internal: bool) -> Self {
        let code = err.code();
        match err {
            AuthError::Validation(ref errors) => ApiError::BadRequest(ApiErrorData {
                message: "Invalid request data".to_string(),
                code: code.to_string(),
                details: Some(errors.violations().iter().map(Into::into).collect()),
            }),
            AuthError::DuplicateAccount | AuthError::RefreshTokenRequired => {
                ApiError::BadRequest(ApiErrorData::new(code, err.to_string()))
            }
            AuthError::InvalidCredentials
            | AuthError::InvalidRefreshToken
            | AuthError::UserNotFound => {
                ApiError::Unauthorized(ApiErrorData::new(code, err.to_string()))
            }
            AuthError::AccountSuspended => {
                ApiError::Forbidden(ApiErrorData::new(code, err.to_string()))
            }
            AuthError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                let message = if expose_internal {
                    detail
                } else {
                    "Internal server error".to_string()
                };
                ApiError::InternalServerError(ApiErrorData::new(code, message))
            }
        }
    }

    pub fn unauthorized(message: impl ToString) -> Self {
        ApiError::Unauthorized(ApiErrorData::new("UNAUTHORIZED", message))
    }
}

/// Unreadable bodies (wrong content type, malformed JSON, mistyped fields) are
/// reported in the same envelope as field validation failures.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Request body rejected");
        ApiError::BadRequest(ApiErrorData {
            message: "Invalid request data".to_string(),
            code: "VALIDATION_ERROR".to_string(),
            details: Some(vec![ApiErrorDetail {
                field: "body".to_string(),
                rule: "request_body".to_string(),
                message: rejection.body_text(),
            }]),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, data) = match self {
            ApiError::InternalServerError(data) => (StatusCode::INTERNAL_SERVER_ERROR, data),
            ApiError::BadRequest(data) => (StatusCode::BAD_REQUEST, data),
            ApiError::Unauthorized(data) => (StatusCode::UNAUTHORIZED, data),
            ApiError::Forbidden(data) => (StatusCode::FORBIDDEN, data),
            ApiError::NotFound(data) => (StatusCode::NOT_FOUND, data),
        };

        (status, Json(ApiResponseBody::new(status, data))).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ApiErrorDetail>>,
}

impl ApiErrorData {
    pub fn new(code: impl ToString, message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
            code: code.to_string(),
            details: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorDetail {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl From<&FieldViolation> for ApiErrorDetail {
    fn from(violation: &FieldViolation) -> Self {
        Self {
            field: violation.field.to_string(),
            rule: violation.rule.as_str().to_string(),
            message: violation.message.clone(),
        }
    }
}

/// Credential as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub platform_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub profile_type: String,
    pub country: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&CredentialProfile> for UserData {
    fn from(profile: &CredentialProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            platform_id: profile.platform_id.to_string(),
            email: profile.email.as_str().to_string(),
            first_name: profile.first_name.as_str().to_string(),
            last_name: profile.last_name.as_str().to_string(),
            phone: profile.phone.as_str().to_string(),
            profile_type: profile.role.as_str().to_string(),
            country: profile.country.as_str().to_string(),
            status: profile.status.as_str().to_string(),
            created_at: profile.created_at,
            last_login_at: profile.last_login_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensData {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<TokenPair> for TokensData {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
        }
    }
}

/// Body shared by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub user: UserData,
    pub tokens: TokensData,
}

impl From<AuthSession> for SessionResponseData {
    fn from(session: AuthSession) -> Self {
        Self {
            user: (&session.credential).into(),
            tokens: session.tokens.into(),
        }
    }
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(ApiErrorData::new(
        "NOT_FOUND",
        format!("Route {} not found", uri.path()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::errors::ValidationErrors;
    use crate::credential::errors::ValidationRule;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AuthError::DuplicateAccount, StatusCode::BAD_REQUEST),
            (AuthError::RefreshTokenRequired, StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidRefreshToken, StatusCode::UNAUTHORIZED),
            (AuthError::UserNotFound, StatusCode::UNAUTHORIZED),
            (AuthError::AccountSuspended, StatusCode::FORBIDDEN),
            (
                AuthError::Internal("db down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let response = ApiError::from_auth_error(err, false).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn test_validation_details() {
        let mut errors = ValidationErrors::new();
        errors.push("phone", ValidationRule::PhoneFormat, "Invalid phone number");

        let api_error = ApiError::from_auth_error(AuthError::Validation(errors), false);

        let ApiError::BadRequest(data) = api_error else {
            panic!("expected bad request");
        };
        assert_eq!(data.code, "VALIDATION_ERROR");
        assert_eq!(
            data.details,
            Some(vec![ApiErrorDetail {
                field: "phone".to_string(),
                rule: "phone_format".to_string(),
                message: "Invalid phone number".to_string(),
            }])
        );
    }

    #[test]
    fn test_internal_detail_hidden_unless_exposed() {
        let hidden = ApiError::from_auth_error(AuthError::Internal("db down".to_string()), false);
        let exposed = ApiError::from_auth_error(AuthError::Internal("db down".to_string()), true);

        assert_eq!(
            hidden,
            ApiError::InternalServerError(ApiErrorData::new(
                "INTERNAL_ERROR",
                "Internal server error"
            ))
        );
        assert_eq!(
            exposed,
            ApiError::InternalServerError(ApiErrorData::new("INTERNAL_ERROR", "db down"))
        );
    }
}
