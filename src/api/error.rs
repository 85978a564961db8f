use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::auth::models::AuthError;
use crate::errors::{ResourceKind, ServiceError};
use crate::services::PictureError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    InvalidPagination(String),
    NotFound { resource: ResourceKind, id: String },
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    InvalidPicture(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidPagination(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidPicture(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> String {
        match self {
            ApiError::BadRequest(_) => "errors.badRequest".to_string(),
            ApiError::InvalidPagination(_) => "errors.pagination.invalid".to_string(),
            ApiError::NotFound { resource, .. } => format!("errors.{}.notFound", resource.as_str()),
            ApiError::Unauthorized(_) => "errors.unauthorized".to_string(),
            ApiError::Forbidden(_) => "errors.forbidden".to_string(),
            ApiError::Conflict(_) => "errors.conflict".to_string(),
            ApiError::InvalidPicture(_) => "errors.picture.invalid".to_string(),
            ApiError::ServiceUnavailable(_) => "errors.unavailable".to_string(),
            ApiError::Internal(_) => "errors.unexpected".to_string(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::NotFound { resource, id } => {
                format!("{} [{}] can not be found.", display_name(*resource), id)
            }
            ApiError::BadRequest(msg)
            | ApiError::InvalidPagination(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Conflict(msg)
            | ApiError::InvalidPicture(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::Internal(msg) => msg.clone(),
        }
    }

    fn parameters(&self) -> Option<BTreeMap<String, String>> {
        match self {
            ApiError::NotFound { resource, id } => {
                Some(BTreeMap::from([(resource.as_str().to_string(), id.clone())]))
            }
            _ => None,
        }
    }

    pub fn not_found(resource: ResourceKind, id: impl Into<String>) -> Self {
        ApiError::NotFound { resource, id: id.into() }
    }

    pub fn bad_request<S: Into<String>>(msg: S) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn service_unavailable<S: Into<String>>(msg: S) -> Self {
        ApiError::ServiceUnavailable(msg.into())
    }

    pub fn unauthorized<S: Into<String>>(msg: S) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn forbidden<S: Into<String>>(msg: S) -> Self {
        ApiError::Forbidden(msg.into())
    }
}

fn display_name(resource: ResourceKind) -> &'static str {
    match resource {
        ResourceKind::Api => "Api",
        ResourceKind::Application => "Application",
        ResourceKind::Page => "Page",
        ResourceKind::Plan => "Plan",
        ResourceKind::Rating => "Rating",
        ResourceKind::Picture => "Picture",
    }
}

/// Single entry of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEntry {
    #[schema(example = "errors.api.notFound")]
    pub code: String,
    /// HTTP status as a string
    #[schema(example = "404")]
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, String>>,
}

/// Error body returned by every endpoint. Always holds exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorEntry>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        ErrorResponse {
            errors: vec![ErrorEntry {
                code: err.code(),
                status: err.status_code().as_u16().to_string(),
                message: err.message(),
                parameters: err.parameters(),
            }],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound { kind, id } => ApiError::NotFound { resource: kind, id },
            ServiceError::Validation(msg) => ApiError::BadRequest(msg),
            ServiceError::Forbidden(msg) => ApiError::Forbidden(msg),
            ServiceError::Conflict(msg) => ApiError::Conflict(msg),
            ServiceError::Unavailable(msg) => {
                error!(error = %msg, "Backing service unavailable");
                ApiError::ServiceUnavailable(msg)
            }
            ServiceError::Internal(msg) => {
                error!(error = %msg, "Backing service failed");
                ApiError::Internal("An unexpected error occurred".to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MalformedBearer => {
                ApiError::Unauthorized("Unauthorized: malformed bearer token".to_string())
            }
            AuthError::TokenNotFound => {
                ApiError::Unauthorized("Unauthorized: token not found".to_string())
            }
            AuthError::AuthenticationRequired => {
                ApiError::Unauthorized("Unauthorized: authentication required".to_string())
            }
            AuthError::Forbidden => {
                ApiError::Forbidden("Forbidden: insufficient permissions".to_string())
            }
            AuthError::Unavailable(msg) => {
                ApiError::ServiceUnavailable(format!("Identity provider unavailable: {}", msg))
            }
        }
    }
}

impl From<PictureError> for ApiError {
    fn from(err: PictureError) -> Self {
        ApiError::InvalidPicture(format!("Invalid picture: {}", err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<axum_extra::extract::QueryRejection> for ApiError {
    fn from(rejection: axum_extra::extract::QueryRejection) -> Self {
        ApiError::BadRequest(rejection.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(format!("Validation failed: {}", errors))
    }
}
