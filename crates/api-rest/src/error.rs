use api_shared::{AuthError, ErrorRes};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contacts_core::ContactError;

/// Failure of a REST request, rendered as `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    /// The contact does not exist or belongs to someone else.
    NotFound,
    Unauthorized(AuthError),
    /// The request path, query or body could not be parsed.
    Rejected { status: StatusCode, detail: String },
    Internal(ContactError),
}

impl From<ContactError> for ApiError {
    fn from(e: ContactError) -> Self {
        Self::Internal(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self::Unauthorized(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        Self::Rejected {
            status: r.status(),
            detail: r.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self {
        Self::Rejected {
            status: r.status(),
            detail: r.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self {
        Self::Rejected {
            status: r.status(),
            detail: r.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorRes::new("Contact not found")),
            )
                .into_response(),
            Self::Unauthorized(e) => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(ErrorRes::new(e.to_string())),
            )
                .into_response(),
            Self::Rejected { status, detail } => {
                tracing::debug!(%status, "request rejected: {}", detail);
                (status, Json(ErrorRes::new(detail))).into_response()
            }
            Self::Internal(e) => {
                tracing::error!("Contact store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorRes::new("Internal error")),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Turns an absent contact into a 404.
pub(crate) fn found<T>(value: Option<T>) -> ApiResult<T> {
    value.ok_or(ApiError::NotFound)
}
