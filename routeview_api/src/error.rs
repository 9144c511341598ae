use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use routeview_datasets::error::DatasetError;
use routeview_live::hub::BroadcastError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Conflict(String),
    InternalServerError(String),
    NotFound(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl From<DatasetError> for ApiError {
    fn from(error: DatasetError) -> Self {
        if error.is_not_found() {
            return ApiError::NotFound(error.to_string());
        }

        match error {
            DatasetError::Parse {
                path,
                line,
                column,
                message,
            } => ApiError::InternalServerError(format!(
                "Malformed dataset {} (line {line}, column {column}): {message}",
                path.display()
            )),
            error => ApiError::InternalServerError(error.to_string()),
        }
    }
}

impl From<BroadcastError> for ApiError {
    fn from(error: BroadcastError) -> Self {
        ApiError::Conflict(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message).into_response(),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
        }
    }
}
