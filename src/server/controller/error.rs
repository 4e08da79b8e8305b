use actix_web::http::StatusCode;
use actix_web::{error, HttpResponse};
use derive_more::{Display, Error};
use serde_json::json;

use crate::server::store::StoreError;

/// Boundary error: handler failures funnel through here so status codes and
/// bodies stay consistent across routes.
#[derive(Debug, Display, Error)]
pub(crate) enum ApiError {
    #[display("{_0}")]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        let ApiError::Store(e) = self;
        match e {
            StoreError::Validation { .. } => StatusCode::BAD_REQUEST,
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::NumberConflict | StoreError::Unavailable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
