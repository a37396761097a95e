//! Conversion of request failures into HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use super::types::ErrorResponse;
use super::{HOURS_ERROR_MESSAGE, INTERNAL_ERROR_MESSAGE};
use crate::error::{ChargingError, FetchError, HoursError, WindowError};

/// Every way a request can fail.
///
/// Validation failures become 400 with a fixed message; everything else
/// becomes a generic 500 and the cause is only logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid hours: {0}")]
    InvalidHours(#[from] HoursError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<ChargingError> for ApiError {
    fn from(e: ChargingError) -> Self {
        match e {
            ChargingError::Fetch(e) => Self::Fetch(e),
            ChargingError::Window(e) => Self::Window(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidHours(_) => StatusCode::BAD_REQUEST,
            Self::Fetch(_) | Self::Window(_) | Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::InvalidHours(e) => {
                warn!(error = %e, "rejected charging window request");
                HOURS_ERROR_MESSAGE
            }
            Self::Fetch(e) => {
                error!(error = %e, "generation mix fetch failed");
                INTERNAL_ERROR_MESSAGE
            }
            Self::Window(e) => {
                warn!(error = %e, "no charging window available");
                INTERNAL_ERROR_MESSAGE
            }
            Self::Encode(e) => {
                error!(error = %e, "failed to encode response");
                INTERNAL_ERROR_MESSAGE
            }
        };
        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (self.status(), body).into_response()
    }
}
