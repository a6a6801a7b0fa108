use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// JSON envelope returned by every `/server` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(success: bool, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success,
            message: Some(message.into()),
            data,
        }
    }

    /// `success` mirrors whether `data` is present
    pub fn from_data(message: impl Into<String>, data: Option<T>) -> Self {
        Self::new(data.is_some(), message, data)
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
