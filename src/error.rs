use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::booking::BookingNotice;
use crate::store::StoreError;
use crate::students::StudentError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingNotice),
    #[error(transparent)]
    Student(#[from] StudentError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Booking(notice) => match notice {
                BookingNotice::MissingDetails
                | BookingNotice::SelectionLocked
                | BookingNotice::NothingSelected
                | BookingNotice::UnknownSeat(_) => StatusCode::BAD_REQUEST,
                BookingNotice::QuantityExceeded { .. }
                | BookingNotice::QuantityBelowSelection { .. }
                | BookingNotice::SeatReserved(_) => StatusCode::CONFLICT,
            },
            AppError::Student(StudentError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Student(StudentError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Student(StudentError::Validation(fields)) => json!({
                "success": false,
                "error": self.to_string(),
                "errors": fields,
            }),
            AppError::Store(e) => {
                tracing::error!("storage failure: {:?}", e);
                json!({
                    "success": false,
                    "error": "Failed to save booking history"
                })
            }
            _ => json!({
                "success": false,
                "error": self.to_string(),
            }),
        };
        (status, Json(body)).into_response()
    }
}
