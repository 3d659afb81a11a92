//! Order Error Types
//!
//! Order-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Order-specific result type alias
pub type OrderResult<T> = Result<T, OrderError>;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order has no line items")]
    EmptyOrder,

    #[error("Shipping address is incomplete")]
    IncompleteAddress,

    /// A line with a zero quantity or negative price
    #[error("Invalid line item: {0}")]
    InvalidLine(String),

    #[error("Order has more than {max} line items")]
    TooManyLines { max: usize },

    /// Missing, or owned by someone else
    #[error("Order not found")]
    NotFound,

    /// The verified token's subject is not a user id
    #[error("Token subject is not a valid user id")]
    InvalidSubject,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrderError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            OrderError::EmptyOrder
            | OrderError::IncompleteAddress
            | OrderError::InvalidLine(_)
            | OrderError::TooManyLines { .. } => StatusCode::BAD_REQUEST,
            OrderError::NotFound => StatusCode::NOT_FOUND,
            OrderError::InvalidSubject => StatusCode::UNAUTHORIZED,
            OrderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::EmptyOrder
            | OrderError::IncompleteAddress
            | OrderError::InvalidLine(_)
            | OrderError::TooManyLines { .. } => ErrorKind::BadRequest,
            OrderError::NotFound => ErrorKind::NotFound,
            OrderError::InvalidSubject => ErrorKind::Unauthorized,
            OrderError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = match self {
            OrderError::Internal(_) => AppError::internal("An internal error occurred"),
            _ => AppError::new(self.kind(), self.to_string()),
        };

        match self {
            OrderError::EmptyOrder => err.with_action("Add at least one item to your cart"),
            OrderError::IncompleteAddress => {
                err.with_action("Fill in name, street, city, postal code and country")
            }
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            OrderError::Internal(msg) => {
                tracing::error!(message = %msg, "Orders internal error");
            }
            OrderError::InvalidSubject => {
                tracing::warn!("Verified token carried a non-uuid subject");
            }
            _ => {
                tracing::debug!(error = %self, "Order error");
            }
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
