//! HTTP rendering of [`AppError`]
//!
//! Every failed gateway call answers with the same JSON shape, so the
//! storefront client can read `success` and `message` without caring which
//! crate produced the error.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::app_error::AppError;

impl AppError {
    /// Body sent to clients. The source error is never included.
    pub fn to_body(&self) -> serde_json::Value {
        // RFC 7807 problem details, plus the `success` flag clients branch on
        serde_json::json!({
            "success": false,
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "message": self.message(),
            "action": self.action(),
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_body())).into_response()
    }
}
