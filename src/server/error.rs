//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`mediacycle_common::Error`] so that route
//! handlers can return `Result<T, AppError>` directly. The response never
//! carries the error's own text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mediacycle_common::Error;

use super::pages;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: Error,
    with_page: bool,
}

impl AppError {
    /// An error answered with the generic HTML error page.
    pub fn new(inner: Error) -> Self {
        Self {
            inner,
            with_page: true,
        }
    }

    /// Answer with the bare status code and an empty body.
    pub fn without_body(mut self) -> Self {
        self.with_page = false;
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.inner.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.inner, "Server error in media handler");
        } else {
            tracing::debug!(status = %status, error = %self.inner, "Request refused");
        }

        if self.with_page {
            (status, pages::error_page(status)).into_response()
        } else {
            status.into_response()
        }
    }
}
