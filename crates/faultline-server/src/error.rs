use axum::response::{IntoResponse, Response};
use faultline_core::{Failure, IntoFailure};
use http::StatusCode;

/// Handler error carrying the failure to normalize
///
/// Converting to a response only attaches the failure; the
/// [`normalize_errors`](crate::normalize_errors) layer renders the envelope.
/// Any domain error implementing [`IntoFailure`] converts with `?`.
#[derive(Debug)]
pub struct ApiError(pub Failure);

impl ApiError {
    pub const fn failure(&self) -> &Failure {
        &self.0
    }
}

impl<E: IntoFailure> From<E> for ApiError {
    fn from(error: E) -> Self {
        Self(error.into_failure())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self.0);
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
