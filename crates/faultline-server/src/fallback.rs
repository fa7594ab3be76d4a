use std::any::Any;

use axum::response::{IntoResponse, Response};
use faultline_core::Failure;
use http::{Method, Uri};

use crate::ApiError;

/// Router fallback for paths nothing is routed at
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError(Failure::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_owned(),
    })
}

/// Router fallback for known paths hit with the wrong method
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError(Failure::MethodNotAllowed {
        message: format!("Request method '{method}' is not supported"),
    })
}

/// Turn a handler panic into an unclassified failure
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("handler panicked");

    ApiError(Failure::unclassified(format!("handler panicked: {message}"))).into_response()
}
