use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use faultline_core::{Failure, Translator};

/// Replace responses that carry a [`Failure`] with its translated envelope
///
/// Responses without one pass through untouched.
pub async fn normalize_errors(State(translator): State<Arc<Translator>>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let mut response = next.run(request).await;

    let Some(failure) = response.extensions_mut().remove::<Failure>() else {
        return response;
    };

    tracing::debug!(%method, %path, kind = failure.kind(), "normalizing failed request");
    render(&translator, &failure)
}

/// Translate a failure and write it as a JSON response
pub fn render(translator: &Translator, failure: &Failure) -> Response {
    let translation = translator.translate(failure);

    faultline_telemetry::metrics::record_error(
        translation.sub_type.into(),
        translation.class.into(),
        translation.status.as_u16(),
    );

    (translation.status, Json(translation.envelope)).into_response()
}
