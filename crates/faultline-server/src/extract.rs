//! Extractors whose rejections are failures
//!
//! Each wraps the matching axum extractor, maps its rejection onto a
//! failure kind, then runs [`Validate`] on the extracted value.

use axum::Json;
use axum::extract::{Form, FromRequest, FromRequestParts, MatchedPath, Path, Query, Request};
use faultline_core::{Failure, Validate};
use http::header::CONTENT_TYPE;
use http::request::Parts;
use serde::de::DeserializeOwned;

use crate::{ApiError, rejection};

fn content_type(request: &Request) -> String {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

/// JSON request body, validated
///
/// Unparseable bodies are `BodyNotReadable` and failed checks are
/// `BodyValidationFailed`.
///
/// Declare required fields as `Option<T>` and check them with `not_null` or
/// `not_blank`, so an absent field is reported alongside every other failed
/// check. A missing non-`Option` field stops deserialization: it is reported
/// as a lone `REQUIRED` item and [`Validate`] does not run.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(&req);

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(rejection::json(&rejection, &content_type)))?;

        let violations = value.validate();
        if !violations.is_empty() {
            return Err(ApiError(Failure::body_validation(violations)));
        }

        Ok(Self(value))
    }
}

/// Query string parameters, validated
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError(rejection::query(&rejection)))?;

        let violations = value.validate();
        if !violations.is_empty() {
            return Err(ApiError(Failure::constraint_violation(violations)));
        }

        Ok(Self(value))
    }
}

/// URL-encoded form bound onto `T`, validated
///
/// Every failure here, including failed checks, is a `BindingFailed`.
#[derive(Debug, Clone)]
pub struct ValidForm<T>(pub T);

impl<S, T> FromRequest<S> for ValidForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(&req);

        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(rejection::form(&rejection, &content_type)))?;

        let violations = value.validate();
        if !violations.is_empty() {
            return Err(ApiError(Failure::BindingFailed {
                violations: violations.into_vec(),
            }));
        }

        Ok(Self(value))
    }
}

/// Path variables
///
/// Conversion failures are `TypeMismatch` naming the variable; absent
/// variables are `MissingPathVariable`.
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                let matched = parts.extensions.get::<MatchedPath>();
                Err(ApiError(rejection::path(&rejection, matched)))
            }
        }
    }
}
