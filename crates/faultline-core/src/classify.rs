use http::StatusCode;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

use crate::failure::Failure;
use crate::field::{FieldErrorItem, render_items};
use crate::validate::Violation;

const ENUM_CONSTANT_PREFIX: &str = "No enum constant";
const DOWNSTREAM_IO_DETAIL: &str = "I/O error while calling downstream service";

/// Coarse classification clients can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorClass {
    /// A required value was not supplied
    Mandatory,
    /// A supplied value was rejected
    Invalid,
    /// No handler accepts this method, path or media type
    Routing,
    /// A called service failed
    Downstream,
    /// Nothing more specific applies
    Unexpected,
}

/// Fine-grained origin tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SubType {
    RequestBody,
    RequestParams,
    BindError,
    MissingParameter,
    MissingPathVariable,
    TypeMismatch,
    IllegalArgument,
    Http,
    RouteNotFound,
    DownstreamHttp,
    IoTimeout,
    InternalServerError,
}

/// Result of classifying a failure, before any envelope is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: StatusCode,
    pub class: ErrorClass,
    pub sub_type: SubType,
    pub detail: String,
    /// Failure kind name
    pub source_type: &'static str,
    /// Per-field detail for validation failures, in reported order
    pub errors: Vec<FieldErrorItem>,
}

impl Classification {
    fn new(status: StatusCode, class: ErrorClass, sub_type: SubType, detail: String, source_type: &'static str) -> Self {
        Self {
            status,
            class,
            sub_type,
            detail,
            source_type,
            errors: Vec::new(),
        }
    }
}

/// Decide status, class, sub-type and detail for a failure
///
/// Pure and total: every variant has exactly one outcome.
pub fn classify(failure: &Failure) -> Classification {
    let source_type = failure.kind();

    match failure {
        Failure::BodyValidationFailed { violations } => validation(
            violations,
            SubType::RequestBody,
            "Validation failed for request body",
            source_type,
        ),
        Failure::ConstraintViolated { violations } => validation(
            violations,
            SubType::RequestParams,
            "Validation failed for request parameters",
            source_type,
        ),
        Failure::BindingFailed { violations } => {
            validation(violations, SubType::BindError, "Parameter binding failed", source_type)
        }
        Failure::MissingParameter { name } => Classification::new(
            StatusCode::BAD_REQUEST,
            ErrorClass::Mandatory,
            SubType::MissingParameter,
            format!("Missing required parameter: {name}"),
            source_type,
        ),
        Failure::MissingPathVariable { name } => Classification::new(
            StatusCode::BAD_REQUEST,
            ErrorClass::Mandatory,
            SubType::MissingPathVariable,
            format!("Missing path variable: {name}"),
            source_type,
        ),
        Failure::TypeMismatch { name, required_type } => {
            let required = required_type.as_deref().unwrap_or("expected type");
            Classification::new(
                StatusCode::BAD_REQUEST,
                ErrorClass::Invalid,
                SubType::TypeMismatch,
                format!("Parameter '{name}' must be of type {required}"),
                source_type,
            )
        }
        Failure::BodyNotReadable => Classification::new(
            StatusCode::BAD_REQUEST,
            ErrorClass::Invalid,
            SubType::RequestBody,
            "Malformed JSON request body".to_owned(),
            source_type,
        ),
        Failure::MethodNotAllowed { message } => Classification::new(
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorClass::Routing,
            SubType::Http,
            message.clone(),
            source_type,
        ),
        Failure::MediaTypeUnsupported { message } => Classification::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorClass::Routing,
            SubType::Http,
            message.clone(),
            source_type,
        ),
        Failure::IllegalArgument { message } => Classification::new(
            StatusCode::BAD_REQUEST,
            ErrorClass::Invalid,
            SubType::IllegalArgument,
            illegal_argument_detail(message.as_deref()),
            source_type,
        ),
        Failure::RouteNotFound { method, path } => Classification::new(
            StatusCode::NOT_FOUND,
            ErrorClass::Routing,
            SubType::RouteNotFound,
            format!("No resource found for {method} {path}"),
            source_type,
        ),
        Failure::DownstreamHttpError {
            status, status_text, ..
        } => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            let detail = if status_text.trim().is_empty() {
                crate::status::status_name(status)
            } else {
                status_text.clone()
            };
            Classification::new(status, ErrorClass::Downstream, SubType::DownstreamHttp, detail, source_type)
        }
        // Transport errors carry internal URLs; the message is only logged
        Failure::DownstreamIoError { .. } => Classification::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorClass::Downstream,
            SubType::IoTimeout,
            DOWNSTREAM_IO_DETAIL.to_owned(),
            source_type,
        ),
        Failure::Unclassified { .. } => Classification::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorClass::Unexpected,
            SubType::InternalServerError,
            "An unexpected error occurred".to_owned(),
            source_type,
        ),
    }
}

/// Mandatory if any violation is a required-value rule, invalid otherwise
fn validation(violations: &[Violation], sub_type: SubType, prefix: &str, source_type: &'static str) -> Classification {
    let errors: Vec<FieldErrorItem> = violations.iter().map(FieldErrorItem::from_violation).collect();

    let class = if violations.iter().any(Violation::is_required) {
        ErrorClass::Mandatory
    } else {
        ErrorClass::Invalid
    };

    let detail = format!("{prefix}: {}", render_items(&errors));

    Classification {
        errors,
        ..Classification::new(StatusCode::BAD_REQUEST, class, sub_type, detail, source_type)
    }
}

/// Rewrite enum-constant lookups into a client-friendly message
fn illegal_argument_detail(message: Option<&str>) -> String {
    match message.map(str::trim) {
        None | Some("") => "Invalid argument".to_owned(),
        Some(message) if message.starts_with(ENUM_CONSTANT_PREFIX) => {
            let value = message
                .trim_end_matches('.')
                .rsplit(|c: char| c == '.' || c.is_whitespace())
                .next()
                .unwrap_or(message);
            format!("Invalid enum value '{value}'. Please use a valid option.")
        }
        Some(message) => message.to_owned(),
    }
}
