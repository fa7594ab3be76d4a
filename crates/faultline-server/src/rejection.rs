//! Mapping of axum extractor rejections onto failure kinds

use std::sync::OnceLock;

use axum::extract::MatchedPath;
use axum::extract::path::ErrorKind;
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use faultline_core::{Failure, Rule, Violation};
use regex::Regex;

fn missing_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"missing field `([^`]+)`").expect("must be valid regex"))
}

fn leading_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `address.zip: invalid type ...` as produced by serde_path_to_error
    RE.get_or_init(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_.\[\]]*): (.+)$").expect("must be valid regex"))
}

fn expected_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `invalid type: string "abc", expected u32`
    RE.get_or_init(|| Regex::new(r", expected (.+?)(?: at line \d+ column \d+)?$").expect("must be valid regex"))
}

fn path_variable_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\*?([^}]+)\}").expect("must be valid regex"))
}

/// Serde's message with axum's "Failed to deserialize ...: " prefix removed
fn serde_message(body_text: &str) -> &str {
    body_text.split_once(": ").map_or(body_text, |(_, rest)| rest)
}

/// Split `path: message`, defaulting the path when serde reported none
fn located(message: &str, default_path: &str) -> (String, String) {
    leading_path_re().captures(message).map_or_else(
        || (default_path.to_owned(), message.to_owned()),
        |caps| (caps[1].to_owned(), caps[2].to_owned()),
    )
}

/// Type a serde conversion error says it wanted
///
/// Falls back on the std parse error texts, which name no type.
fn expected_type(message: &str) -> Option<String> {
    if let Some(caps) = expected_re().captures(message) {
        return Some(caps[1].to_owned());
    }

    let message = message.trim();
    if message.contains("invalid digit")
        || message.contains("number too large")
        || message.contains("number too small")
        || message.contains("cannot parse integer")
    {
        Some("integer".to_owned())
    } else if message.contains("invalid float literal") {
        Some("number".to_owned())
    } else if message.contains("`true` or `false`") {
        Some("boolean".to_owned())
    } else {
        None
    }
}

/// Field named by a serde "missing field" error, prefixed with its parent path
fn missing_field(message: &str) -> Option<String> {
    let field = missing_field_re().captures(message)?.get(1)?.as_str();

    match leading_path_re().captures(message) {
        Some(caps) if !caps[2].starts_with("missing field") => None,
        Some(caps) => Some(format!("{}.{field}", &caps[1])),
        None => Some(field.to_owned()),
    }
}

pub fn json(rejection: &JsonRejection, content_type: &str) -> Failure {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => Failure::MediaTypeUnsupported {
            message: format!("Content type '{content_type}' not supported"),
        },
        JsonRejection::JsonDataError(e) => {
            let message = serde_message(&e.body_text()).to_owned();
            match missing_field(&message) {
                Some(path) => Failure::BodyValidationFailed {
                    violations: vec![Violation::new(path, Some(Rule::NotNull), "must not be null")],
                },
                None => Failure::BodyNotReadable,
            }
        }
        _ => Failure::BodyNotReadable,
    }
}

pub fn query(rejection: &QueryRejection) -> Failure {
    match rejection {
        QueryRejection::FailedToDeserializeQueryString(e) => {
            let message = serde_message(&e.body_text()).to_owned();
            if let Some(name) = missing_field(&message) {
                return Failure::MissingParameter { name };
            }

            // A failure located on one parameter is a conversion of that parameter
            match leading_path_re().captures(&message) {
                Some(caps) => Failure::TypeMismatch {
                    name: caps[1].to_owned(),
                    required_type: expected_type(&caps[2]),
                },
                None => Failure::BindingFailed {
                    violations: vec![Violation::new("query", None, message)],
                },
            }
        }
        other => Failure::unclassified(other.body_text()),
    }
}

pub fn form(rejection: &FormRejection, content_type: &str) -> Failure {
    match rejection {
        FormRejection::InvalidFormContentType(_) => Failure::MediaTypeUnsupported {
            message: format!("Content type '{content_type}' not supported"),
        },
        FormRejection::FailedToDeserializeForm(e) => bind_failure(&e.body_text()),
        FormRejection::FailedToDeserializeFormBody(e) => bind_failure(&e.body_text()),
        _ => Failure::BodyNotReadable,
    }
}

fn bind_failure(body_text: &str) -> Failure {
    let message = serde_message(body_text);

    let violation = missing_field(message).map_or_else(
        || {
            let (path, message) = located(message, "form");
            Violation::new(path, None, message)
        },
        |path| Violation::new(path, Some(Rule::NotNull), "must not be null"),
    );

    Failure::BindingFailed {
        violations: vec![violation],
    }
}

pub fn path(rejection: &PathRejection, matched: Option<&MatchedPath>) -> Failure {
    let names = matched.map(|m| path_variables(m.as_str())).unwrap_or_default();
    let name_at = |index: usize| names.get(index).cloned().unwrap_or_else(|| index.to_string());

    match rejection {
        PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
            ErrorKind::ParseErrorAtKey { key, expected_type, .. } => Failure::TypeMismatch {
                name: key.clone(),
                required_type: Some((*expected_type).to_owned()),
            },
            ErrorKind::ParseErrorAtIndex {
                index, expected_type, ..
            } => Failure::TypeMismatch {
                name: name_at(*index),
                required_type: Some((*expected_type).to_owned()),
            },
            ErrorKind::ParseError { expected_type, .. } => Failure::TypeMismatch {
                name: name_at(0),
                required_type: Some((*expected_type).to_owned()),
            },
            ErrorKind::WrongNumberOfParameters { .. } => Failure::MissingPathVariable {
                name: joined(&names),
            },
            _ => Failure::BindingFailed {
                violations: vec![Violation::new("path", None, serde_message(&e.body_text()))],
            },
        },
        PathRejection::MissingPathParams(_) => Failure::MissingPathVariable { name: joined(&names) },
        other => Failure::unclassified(other.body_text()),
    }
}

/// Variable names declared in a route like `/users/{id}/orders/{order_id}`
fn path_variables(route: &str) -> Vec<String> {
    path_variable_re()
        .captures_iter(route)
        .map(|caps| caps[1].to_owned())
        .collect()
}

fn joined(names: &[String]) -> String {
    if names.is_empty() {
        "path".to_owned()
    } else {
        names.join(", ")
    }
}
