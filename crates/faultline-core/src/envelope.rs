use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::classify::{Classification, ErrorClass, SubType, classify};
use crate::failure::Failure;
use crate::field::FieldErrorItem;
use crate::status::{code_name, status_name};

/// Envelope `message` used when no service label is configured
pub const DEFAULT_ERROR_LABEL: &str = "SERVICE_ERROR";

/// Envelope `message` for unrouted requests
pub const NOT_FOUND_LABEL: &str = "RESOURCE_NOT_FOUND";

/// Canonical error body returned for every failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Numeric HTTP status
    pub code: u16,
    /// Upper-snake status name
    pub status: String,
    /// Coarse label from a small fixed vocabulary
    pub message: String,
    /// Human-readable explanation
    pub detail: String,
    /// Failure kind that produced this envelope
    #[serde(rename = "type")]
    pub kind: String,
    pub sub_type: SubType,
    pub category: ErrorClass,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldErrorItem>,
}

/// Error body as produced by another service
///
/// Shares field names with [`ErrorEnvelope`] so the passthrough and the
/// synthesized fallback look the same on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamErrorEnvelope {
    pub code: u16,
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

impl DownstreamErrorEnvelope {
    /// Strictly decode a downstream body
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl From<ErrorEnvelope> for DownstreamErrorEnvelope {
    fn from(envelope: ErrorEnvelope) -> Self {
        Self {
            code: envelope.code,
            status: envelope.status,
            message: envelope.message,
            detail: Some(envelope.detail),
            kind: Some(envelope.kind),
            sub_type: Some(envelope.sub_type.to_string()),
        }
    }
}

/// Either envelope shape, serialized without a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Canonical(ErrorEnvelope),
    Downstream(DownstreamErrorEnvelope),
}

impl Envelope {
    /// Numeric code carried in the body
    pub const fn code(&self) -> u16 {
        match self {
            Self::Canonical(e) => e.code,
            Self::Downstream(e) => e.code,
        }
    }
}

/// Status line and body for one failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub status: StatusCode,
    pub envelope: Envelope,
    /// Local classification, kept even when the body is a downstream passthrough
    pub class: ErrorClass,
    pub sub_type: SubType,
}

/// Builds envelopes from classified failures
#[derive(Debug, Clone)]
pub struct Translator {
    error_label: String,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_LABEL)
    }
}

impl Translator {
    /// Create a translator whose envelopes carry `error_label` as `message`
    pub fn new(error_label: impl Into<String>) -> Self {
        Self {
            error_label: error_label.into(),
        }
    }

    pub fn error_label(&self) -> &str {
        &self.error_label
    }

    /// Classify a failure and build its response
    ///
    /// Never fails: downstream bodies that cannot be decoded fall back to a
    /// synthesized envelope in the same call.
    pub fn translate(&self, failure: &Failure) -> Translation {
        let classification = classify(failure);
        log_classification(failure, &classification);

        let status = classification.status;
        let class = classification.class;
        let sub_type = classification.sub_type;

        let envelope = match failure {
            Failure::DownstreamHttpError { status: code, body, .. } => {
                Envelope::Downstream(self.downstream_envelope(classification, *code, body))
            }
            _ => Envelope::Canonical(self.build(classification)),
        };

        Translation {
            status,
            envelope,
            class,
            sub_type,
        }
    }

    /// Build the canonical envelope for a classification
    pub fn build(&self, classification: Classification) -> ErrorEnvelope {
        let message = match classification.sub_type {
            SubType::RouteNotFound => NOT_FOUND_LABEL.to_owned(),
            _ => self.error_label.clone(),
        };

        ErrorEnvelope {
            code: classification.status.as_u16(),
            status: status_name(classification.status),
            message,
            detail: classification.detail,
            kind: classification.source_type.to_owned(),
            sub_type: classification.sub_type,
            category: classification.class,
            errors: classification.errors,
        }
    }

    /// Best-effort decode of a downstream error body
    ///
    /// Total over its inputs: anything that is not a matching JSON envelope
    /// yields the synthesized fallback carrying `status`.
    pub fn decode_downstream(&self, status: u16, status_text: &str, raw_body: &str) -> DownstreamErrorEnvelope {
        let failure = Failure::DownstreamHttpError {
            status,
            status_text: status_text.to_owned(),
            body: String::new(),
        };
        self.downstream_envelope(classify(&failure), status, raw_body)
    }

    fn downstream_envelope(
        &self,
        classification: Classification,
        status: u16,
        raw_body: &str,
    ) -> DownstreamErrorEnvelope {
        match DownstreamErrorEnvelope::decode(raw_body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::debug!(error = %e, "downstream error body is not an envelope, synthesizing one");
                // Body carries the downstream's own code even when the status line was clamped
                DownstreamErrorEnvelope {
                    code: status,
                    status: code_name(status),
                    ..DownstreamErrorEnvelope::from(self.build(classification))
                }
            }
        }
    }
}

fn log_classification(failure: &Failure, classification: &Classification) {
    let status = classification.status.as_u16();
    let sub_type = classification.sub_type.as_ref();
    let kind = classification.source_type;

    match failure {
        Failure::Unclassified { message } => {
            tracing::error!(status, sub_type, kind, error = %message, "unexpected failure while handling request");
        }
        Failure::DownstreamHttpError { status_text, .. } => {
            tracing::error!(status, sub_type, kind, status_text = %status_text, "downstream service returned an error");
        }
        Failure::DownstreamIoError { message } => {
            tracing::error!(status, sub_type, kind, error = %message, "downstream service unreachable");
        }
        _ => {
            tracing::warn!(status, sub_type, kind, detail = %classification.detail, "request rejected");
        }
    }
}
