//! Failure classification and canonical error envelopes
//!
//! A host maps whatever went wrong while serving a request onto a [`Failure`],
//! then hands it to a [`Translator`] which returns the status code and the body
//! to write. Nothing here performs I/O or serializes to the wire.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod classify;
mod envelope;
mod failure;
mod field;
mod status;
mod validate;

pub use classify::{Classification, ErrorClass, SubType, classify};
pub use envelope::{
    DEFAULT_ERROR_LABEL, DownstreamErrorEnvelope, Envelope, ErrorEnvelope, NOT_FOUND_LABEL, Translation, Translator,
};
pub use failure::{Failure, IntoFailure};
pub use field::{FieldErrorItem, leaf_field, render_items, rule_code};
pub use status::{code_name, status_name};
pub use validate::{Rule, Validate, Violation, Violations};

/// Translate with the default `SERVICE_ERROR` label
pub fn translate(failure: &Failure) -> Translation {
    Translator::default().translate(failure)
}
