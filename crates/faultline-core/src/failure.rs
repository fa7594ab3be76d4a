use strum::IntoStaticStr;

use crate::validate::{Violation, Violations};

/// Every failure condition the translator knows how to normalize
///
/// The set is closed: the host maps whatever went wrong onto one of these
/// variants, carrying only the data its classification rule needs.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum Failure {
    /// Deserialized request body failed its constraints
    BodyValidationFailed { violations: Vec<Violation> },
    /// Query or path parameters failed their constraints
    ConstraintViolated { violations: Vec<Violation> },
    /// Required query parameter absent
    MissingParameter { name: String },
    /// Required path variable absent
    MissingPathVariable { name: String },
    /// Parameter could not be converted to its declared type
    TypeMismatch {
        name: String,
        required_type: Option<String>,
    },
    /// Query or form values could not be bound onto the target type
    BindingFailed { violations: Vec<Violation> },
    /// Request body could not be parsed at all
    BodyNotReadable,
    /// Route exists but not for this method
    MethodNotAllowed { message: String },
    /// Request content type is not accepted
    MediaTypeUnsupported { message: String },
    /// A value was rejected while handling the request
    IllegalArgument { message: Option<String> },
    /// Nothing is routed at this method and path
    RouteNotFound { method: String, path: String },
    /// A called service answered with an error status
    DownstreamHttpError {
        status: u16,
        status_text: String,
        body: String,
    },
    /// A called service could not be reached or did not answer in time
    DownstreamIoError { message: String },
    /// Anything else; the message is logged, never returned
    Unclassified { message: String },
}

impl Failure {
    /// Name of the failure kind, reported as the envelope `type`
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    pub fn body_validation(violations: Violations) -> Self {
        Self::BodyValidationFailed {
            violations: violations.into_vec(),
        }
    }

    pub fn constraint_violation(violations: Violations) -> Self {
        Self::ConstraintViolated {
            violations: violations.into_vec(),
        }
    }

    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::Unclassified {
            message: message.into(),
        }
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::IllegalArgument {
            message: Some(message.into()),
        }
    }
}

/// Domain errors that know which failure kind they represent
///
/// Implemented by each service's own error type so handlers can return it
/// directly and still get a canonical envelope.
pub trait IntoFailure {
    fn into_failure(self) -> Failure;
}

impl IntoFailure for Failure {
    fn into_failure(self) -> Failure {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_variant_name() {
        assert_eq!(Failure::BodyNotReadable.kind(), "BodyNotReadable");
        assert_eq!(
            Failure::DownstreamIoError {
                message: "connection refused".to_owned()
            }
            .kind(),
            "DownstreamIoError"
        );
        assert_eq!(Failure::unclassified("boom").kind(), "Unclassified");
    }
}
