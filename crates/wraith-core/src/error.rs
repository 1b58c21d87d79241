use std::fmt;
use thiserror::Error as ThisError;

///
/// ProxyError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct ProxyError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `class`.
    pub detail: Option<ErrorDetail>,
}

impl ProxyError {
    /// Construct a ProxyError without structured detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct the not-found error surfaced when a load-by-identifier
    /// returns no row. Carries the entity path and the flattened identifier.
    pub fn entity_not_found(path: &'static str, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();

        Self {
            class: ErrorClass::NotFound,
            origin: ErrorOrigin::Persist,
            message: format!("entity '{path}' not found for identifier [{identifier}]"),
            detail: Some(ErrorDetail::EntityNotFound { path, identifier }),
        }
    }

    /// Construct an initializer-origin invariant violation.
    pub(crate) fn initializer_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Initializer,
            message.into(),
        )
    }

    /// Construct a cloner-origin invariant violation.
    pub(crate) fn cloner_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Cloner,
            message.into(),
        )
    }

    /// Construct an instance-origin unsupported error.
    pub(crate) fn instance_unsupported(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::Unsupported,
            ErrorOrigin::Instance,
            message.into(),
        )
    }

    /// Construct a serialize-origin internal error.
    pub(crate) fn serialize_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Serialize, message.into())
    }

    /// Construct a definition-origin unsupported error.
    ///
    /// Raised by the assembler when the skip predicate rejects a type.
    pub fn definition_unsupported(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::Unsupported,
            ErrorOrigin::Definition,
            message.into(),
        )
    }

    /// Construct a definition-origin internal error.
    pub fn definition_internal(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::Internal,
            ErrorOrigin::Definition,
            message.into(),
        )
    }

    /// Construct a persist-origin internal error.
    pub fn persist_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Persist, message.into())
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.detail, Some(ErrorDetail::EntityNotFound { .. }))
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured error detail carried by [`ProxyError`].
/// This enum is intentionally extensible.
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("entity '{path}' not found for identifier [{identifier}]")]
    EntityNotFound {
        path: &'static str,
        identifier: String,
    },
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    NotFound,
    Internal,
    Unsupported,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Initializer,
    Cloner,
    Serialize,
    Persist,
    Instance,
    Definition,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Initializer => "initializer",
            Self::Cloner => "cloner",
            Self::Serialize => "serialize",
            Self::Persist => "persist",
            Self::Instance => "instance",
            Self::Definition => "definition",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_not_found_carries_structured_detail() {
        let err = ProxyError::entity_not_found("app::Order", "id=42");

        assert!(err.is_not_found());
        assert_eq!(err.class, ErrorClass::NotFound);
        assert_eq!(err.origin, ErrorOrigin::Persist);
        assert!(err.message.contains("app::Order"));
        assert!(err.message.contains("id=42"));
    }

    #[test]
    fn plain_errors_are_not_not_found() {
        let err = ProxyError::initializer_invariant("proxy has no initializer");

        assert!(!err.is_not_found());
        assert_eq!(
            err.display_with_class(),
            "initializer:invariant_violation: proxy has no initializer"
        );
    }
}
