//! Success/failure result model for mutating operations.
//!
//! Operations that can fail for expected business reasons (`create`,
//! `update`) return a [`GatewayResult`] instead of raising: a token
//! collision on update is an ordinary outcome, not an exception. Callers
//! pattern-match or check [`GatewayResult::is_success`] and inspect the
//! attached [`ValidationErrorSet`] on failure.

use serde::Deserialize;

/// One field-scoped validation error reported by the gateway.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    /// The request attribute the error is scoped to (e.g. `token`).
    pub attribute: String,
    /// Stable gateway error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Ordered collection of field-scoped validation errors.
///
/// Errors keep the order the gateway reported them in.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrorSet {
    errors: Vec<ValidationError>,
}

impl ValidationErrorSet {
    /// Creates a set from a list of errors.
    #[must_use]
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Returns true if no errors are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over the errors in reported order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Returns the errors scoped to one attribute, in reported order.
    pub fn on_attribute<'a>(
        &'a self,
        attribute: &'a str,
    ) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.attribute == attribute)
    }
}

impl<'a> IntoIterator for &'a ValidationErrorSet {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Outcome of a mutating operation.
///
/// `Success` carries the resulting record; `Failure` carries the gateway's
/// validation errors. A `Failure` means the gateway rejected the mutation
/// and left existing records untouched.
///
/// # Examples
///
/// ```
/// use vaultgate::result::{GatewayResult, ValidationErrorSet};
///
/// let result: GatewayResult<String> = GatewayResult::Success("record".to_owned());
/// assert!(result.is_success());
/// assert_eq!(result.success(), Some(&"record".to_owned()));
/// ```
#[must_use = "mutation outcomes should be checked for success"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayResult<T> {
    /// The mutation was applied; carries the resulting record.
    Success(T),
    /// The gateway rejected the mutation for business reasons.
    Failure(ValidationErrorSet),
}

impl<T> GatewayResult<T> {
    /// Returns true if the mutation was applied.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if the gateway rejected the mutation.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Returns the record on success.
    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(record) => Some(record),
            Self::Failure(_) => None,
        }
    }

    /// Consumes the result and returns the record on success.
    #[must_use]
    pub fn into_success(self) -> Option<T> {
        match self {
            Self::Success(record) => Some(record),
            Self::Failure(_) => None,
        }
    }

    /// Returns the validation errors on failure.
    #[must_use]
    pub fn errors(&self) -> Option<&ValidationErrorSet> {
        match self {
            Self::Success(_) => None,
            Self::Failure(errors) => Some(errors),
        }
    }
}

/// Error envelope the gateway attaches to 422 responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    /// Top-level summary message.
    #[serde(default)]
    #[allow(dead_code, reason = "deserialized for completeness of the wire shape")]
    pub message: String,
    /// Field-scoped errors.
    #[serde(default)]
    pub errors: ValidationErrorSet,
}
