//! Error types for the Vaultgate SDK.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`]. The taxonomy has three caller-visible tiers:
//!
//! - **Argument validation** ([`GatewayError::InvalidArgument`]): rejected
//!   before any network I/O, based solely on input shape.
//! - **Lookup failure** ([`GatewayError::NotFound`]): the gateway has no
//!   matching resource of the requested kind for the given identifier.
//! - **Transport failure** ([`GatewayError::Http`]): network-level problems
//!   (timeouts, connection refused, TLS). Never mapped onto `NotFound`.
//!
//! Business-rule violations on mutating operations are *not* errors; they are
//! reported through [`GatewayResult::Failure`](crate::result::GatewayResult)
//! so callers check a success flag instead of catching exceptions for
//! expected failure paths.

use thiserror::Error;

/// Result type alias for gateway operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while talking to the gateway.
///
/// All variants include contextual information about what went wrong. The
/// messages are user-facing: argument-validation errors echo the offending
/// value so callers can see exactly what was rejected.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An input failed local shape validation.
    ///
    /// Raised synchronously, before any request is built or sent. Examples:
    /// an empty payment-method token, or a token containing characters
    /// outside the allowed set (letters, digits, underscore, dash).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No resource of the requested kind exists for the given identifier.
    ///
    /// Also raised when the gateway returns a record of a *different* kind
    /// for the identifier: a lookup never yields a cross-kind object.
    #[error("not found: {0}")]
    NotFound(String),

    /// HTTP communication with the gateway failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refused, DNS and TLS
    /// failures. Transport failures propagate as-is and are never folded
    /// into [`NotFound`](Self::NotFound).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A request or response body could not be (de)serialized as JSON.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The gateway returned a response this client cannot classify.
    ///
    /// Examples: an unexpected HTTP status, or a success body missing the
    /// expected resource envelope.
    #[error("unexpected gateway response: {0}")]
    UnexpectedResponse(String),

    /// Gateway configuration failed validation.
    #[error("invalid gateway configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// Returns true for failures that originate in the network layer.
    ///
    /// Useful for callers that implement their own retry policy; the SDK
    /// itself never retries.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
