//! Sealed trait marker for Transport implementations.
//!
//! This module prevents external implementations of the `Transport` trait.
//! Transports handle merchant credentials directly, so all implementations
//! live in this crate where credential handling can be reviewed.

pub(crate) mod private {
    /// Sealed trait marker.
    ///
    /// This trait cannot be implemented outside this crate, preventing
    /// external Transport implementations that might mishandle credentials.
    pub trait Sealed {}
}
