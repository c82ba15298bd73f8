//! Error types for option validation.
//!
//! Corresponds to the `ArgumentException` paths of `Appium.Net`'s
//! `AppiumOptions`.

use thiserror::Error;

/// Errors raised while adding a capability option.
///
/// Every variant is an invalid-argument failure surfaced synchronously to the
/// caller of the `add_*` methods. Finalization (`AppiumOptions::to_capabilities`)
/// never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The capability name was empty.
    #[error("capability name must not be empty")]
    EmptyName,

    /// The capability name is already claimed by a typed option on the driver
    /// options, which must be used instead of the free-form accumulator.
    #[error("there is already a typed option for the \"{name}\" capability; set the `{field}` field instead")]
    ReservedName {
        /// The rejected capability name.
        name: String,
        /// The typed field that owns the name.
        field: &'static str,
    },
}
