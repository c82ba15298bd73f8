//! # Appium Options - Rust Port
//!
//! A Rust port of the capability-options layer of the Appium.Net WebDriver
//! client.
//!
//! Callers accumulate named capability values on [`AppiumOptions`], typed
//! fields and free-form entries alike, and finalize with
//! [`AppiumOptions::to_capabilities`] to obtain the [`Capabilities`] payload
//! that a remote-driver session request serializes. Names are validated
//! eagerly; finalization registers non-namespaced names with the
//! [`ComplianceRegistry`] so they survive W3C spec-compliance filtering.
//!
//! The remote-driver protocol client, wire transport, and session
//! establishment are out of scope: this crate only shapes the in-memory
//! capability mapping.

pub mod capabilities;
pub mod error;
pub mod options;

pub use capabilities::{Capabilities, CapabilitiesMapSource, ComplianceRegistry};
pub use error::CapabilityError;
pub use options::{AppiumOptions, DriverOptions};

/// Library version matching the ported Appium.Net client line.
pub const VERSION: &str = "5.2.0";
