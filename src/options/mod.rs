//! # Driver options
//!
//! Option builders for the session-creation payload. [`DriverOptions`] holds
//! the typed capability fields and the "global" accumulator;
//! [`AppiumOptions`] layers the Appium-specific accumulator on top and owns
//! finalization.

pub mod appium;
pub mod driver;

pub use appium::AppiumOptions;
pub use driver::DriverOptions;
