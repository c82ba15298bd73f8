//! Base driver options — typed capability fields, reserved-name validation,
//! and capability generation.
//!
//! Corresponds to the `DriverOptions` base class the original `AppiumOptions`
//! inherits from. The Rust port uses composition instead:
//! [`AppiumOptions`](super::AppiumOptions) embeds a `DriverOptions` and
//! delegates validation and generation to it.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::capabilities::{Capabilities, ComplianceRegistry};
use crate::error::CapabilityError;

/// Wire name of the `platform_name` typed option.
pub const PLATFORM_NAME: &str = "platformName";
/// Wire name of the `browser_name` typed option.
pub const BROWSER_NAME: &str = "browserName";
/// Wire name of the `browser_version` typed option.
pub const BROWSER_VERSION: &str = "browserVersion";
/// Wire name of the `accept_insecure_certs` typed option.
pub const ACCEPT_INSECURE_CERTS: &str = "acceptInsecureCerts";
/// Wire name of the `page_load_strategy` typed option.
pub const PAGE_LOAD_STRATEGY: &str = "pageLoadStrategy";
/// Wire name of the `unhandled_prompt_behavior` typed option.
pub const UNHANDLED_PROMPT_BEHAVIOR: &str = "unhandledPromptBehavior";
/// Wire name of the `automation_name` typed option.
pub const AUTOMATION_NAME: &str = "appium:automationName";
/// Wire name of the `device_name` typed option.
pub const DEVICE_NAME: &str = "appium:deviceName";
/// Wire name of the `app` typed option.
pub const APP: &str = "appium:app";

/// Capability names claimed by typed fields, mapped to the field that owns
/// them. Free-form accumulators reject these names.
static RESERVED_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (PLATFORM_NAME, "platform_name"),
        (BROWSER_NAME, "browser_name"),
        (BROWSER_VERSION, "browser_version"),
        (ACCEPT_INSECURE_CERTS, "accept_insecure_certs"),
        (PAGE_LOAD_STRATEGY, "page_load_strategy"),
        (UNHANDLED_PROMPT_BEHAVIOR, "unhandled_prompt_behavior"),
        (AUTOMATION_NAME, "automation_name"),
        (DEVICE_NAME, "device_name"),
        (APP, "app"),
    ])
});

/// Base driver options: typed capability fields plus a free-form accumulator
/// for "global" (non vendor-scoped) capabilities.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Target platform, e.g. "iOS" or "Android".
    pub platform_name: Option<String>,
    /// Browser to launch for web sessions.
    pub browser_name: Option<String>,
    /// Browser version for web sessions.
    pub browser_version: Option<String>,
    /// Whether to skip TLS certificate validation.
    pub accept_insecure_certs: Option<bool>,
    /// Page load strategy: "normal", "eager", or "none".
    pub page_load_strategy: Option<String>,
    /// What to do with unexpected alerts.
    pub unhandled_prompt_behavior: Option<String>,
    /// Automation engine, e.g. "XCUITest" or "UiAutomator2".
    pub automation_name: Option<String>,
    /// Device under test, e.g. "iPhone 15".
    pub device_name: Option<String>,
    /// Path or URL of the app to install.
    pub app: Option<String>,

    additional_options: Map<String, Value>,
    registry: ComplianceRegistry,
}

impl DriverOptions {
    /// Create empty options backed by the process-wide compliance registry.
    pub fn new() -> Self {
        Self::with_registry(ComplianceRegistry::global())
    }

    /// Create empty options backed by the given compliance registry.
    ///
    /// Injecting an isolated registry keeps the registration side effect of
    /// finalization from leaking across unrelated sessions.
    pub fn with_registry(registry: ComplianceRegistry) -> Self {
        Self {
            platform_name: None,
            browser_name: None,
            browser_version: None,
            accept_insecure_certs: None,
            page_load_strategy: None,
            unhandled_prompt_behavior: None,
            automation_name: None,
            device_name: None,
            app: None,
            additional_options: Map::new(),
            registry,
        }
    }

    /// The compliance registry this options object registers against.
    pub fn registry(&self) -> &ComplianceRegistry {
        &self.registry
    }

    /// Reject names that are empty or claimed by a typed field.
    pub fn validate_capability_name(&self, name: &str) -> Result<(), CapabilityError> {
        if name.is_empty() {
            return Err(CapabilityError::EmptyName);
        }
        if let Some(field) = RESERVED_NAMES.get(name).copied() {
            return Err(CapabilityError::ReservedName {
                name: name.to_string(),
                field,
            });
        }
        Ok(())
    }

    /// Add a capability not covered by a typed field.
    ///
    /// Adding a name that is already present overwrites the existing value.
    pub fn add_additional_option(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<(), CapabilityError> {
        self.validate_capability_name(name)?;
        self.additional_options.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Read-only view of the free-form accumulator.
    pub fn additional_options(&self) -> &Map<String, Value> {
        &self.additional_options
    }

    /// Generate the capabilities payload for this options object.
    ///
    /// Typed fields are written first, then the free-form entries (last write
    /// wins on collision, though typed names are rejected at insert time).
    /// In W3C-strict mode the payload takes the `alwaysMatch` form and every
    /// entry that is neither vendor-namespaced nor known to the compliance
    /// registry is dropped; non-strict mode keeps everything in a flat map.
    pub fn generate_capabilities(&self, w3c_strict: bool) -> Capabilities {
        let mut map = Map::new();

        let string_fields = [
            (PLATFORM_NAME, &self.platform_name),
            (BROWSER_NAME, &self.browser_name),
            (BROWSER_VERSION, &self.browser_version),
            (PAGE_LOAD_STRATEGY, &self.page_load_strategy),
            (UNHANDLED_PROMPT_BEHAVIOR, &self.unhandled_prompt_behavior),
            (AUTOMATION_NAME, &self.automation_name),
            (DEVICE_NAME, &self.device_name),
            (APP, &self.app),
        ];
        for (name, value) in string_fields {
            if let Some(value) = value {
                map.insert(name.to_string(), Value::String(value.clone()));
            }
        }
        if let Some(accept) = self.accept_insecure_certs {
            map.insert(ACCEPT_INSECURE_CERTS.to_string(), Value::Bool(accept));
        }

        for (name, value) in &self.additional_options {
            map.insert(name.clone(), value.clone());
        }

        if w3c_strict {
            let before = map.len();
            map.retain(|name, _| self.registry.is_known(name));
            let dropped = before - map.len();
            if dropped > 0 {
                log::debug!("dropped {} non-compliant capability name(s)", dropped);
            }
            Capabilities::w3c(map)
        } else {
            Capabilities::legacy(map)
        }
    }
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self::new()
    }
}
