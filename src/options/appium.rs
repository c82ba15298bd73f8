//! Appium driver options — accumulates vendor capabilities and splices them
//! into the generated payload.
//!
//! Corresponds to `Appium.Net`'s `AppiumOptions`.

use serde_json::{Map, Value};

use crate::capabilities::{Capabilities, CapabilitiesMapSource};
use crate::error::CapabilityError;

use super::DriverOptions;

/// Options for an Appium session: the typed base options plus a free-form
/// accumulator for capabilities not yet covered by a typed field.
///
/// The accumulator is consumed read-only by [`Self::to_capabilities`], so a
/// single options object can be finalized any number of times, each call
/// producing a fresh payload with equal content.
#[derive(Debug, Clone, Default)]
pub struct AppiumOptions {
    base: DriverOptions,
    appium_options: Map<String, Value>,
}

impl AppiumOptions {
    /// Create empty options backed by the process-wide compliance registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options wrapping an existing base options object.
    ///
    /// Useful for injecting a base with an isolated compliance registry.
    pub fn with_base(base: DriverOptions) -> Self {
        Self {
            base,
            appium_options: Map::new(),
        }
    }

    /// The underlying base options (typed fields, global accumulator).
    pub fn base(&self) -> &DriverOptions {
        &self.base
    }

    /// Mutable access to the underlying base options.
    pub fn base_mut(&mut self) -> &mut DriverOptions {
        &mut self.base
    }

    /// Add a capability not yet covered by a typed option.
    ///
    /// The name must be non-empty and must not collide with a typed option on
    /// the base options; either violation is a [`CapabilityError`] surfaced
    /// immediately, never deferred to finalization. Adding a name that is
    /// already present overwrites the existing value.
    pub fn add_additional_appium_option(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<(), CapabilityError> {
        self.base.validate_capability_name(name)?;
        self.appium_options.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Add a capability to the Appium-specific accumulator.
    #[deprecated(note = "use `add_additional_appium_option` instead")]
    pub fn add_additional_capability(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<(), CapabilityError> {
        #[allow(deprecated)]
        self.add_additional_capability_scoped(name, value, false)
    }

    /// Legacy two-tier insert: `is_global` routes the capability to the base
    /// options' accumulator instead of the Appium-specific one.
    #[deprecated(note = "use `add_additional_appium_option` or `DriverOptions::add_additional_option` instead")]
    pub fn add_additional_capability_scoped(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        is_global: bool,
    ) -> Result<(), CapabilityError> {
        if is_global {
            self.base.add_additional_option(name, value)
        } else {
            self.add_additional_appium_option(name, value)
        }
    }

    /// Finalize: turn the accumulated options into a capabilities payload.
    ///
    /// Non-namespaced accumulated names are first registered with the
    /// compliance registry so later W3C filtering keeps them; for options
    /// backed by the process-wide registry this registration outlives the
    /// call and affects every subsequently generated payload in the process.
    /// The base layer then generates its payload in non-strict mode and the
    /// accumulated entries are written over it, local values winning on
    /// collision. A generated payload that exposes no capability map is
    /// returned unmodified.
    pub fn to_capabilities(&self) -> Capabilities {
        let non_namespaced: Vec<&str> = self
            .appium_options
            .keys()
            .map(String::as_str)
            .filter(|name| !name.contains(':'))
            .collect();
        if !non_namespaced.is_empty() {
            log::debug!(
                "registering {} non-namespaced option(s) as spec compliant",
                non_namespaced.len()
            );
            self.base.registry().register(non_namespaced);
        }

        let mut caps = self.base.generate_capabilities(false);
        if let Some(map) = caps.capabilities_map_mut() {
            for (name, value) in &self.appium_options {
                map.insert(name.clone(), value.clone());
            }
        }
        caps
    }

    /// Live view of the accumulated options.
    ///
    /// This borrows the internal map rather than copying it.
    pub fn options(&self) -> &Map<String, Value> {
        &self.appium_options
    }

    /// Mutable live view of the accumulated options.
    ///
    /// This is shared-mutation access, not a snapshot: writes through the
    /// returned map change what later calls to [`Self::to_capabilities`]
    /// produce, and they bypass name validation.
    pub fn options_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.appium_options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::ComplianceRegistry;
    use crate::options::driver::PLATFORM_NAME;
    use serde_json::json;

    fn isolated() -> AppiumOptions {
        AppiumOptions::with_base(DriverOptions::with_registry(ComplianceRegistry::new()))
    }

    #[test]
    fn test_add_and_read_back() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut options = isolated();
        options.add_additional_appium_option("appium:noReset", true).unwrap();
        assert_eq!(options.options().get("appium:noReset"), Some(&json!(true)));
    }

    #[test]
    fn test_last_write_wins() {
        let mut options = isolated();
        options.add_additional_appium_option("custom:x", 1).unwrap();
        options.add_additional_appium_option("custom:x", 2).unwrap();
        assert_eq!(options.options().get("custom:x"), Some(&json!(2)));
        assert_eq!(options.options().len(), 1);
    }

    #[test]
    fn test_empty_name_fails() {
        let mut options = isolated();
        assert_eq!(
            options.add_additional_appium_option("", "value"),
            Err(CapabilityError::EmptyName)
        );
        assert!(options.options().is_empty());
    }

    #[test]
    fn test_reserved_name_fails() {
        let mut options = isolated();
        assert!(matches!(
            options.add_additional_appium_option(PLATFORM_NAME, "iOS"),
            Err(CapabilityError::ReservedName { .. })
        ));
        assert!(options.options().is_empty());
    }

    #[test]
    fn test_finalize_merges_local_over_generated() {
        let mut options = isolated();
        options.base_mut().platform_name = Some("iOS".to_string());
        options
            .base_mut()
            .add_additional_option("sharedKey", "from base")
            .unwrap();
        options.add_additional_appium_option("custom:x", 1).unwrap();
        options.add_additional_appium_option("sharedKey", "from appium").unwrap();

        let caps = options.to_capabilities();
        assert_eq!(caps.get(PLATFORM_NAME), Some(&json!("iOS")));
        assert_eq!(caps.get("custom:x"), Some(&json!(1)));
        // The accumulated value wins over what generation produced.
        assert_eq!(caps.get("sharedKey"), Some(&json!("from appium")));
    }

    #[test]
    fn test_finalize_is_repeatable() {
        let mut options = isolated();
        options.add_additional_appium_option("custom:x", 1).unwrap();
        options.add_additional_appium_option("fullReset", true).unwrap();

        let first = options.to_capabilities();
        let second = options.to_capabilities();
        assert_eq!(first.to_json(), second.to_json());
        assert_eq!(options.options().len(), 2);
    }

    #[test]
    fn test_finalize_registers_non_namespaced_names() {
        let registry = ComplianceRegistry::new();
        let mut options =
            AppiumOptions::with_base(DriverOptions::with_registry(registry.clone()));
        options.add_additional_appium_option("fullReset", true).unwrap();
        options.add_additional_appium_option("custom:flag", 1).unwrap();

        assert!(!registry.snapshot().contains(&"fullReset".to_string()));
        options.to_capabilities();
        assert!(registry.snapshot().contains(&"fullReset".to_string()));
        // Namespaced names need no registration and are not added.
        assert!(!registry.snapshot().contains(&"custom:flag".to_string()));
    }

    #[test]
    fn test_registration_leaks_to_other_instances_sharing_the_registry() {
        let registry = ComplianceRegistry::new();
        let mut first =
            AppiumOptions::with_base(DriverOptions::with_registry(registry.clone()));
        first.add_additional_appium_option("leakyFlag", true).unwrap();
        first.to_capabilities();

        // An unrelated options object on the same registry now generates
        // strict payloads that keep the name.
        let mut unrelated = DriverOptions::with_registry(registry);
        unrelated.add_additional_option("leakyFlag", false).unwrap();
        assert!(unrelated.generate_capabilities(true).contains("leakyFlag"));
    }

    #[test]
    fn test_registration_leaks_through_process_wide_registry() {
        let mut first = AppiumOptions::new();
        first
            .add_additional_appium_option("processWideFlag", true)
            .unwrap();
        first.to_capabilities();

        // A default-constructed, unrelated options object in the same process
        // sees the registration.
        let mut unrelated = DriverOptions::new();
        unrelated.add_additional_option("processWideFlag", 1).unwrap();
        assert!(unrelated
            .generate_capabilities(true)
            .contains("processWideFlag"));
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_alias_routes_by_scope() {
        let mut options = isolated();
        options.add_additional_capability("custom:local", 1).unwrap();
        options
            .add_additional_capability_scoped("globalFlag", 2, true)
            .unwrap();
        options
            .add_additional_capability_scoped("localFlag", 3, false)
            .unwrap();

        assert_eq!(options.options().get("custom:local"), Some(&json!(1)));
        assert_eq!(options.options().get("localFlag"), Some(&json!(3)));
        assert!(!options.options().contains_key("globalFlag"));
        assert_eq!(
            options.base().additional_options().get("globalFlag"),
            Some(&json!(2))
        );

        // Both tiers end up in the finalized payload.
        let caps = options.to_capabilities();
        assert!(caps.contains("globalFlag"));
        assert!(caps.contains("localFlag"));
    }

    #[test]
    fn test_options_mut_is_shared_mutation() {
        let mut options = isolated();
        options.add_additional_appium_option("custom:x", 1).unwrap();
        options.options_mut().insert("custom:y".to_string(), json!(2));

        assert_eq!(options.options().get("custom:y"), Some(&json!(2)));
        assert!(options.to_capabilities().contains("custom:y"));
    }
}
