//! Compliance-name registry — which capability names survive W3C filtering.
//!
//! The original client reached into a library-owned static list
//! (`KnownSpecCompliantCapabilityNames`) via reflection to mark custom names
//! as specification compliant. Here the list is an explicit service: every
//! options object holds a registry handle, and the process-wide default
//! instance preserves the legacy behavior where a registration made by one
//! options object is visible to every other one in the same process.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

/// Capability names defined by the WebDriver specification. Every registry
/// starts out knowing these.
const SPEC_COMPLIANT_NAMES: &[&str] = &[
    "browserName",
    "browserVersion",
    "platformName",
    "acceptInsecureCerts",
    "pageLoadStrategy",
    "proxy",
    "setWindowRect",
    "timeouts",
    "unhandledPromptBehavior",
    "strictFileInteractability",
    "webSocketUrl",
];

static GLOBAL: OnceLock<ComplianceRegistry> = OnceLock::new();

/// Shared registry of capability names treated as specification compliant.
///
/// Cloning the registry clones the handle, not the contents: all clones see
/// the same underlying name set. Registration is cumulative — there is no
/// removal API, matching the one-way semantics of the original static list.
#[derive(Debug, Clone)]
pub struct ComplianceRegistry {
    names: Arc<RwLock<HashSet<String>>>,
}

impl ComplianceRegistry {
    /// Create an isolated registry seeded with the W3C-standard names.
    pub fn new() -> Self {
        Self {
            names: Arc::new(RwLock::new(
                SPEC_COMPLIANT_NAMES.iter().map(|s| s.to_string()).collect(),
            )),
        }
    }

    /// The process-wide registry used by options objects that did not inject
    /// their own.
    ///
    /// Caveat: this is shared mutable process state. Names registered here
    /// (for instance by `AppiumOptions::to_capabilities`) stay registered for
    /// the lifetime of the process and affect every subsequently generated
    /// capabilities object, not just the one being finalized. Concurrent
    /// registrations from several options objects are mutually visible; use
    /// per-instance registries where isolation matters.
    pub fn global() -> ComplianceRegistry {
        GLOBAL.get_or_init(Self::new).clone()
    }

    /// Register capability names as specification compliant.
    ///
    /// Duplicates are ignored. There is no way to unregister a name.
    pub fn register<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut known = self.names.write();
        let before = known.len();
        for name in names {
            known.insert(name.into());
        }
        let added = known.len() - before;
        if added > 0 {
            log::debug!("registered {} capability name(s) as spec compliant", added);
        }
    }

    /// Whether a capability name would survive spec-compliance filtering.
    ///
    /// Vendor-namespaced names (containing `:`) are always compliant and need
    /// no registration.
    pub fn is_known(&self, name: &str) -> bool {
        name.contains(':') || self.names.read().contains(name)
    }

    /// Sorted copy of the registered names, for inspection.
    pub fn snapshot(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.read().iter().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ComplianceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
