//! # Capabilities payload
//!
//! The in-memory capabilities object produced by
//! [`DriverOptions::generate_capabilities`](crate::options::DriverOptions::generate_capabilities)
//! and returned from [`AppiumOptions::to_capabilities`](crate::options::AppiumOptions::to_capabilities).
//! A downstream serializer turns it into the new-session request body; this
//! crate only shapes the mapping.
//!
//! Depending on the generation mode, the entries live in one of two places:
//! the flat map of the legacy (JSON Wire) payload, or the `alwaysMatch` block
//! of the W3C payload. The original client located whichever was present by
//! reflecting on a private `capabilities` field of the generated object and,
//! failing that, of its base type. The [`CapabilitiesMapSource`] trait is the
//! explicit seam that replaces that probe.

pub mod registry;

pub use registry::ComplianceRegistry;

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Gives finalization mutable access to the capability map inside a generated
/// object, wherever that map lives.
pub trait CapabilitiesMapSource {
    /// Mutable view of the underlying capability map, or `None` when the
    /// object holds no map at all. Merging treats `None` as "nothing to merge"
    /// and leaves the object untouched.
    fn capabilities_map_mut(&mut self) -> Option<&mut Map<String, Value>>;
}

/// A generated capabilities payload.
///
/// At most one of the two internal locations is populated. The default value
/// holds neither, which downstream merge code treats as a no-op target.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    /// Flat map used by legacy (JSON Wire) payloads.
    map: Option<Map<String, Value>>,
    /// W3C `alwaysMatch` block.
    always_match: Option<Map<String, Value>>,
}

impl Capabilities {
    /// A legacy-mode payload wrapping a flat capability map.
    pub(crate) fn legacy(map: Map<String, Value>) -> Self {
        Self {
            map: Some(map),
            always_match: None,
        }
    }

    /// A W3C-mode payload holding the `alwaysMatch` block.
    pub(crate) fn w3c(always_match: Map<String, Value>) -> Self {
        Self {
            map: None,
            always_match: Some(always_match),
        }
    }

    /// Whether this payload was generated in W3C mode.
    pub fn is_w3c(&self) -> bool {
        self.always_match.is_some()
    }

    /// Look up a capability value by name, wherever the map lives.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries()?.get(name)
    }

    /// Whether a capability with the given name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of capability entries.
    pub fn len(&self) -> usize {
        self.entries().map_or(0, Map::len)
    }

    /// Whether the payload holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only view of the populated map, if any.
    pub fn entries(&self) -> Option<&Map<String, Value>> {
        self.map.as_ref().or(self.always_match.as_ref())
    }

    /// Render the payload as JSON in the shape of its generation mode.
    pub fn to_json(&self) -> Value {
        if let Some(always_match) = &self.always_match {
            json!({
                "alwaysMatch": Value::Object(always_match.clone()),
                "firstMatch": [{}],
            })
        } else if let Some(map) = &self.map {
            Value::Object(map.clone())
        } else {
            json!({})
        }
    }
}

impl CapabilitiesMapSource for Capabilities {
    fn capabilities_map_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.map.as_mut().or(self.always_match.as_mut())
    }
}

impl Serialize for Capabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
