//! Field dictionaries for vendor inventory objects.
//!
//! A dictionary is a static table of `(output key, source)` pairs. The source
//! is either a dotted attribute path into the vendor object or a nested table
//! that produces a nested mapping in the output. Dictionaries are evaluated by
//! [`ComponentParser`](crate::component::ComponentParser).

/// Where the value of a dictionary entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMapping {
    /// Dotted attribute path, e.g. `"uuid"` or `"attributes.slot[0]"`
    Path(&'static str),
    /// Nested table producing a nested mapping
    Nested(&'static [FieldEntry]),
}

/// One `(output key, source)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEntry {
    pub key: &'static str,
    pub mapping: FieldMapping,
}

impl FieldEntry {
    pub const fn path(key: &'static str, path: &'static str) -> Self {
        Self {
            key,
            mapping: FieldMapping::Path(path),
        }
    }

    pub const fn nested(key: &'static str, entries: &'static [FieldEntry]) -> Self {
        Self {
            key,
            mapping: FieldMapping::Nested(entries),
        }
    }
}

/// A named field dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDictionary {
    /// Name used in log output
    pub name: &'static str,
    pub entries: &'static [FieldEntry],
}

impl FieldDictionary {
    /// Look up the entry for an output key.
    pub fn entry(&self, key: &str) -> Option<&FieldEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Output keys in table order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.key)
    }
}

/// Classification constants attached to normalized records.
pub mod types {
    /// Record type for physical switches
    pub const PHYSICAL_SWITCH: &str =
        "ManageIQ::Providers::Lenovo::PhysicalInfraManager::PhysicalSwitch";
    /// Device type for switch ports
    pub const PHYSICAL_PORT: &str = "physical_port";
}

const SWITCH_ASSET_DETAIL: &[FieldEntry] = &[
    FieldEntry::path("product_name", "productName"),
    FieldEntry::path("serial_number", "serialNumber"),
    FieldEntry::path("part_number", "partNumber"),
    FieldEntry::path("field_replaceable_unit", "FRU"),
    FieldEntry::path("description", "description"),
    FieldEntry::path("manufacturer", "manufacturer"),
    FieldEntry::path("machine_type", "machineType"),
    FieldEntry::path("model", "model"),
];

/// Top-level physical switch attributes.
pub const PHYSICAL_SWITCH: FieldDictionary = FieldDictionary {
    name: "physical_switch",
    entries: &[
        FieldEntry::path("uid_ems", "uuid"),
        FieldEntry::path("switch_uuid", "uuid"),
        FieldEntry::path("name", "name"),
        FieldEntry::path("health_state", "overallHealthState"),
        FieldEntry::path("power_state", "powerState"),
        FieldEntry::path("product_name", "productName"),
        FieldEntry::path("part_number", "partNumber"),
        FieldEntry::path("serial_number", "serialNumber"),
        FieldEntry::path("description", "description"),
        FieldEntry::path("manufacturer", "manufacturer"),
        FieldEntry::nested("asset_detail", SWITCH_ASSET_DETAIL),
    ],
};

/// Attributes of a single switch IP assignment.
pub const PHYSICAL_SWITCH_NETWORK: FieldDictionary = FieldDictionary {
    name: "physical_switch_network",
    entries: &[
        FieldEntry::path("subnet_mask", "subnet"),
        FieldEntry::path("default_gateway", "gateway"),
    ],
};
