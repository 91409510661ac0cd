//! Normalized inventory records.

use crate::health::HealthState;
use serde::Serialize;
use serde_json::{Map, Value};

/// A translated physical switch.
///
/// Serializes as a flat mapping: the typed fields below plus every other key
/// produced by the switch field dictionary (`uid_ems`, `name`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub health_state: Option<HealthState>,
    pub power_state: Option<String>,
    pub hardware: Hardware,
    pub asset_detail: AssetDetail,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SwitchRecord {
    /// A dictionary-extracted field that is not `null`.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }
}

/// Hardware collections attached to a switch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hardware {
    /// `None` when the switch reported no firmware list
    pub firmwares: Option<Vec<FirmwareRecord>>,
    /// `None` when the switch reported no port list
    pub guest_devices: Option<Vec<PortRecord>>,
    pub networks: Vec<NetworkRecord>,
}

/// Asset information. `part_number` and `field_replaceable_unit` are always
/// serialized, as `null` when blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetDetail {
    pub part_number: Option<String>,
    pub field_replaceable_unit: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A switch port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortRecord {
    pub device_name: Option<String>,
    pub device_type: String,
    pub peer_mac_address: Option<String>,
    pub vlan_key: Option<String>,
    pub vlan_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FirmwareRecord {
    pub name: Option<String>,
    pub build: Option<String>,
    pub version: Option<String>,
    pub release_date: Option<String>,
}

/// The address of a network assignment, serialized as either an
/// `ipaddress` or an `ipv6address` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NetworkAddress {
    #[serde(rename = "ipaddress")]
    Ipv4(String),
    #[serde(rename = "ipv6address")]
    Ipv6(String),
}

impl NetworkAddress {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ipv4(a) | Self::Ipv6(a) => a,
        }
    }
}

/// An IP assignment of a switch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkRecord {
    #[serde(flatten)]
    pub address: NetworkAddress,
    /// `subnet_mask`, `default_gateway`
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NetworkRecord {
    pub fn ipaddress(&self) -> Option<&str> {
        match &self.address {
            NetworkAddress::Ipv4(a) => Some(a),
            NetworkAddress::Ipv6(_) => None,
        }
    }

    pub fn ipv6address(&self) -> Option<&str> {
        match &self.address {
            NetworkAddress::Ipv6(a) => Some(a),
            NetworkAddress::Ipv4(_) => None,
        }
    }
}
