//! Raw vendor inventory types.
//!
//! These mirror the JSON shape of the hardware management API (camelCase keys,
//! a few upper-case ones such as `FRU` and `PVID`). Every field is optional:
//! the API omits or nulls attributes freely, and the translation layer is
//! expected to tolerate that. Attributes without a dedicated field are kept in
//! `attributes` so field dictionaries can still reach them.

use crate::component::AttributeSource;
use crate::error::{InventoryError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Accept strings, numbers and booleans as text; the API is not consistent
/// about quoting identifiers such as `PVID`.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a string, found {}",
                other
            )))
        }
    })
}

/// Trimmed value, `None` when blank.
pub(crate) fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Value as reported, `None` when blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn text(value: Option<&str>) -> Option<Value> {
    value.map(|s| Value::String(s.to_string()))
}

/// A physical switch as reported by the management API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSwitch {
    pub uuid: Option<String>,
    pub overall_health_state: Option<String>,
    pub power_state: Option<String>,
    pub part_number: Option<String>,
    #[serde(rename = "FRU")]
    pub fru: Option<String>,
    pub ports: Option<Vec<RawPort>>,
    pub firmware: Option<Vec<RawFirmware>>,
    pub ip_interfaces: Option<Vec<IpInterface>>,
    pub ipv4_addresses: Option<Vec<String>>,
    pub ipv6_addresses: Option<Vec<String>>,
    /// Remaining vendor attributes (`name`, `serialNumber`, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RawSwitch {
    /// Deserialize a single switch from vendor JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Address filter list for an IP family.
    pub fn addresses(&self, family: IpFamily) -> Option<&[String]> {
        match family {
            IpFamily::V4 => self.ipv4_addresses.as_deref(),
            IpFamily::V6 => self.ipv6_addresses.as_deref(),
        }
    }
}

impl AttributeSource for RawSwitch {
    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "uuid" => text(self.uuid.as_deref()),
            "overallHealthState" => text(self.overall_health_state.as_deref()),
            "powerState" => text(self.power_state.as_deref()),
            "partNumber" => text(self.part_number.as_deref()),
            "FRU" => text(self.fru.as_deref()),
            _ => self.attributes.get(name).cloned(),
        }
    }
}

/// A switch port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPort {
    #[serde(default, deserialize_with = "lenient_string")]
    pub port: Option<String>,
    pub port_name: Option<String>,
    pub peer_mac_address: Option<String>,
    #[serde(rename = "PVID", default, deserialize_with = "lenient_string")]
    pub pvid: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A firmware image installed on a switch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFirmware {
    pub name: Option<String>,
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub build: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A switch network interface and its address assignments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpInterface {
    #[serde(rename = "IPv4assignments")]
    pub ipv4_assignments: Option<Vec<IpAssignment>>,
    #[serde(rename = "IPv6assignments")]
    pub ipv6_assignments: Option<Vec<IpAssignment>>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl IpInterface {
    pub fn assignments(&self, family: IpFamily) -> &[IpAssignment] {
        let list = match family {
            IpFamily::V4 => &self.ipv4_assignments,
            IpFamily::V6 => &self.ipv6_assignments,
        };
        list.as_deref().unwrap_or_default()
    }
}

/// One IP address bound to an interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpAssignment {
    pub address: Option<String>,
    /// `subnet`, `gateway`, `prefix`, `type`, ...
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl AttributeSource for IpAssignment {
    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "address" => text(self.address.as_deref()),
            _ => self.attributes.get(name).cloned(),
        }
    }
}

/// IP address family of an assignment group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    V4,
    V6,
}

impl IpFamily {
    /// Vendor key of the assignment list for this family.
    pub fn assignment_key(&self) -> &'static str {
        match self {
            Self::V4 => "IPv4assignments",
            Self::V6 => "IPv6assignments",
        }
    }
}

/// Extract switch descriptors from an API response document.
///
/// Accepts a single switch object, an array of switches, or an envelope
/// object carrying the switches under `results` or `switchList`.
///
/// Each switch is deserialized on its own, so one malformed element yields an
/// `Err` in its slot without discarding its siblings.
///
/// # Errors
/// [`InventoryError::InvalidDocument`] when the document is neither an object
/// nor an array.
pub fn switches_from_document(document: Value) -> Result<Vec<Result<RawSwitch>>> {
    match document {
        Value::Array(items) => Ok(items.into_iter().map(parse_switch).collect()),
        Value::Object(mut map) => {
            for envelope in ["results", "switchList"] {
                if matches!(map.get(envelope), Some(Value::Array(_))) {
                    if let Some(inner) = map.remove(envelope) {
                        return switches_from_document(inner);
                    }
                }
            }
            Ok(vec![parse_switch(Value::Object(map))])
        }
        other => Err(InventoryError::InvalidDocument(format!(
            "expected an object or array, found {}",
            json_kind(&other)
        ))),
    }
}

fn parse_switch(item: Value) -> Result<RawSwitch> {
    serde_json::from_value(item).map_err(InventoryError::from)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
