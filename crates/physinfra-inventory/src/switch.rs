//! Physical switch translation.
//!
//! [`SwitchRecordBuilder`] turns one [`RawSwitch`] into its stable identifier
//! and a normalized [`SwitchRecord`]:
//!
//! 1. Generic extraction against [`PHYSICAL_SWITCH`]
//! 2. Power-state normalization and health-state lookup
//! 3. Hardware collections (firmware, ports, IP networks)
//! 4. Asset detail cleanup (`part_number`, `field_replaceable_unit`)
//!
//! The builder holds no mutable state; a shared reference can translate any
//! number of switches.

use crate::component::ComponentParser;
use crate::dictionary::{types, PHYSICAL_SWITCH, PHYSICAL_SWITCH_NETWORK};
use crate::error::{InventoryError, Result};
use crate::firmware::{FirmwareParser, SwitchFirmwareParser};
use crate::health::HealthStateMap;
use crate::raw::{non_blank, present, IpAssignment, IpFamily, RawPort, RawSwitch};
use crate::record::{
    AssetDetail, FirmwareRecord, Hardware, NetworkAddress, NetworkRecord, PortRecord, SwitchRecord,
};
use serde_json::Value;
use tracing::{debug, trace};

/// Keys the builder sets itself; dictionary values for them are not passed
/// through to [`SwitchRecord::fields`].
const DERIVED_KEYS: &[&str] = &["type", "health_state", "power_state", "hardware", "asset_detail"];

/// Translates raw switches into normalized records.
#[derive(Debug, Clone)]
pub struct SwitchRecordBuilder<P = SwitchFirmwareParser> {
    parser: ComponentParser,
    health_states: HealthStateMap,
    firmware_parser: P,
}

impl SwitchRecordBuilder {
    /// Create a builder with the default health table and firmware parser.
    pub fn new() -> Self {
        Self {
            parser: ComponentParser::new(),
            health_states: HealthStateMap::default(),
            firmware_parser: SwitchFirmwareParser,
        }
    }
}

impl Default for SwitchRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: FirmwareParser> SwitchRecordBuilder<P> {
    /// Replace the health-state table.
    pub fn with_health_map(mut self, health_states: HealthStateMap) -> Self {
        self.health_states = health_states;
        self
    }

    /// Replace the firmware parser.
    pub fn with_firmware_parser<Q: FirmwareParser>(self, firmware_parser: Q) -> SwitchRecordBuilder<Q> {
        SwitchRecordBuilder {
            parser: self.parser,
            health_states: self.health_states,
            firmware_parser,
        }
    }

    pub fn health_states(&self) -> &HealthStateMap {
        &self.health_states
    }

    /// Translate one switch.
    ///
    /// # Errors
    /// [`InventoryError::MissingField`] when the switch has no `uuid`.
    pub fn build(&self, switch: &RawSwitch) -> Result<(String, SwitchRecord)> {
        let uuid = match switch.uuid.as_deref() {
            Some(uuid) if !uuid.trim().is_empty() => uuid.to_string(),
            _ => return Err(InventoryError::MissingField("uuid")),
        };

        let mut fields = self.parser.parse(switch, &PHYSICAL_SWITCH);

        let power_state = fields
            .get("power_state")
            .and_then(Value::as_str)
            .map(normalize_power_state);

        let mut asset_detail = AssetDetail {
            part_number: present(switch.part_number.as_deref()),
            field_replaceable_unit: present(switch.fru.as_deref()),
            fields: match fields.remove("asset_detail") {
                Some(Value::Object(map)) => map,
                _ => Default::default(),
            },
        };
        asset_detail.fields.remove("part_number");
        asset_detail.fields.remove("field_replaceable_unit");

        for key in DERIVED_KEYS {
            fields.remove(*key);
        }

        let hardware = Hardware {
            firmwares: self.build_firmware_list(switch),
            guest_devices: self.build_port_list(switch),
            networks: self.build_network_list(switch),
        };

        debug!(
            uuid = %uuid,
            ports = hardware.guest_devices.as_ref().map_or(0, Vec::len),
            firmwares = hardware.firmwares.as_ref().map_or(0, Vec::len),
            networks = hardware.networks.len(),
            "Translated physical switch"
        );

        let record = SwitchRecord {
            kind: types::PHYSICAL_SWITCH.to_string(),
            health_state: self
                .health_states
                .lookup(switch.overall_health_state.as_deref()),
            power_state,
            hardware,
            asset_detail,
            fields,
        };

        Ok((uuid, record))
    }

    /// Translate a batch of switches, one result per switch in input order.
    pub fn build_all<'a, I>(&self, switches: I) -> Vec<Result<(String, SwitchRecord)>>
    where
        I: IntoIterator<Item = &'a RawSwitch>,
    {
        switches.into_iter().map(|s| self.build(s)).collect()
    }

    /// Ports as guest devices. `None` when the switch has no port list.
    pub fn build_port_list(&self, switch: &RawSwitch) -> Option<Vec<PortRecord>> {
        switch
            .ports
            .as_ref()
            .map(|ports| ports.iter().map(parse_port).collect())
    }

    /// Firmware through the configured parser. `None` when the switch has no
    /// firmware list.
    pub fn build_firmware_list(&self, switch: &RawSwitch) -> Option<Vec<FirmwareRecord>> {
        switch.firmware.as_ref().map(|firmware| {
            firmware
                .iter()
                .map(|f| self.firmware_parser.parse_firmware(f))
                .collect()
        })
    }

    /// IPv4 assignments followed by IPv6 assignments, each filtered against
    /// the switch's address list for that family.
    pub fn build_network_list(&self, switch: &RawSwitch) -> Vec<NetworkRecord> {
        let mut networks = self.parse_assignments(switch, IpFamily::V4);
        networks.extend(self.parse_assignments(switch, IpFamily::V6));
        networks
    }

    fn parse_assignments(&self, switch: &RawSwitch, family: IpFamily) -> Vec<NetworkRecord> {
        let Some(interfaces) = switch.ip_interfaces.as_deref() else {
            return Vec::new();
        };
        let allowed = switch.addresses(family).unwrap_or_default();

        interfaces
            .iter()
            .flat_map(|interface| interface.assignments(family))
            .filter_map(|assignment| {
                let address = assignment.address.as_deref()?;
                if allowed.iter().any(|a| a == address) {
                    Some(self.parse_network(assignment, address, family))
                } else {
                    trace!(
                        "Skipping {} entry {} not in address list",
                        family.assignment_key(),
                        address
                    );
                    None
                }
            })
            .collect()
    }

    fn parse_network(&self, assignment: &IpAssignment, address: &str, family: IpFamily) -> NetworkRecord {
        let address = match family {
            IpFamily::V4 => NetworkAddress::Ipv4(address.to_string()),
            IpFamily::V6 => NetworkAddress::Ipv6(address.to_string()),
        };
        NetworkRecord {
            address,
            fields: self.parser.parse(assignment, &PHYSICAL_SWITCH_NETWORK),
        }
    }
}

fn parse_port(port: &RawPort) -> PortRecord {
    let vlan_key = non_blank(port.pvid.as_deref());
    PortRecord {
        device_name: non_blank(port.port_name.as_deref()).or_else(|| port.port.clone()),
        device_type: types::PHYSICAL_PORT.to_string(),
        peer_mac_address: non_blank(port.peer_mac_address.as_deref()),
        vlan_enabled: vlan_key.is_some(),
        vlan_key,
    }
}

/// `"On"`/`"OFF"` become `"on"`/`"off"`; anything else is kept as reported.
fn normalize_power_state(state: &str) -> String {
    let lower = state.to_lowercase();
    if lower == "on" || lower == "off" {
        lower
    } else {
        state.to_string()
    }
}
