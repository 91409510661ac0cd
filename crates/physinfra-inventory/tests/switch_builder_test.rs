//! Tests for SwitchRecordBuilder against vendor-shaped switch documents

use physinfra_inventory::dictionary::types;
use physinfra_inventory::{
    FirmwareRecord, HealthState, HealthStateMap, InventoryError, RawFirmware, RawSwitch,
    SwitchRecordBuilder,
};
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("physinfra_inventory=trace")
        .try_init();
}

fn switch(value: Value) -> RawSwitch {
    serde_json::from_value(value).unwrap()
}

fn full_switch() -> RawSwitch {
    switch(json!({
        "uuid": "00000000000010008000542AA2D3CB00",
        "name": "ThinkSystem NE1032 RackSwitch",
        "type": "Switch",
        "overallHealthState": "Normal",
        "powerState": "On",
        "productName": "ThinkSystem NE1032 RackSwitch",
        "serialNumber": "Y010CM345084",
        "manufacturer": "LNVO",
        "machineType": "7159",
        "model": "HD3",
        "description": "Lenovo ThinkSystem NE1032 RackSwitch",
        "partNumber": "  00MM860  ",
        "FRU": "00MM861",
        "ipv4Addresses": ["10.243.4.79", "10.241.5.1"],
        "ipv6Addresses": ["fe80::562a:a2ff:fed3:cb00"],
        "ipInterfaces": [
            {
                "name": "mgmt0",
                "IPv4assignments": [
                    {"address": "10.243.4.79", "subnet": "255.255.240.0", "gateway": "10.243.0.1", "type": "INUSE"},
                    {"address": "10.243.4.80", "subnet": "255.255.240.0", "gateway": "10.243.0.1"}
                ],
                "IPv6assignments": [
                    {"address": "fe80::562a:a2ff:fed3:cb00", "subnet": "", "gateway": "0:0:0:0:0:0:0:0", "prefix": 64}
                ]
            },
            {
                "name": "vlan1",
                "IPv4assignments": [
                    {"address": "10.241.5.1", "subnet": "255.255.255.0"}
                ]
            }
        ],
        "ports": [
            {"port": "Eth1/1", "portName": "", "peerMacAddress": "", "PVID": ""},
            {"port": "Eth1/2", "portName": "uplink", "peerMacAddress": "A4:8C:DB:B6:8E:00", "PVID": "1"}
        ],
        "firmware": [
            {"name": "Boot", "role": "Active", "status": "Running", "version": "10.6.1.0", "build": "N/A", "date": "2018-01-23"},
            {"name": "OS", "role": "Active", "status": "Running", "version": "10.6.1.0", "build": "N/A", "date": "2018-01-23"}
        ]
    }))
}

#[test]
fn test_full_switch_translation() {
    init_tracing();
    let builder = SwitchRecordBuilder::new();
    let (uuid, record) = builder.build(&full_switch()).unwrap();

    assert_eq!(uuid, "00000000000010008000542AA2D3CB00");
    assert_eq!(record.kind, types::PHYSICAL_SWITCH);
    assert_eq!(record.health_state, Some(HealthState::Valid));
    assert_eq!(record.power_state.as_deref(), Some("on"));

    assert_eq!(record.field("uid_ems"), Some(&json!(uuid)));
    assert_eq!(record.field("switch_uuid"), Some(&json!(uuid)));
    assert_eq!(record.field("name"), Some(&json!("ThinkSystem NE1032 RackSwitch")));
    assert_eq!(record.field("serial_number"), Some(&json!("Y010CM345084")));

    assert_eq!(record.asset_detail.part_number.as_deref(), Some("00MM860"));
    assert_eq!(record.asset_detail.field_replaceable_unit.as_deref(), Some("00MM861"));
    assert_eq!(record.asset_detail.fields.get("machine_type"), Some(&json!("7159")));
    assert_eq!(record.asset_detail.fields.get("model"), Some(&json!("HD3")));

    let ports = record.hardware.guest_devices.as_ref().unwrap();
    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0].device_name.as_deref(), Some("Eth1/1"));
    assert!(!ports[0].vlan_enabled);
    assert_eq!(ports[1].device_name.as_deref(), Some("uplink"));
    assert_eq!(ports[1].vlan_key.as_deref(), Some("1"));

    let firmwares = record.hardware.firmwares.as_ref().unwrap();
    assert_eq!(firmwares.len(), 2);
    assert_eq!(firmwares[0].name.as_deref(), Some("Active Boot-Running"));
    assert_eq!(firmwares[1].release_date.as_deref(), Some("2018-01-23"));

    let networks = &record.hardware.networks;
    assert_eq!(networks.len(), 3);
    assert_eq!(networks[0].ipaddress(), Some("10.243.4.79"));
    assert_eq!(networks[0].fields.get("subnet_mask"), Some(&json!("255.255.240.0")));
    assert_eq!(networks[0].fields.get("default_gateway"), Some(&json!("10.243.0.1")));
    assert_eq!(networks[1].ipaddress(), Some("10.241.5.1"));
    assert_eq!(networks[1].fields.get("default_gateway"), Some(&Value::Null));
    assert_eq!(networks[2].ipv6address(), Some("fe80::562a:a2ff:fed3:cb00"));
    assert_eq!(networks[2].ipaddress(), None);
}

#[test]
fn test_serialized_record_shape() {
    let builder = SwitchRecordBuilder::new();
    let (_, record) = builder.build(&full_switch()).unwrap();
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["type"], json!(types::PHYSICAL_SWITCH));
    assert_eq!(value["health_state"], json!("Valid"));
    assert_eq!(value["power_state"], json!("on"));
    assert_eq!(value["asset_detail"]["part_number"], json!("00MM860"));
    assert_eq!(value["asset_detail"]["field_replaceable_unit"], json!("00MM861"));
    assert_eq!(value["hardware"]["guest_devices"][0]["device_type"], json!("physical_port"));
    assert_eq!(value["hardware"]["guest_devices"][0]["vlan_key"], Value::Null);
    assert_eq!(value["hardware"]["networks"][0]["ipaddress"], json!("10.243.4.79"));
    assert!(value["hardware"]["networks"][0].get("ipv6address").is_none());
    assert_eq!(value["hardware"]["networks"][2]["ipv6address"], json!("fe80::562a:a2ff:fed3:cb00"));
    assert!(value["hardware"]["networks"][2].get("ipaddress").is_none());
}

#[test]
fn test_type_is_constant() {
    let builder = SwitchRecordBuilder::new();
    for input in [
        json!({"uuid": "A"}),
        json!({"uuid": "B", "type": "Switch"}),
        json!({"uuid": "C", "powerState": "Off", "overallHealthState": "Critical"}),
    ] {
        let (_, record) = builder.build(&switch(input)).unwrap();
        assert_eq!(record.kind, types::PHYSICAL_SWITCH);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], json!(types::PHYSICAL_SWITCH));
    }
}

#[test]
fn test_power_state_normalization() {
    let builder = SwitchRecordBuilder::new();
    let cases = [
        (json!("ON"), Some("on")),
        (json!("On"), Some("on")),
        (json!("off"), Some("off")),
        (json!("OFF"), Some("off")),
        (json!("Unknown"), Some("Unknown")),
        (Value::Null, None),
    ];

    for (input, expected) in cases {
        let (_, record) = builder
            .build(&switch(json!({"uuid": "U", "powerState": input.clone()})))
            .unwrap();
        assert_eq!(record.power_state.as_deref(), expected, "input {:?}", input);
    }
}

#[test]
fn test_health_state_lookup() {
    let builder = SwitchRecordBuilder::new();

    let (_, record) = builder.build(&switch(json!({"uuid": "U"}))).unwrap();
    assert_eq!(record.health_state, Some(HealthState::Unknown));

    let (_, record) = builder
        .build(&switch(json!({"uuid": "U", "overallHealthState": "WARNING"})))
        .unwrap();
    assert_eq!(record.health_state, Some(HealthState::Warning));

    let (_, upper) = builder
        .build(&switch(json!({"uuid": "U", "overallHealthState": "OK"})))
        .unwrap();
    let (_, lower) = builder
        .build(&switch(json!({"uuid": "U", "overallHealthState": "ok"})))
        .unwrap();
    assert_eq!(upper.health_state, lower.health_state);
    assert_eq!(upper.health_state, None);
}

#[test]
fn test_custom_health_map() {
    let health = HealthStateMap::new(None).with_entry("OK", HealthState::Valid);
    let builder = SwitchRecordBuilder::new().with_health_map(health);

    let (_, record) = builder
        .build(&switch(json!({"uuid": "U", "overallHealthState": "Ok"})))
        .unwrap();
    assert_eq!(record.health_state, Some(HealthState::Valid));

    let (_, record) = builder.build(&switch(json!({"uuid": "U"}))).unwrap();
    assert_eq!(record.health_state, None);
}

#[test]
fn test_network_filtering() {
    let builder = SwitchRecordBuilder::new();
    let input = switch(json!({
        "uuid": "U",
        "ipv4Addresses": ["10.0.0.1"],
        "ipInterfaces": [{
            "IPv4assignments": [{"address": "10.0.0.1"}, {"address": "10.0.0.2"}]
        }]
    }));

    let (_, record) = builder.build(&input).unwrap();
    let networks = &record.hardware.networks;
    assert_eq!(networks.len(), 1);
    assert_eq!(networks[0].ipaddress(), Some("10.0.0.1"));
}

#[test]
fn test_network_ipv6_filtering() {
    let builder = SwitchRecordBuilder::new();
    let input = switch(json!({
        "uuid": "U",
        "ipv6Addresses": ["fe80::1"],
        "ipInterfaces": [{
            "IPv6assignments": [
                {"address": "fe80::1", "prefix": 64},
                {"address": "fe80::2", "prefix": 64}
            ]
        }]
    }));

    let (_, record) = builder.build(&input).unwrap();
    let networks = &record.hardware.networks;
    assert_eq!(networks.len(), 1);
    assert_eq!(networks[0].ipv6address(), Some("fe80::1"));
    assert_eq!(networks[0].ipaddress(), None);

    let value = serde_json::to_value(&networks[0]).unwrap();
    assert_eq!(value["ipv6address"], "fe80::1");
    assert!(value.get("ipaddress").is_none());
}

#[test]
fn test_network_ipv4_precedes_ipv6() {
    let builder = SwitchRecordBuilder::new();
    let input = switch(json!({
        "uuid": "U",
        "ipv4Addresses": ["10.0.0.1", "10.0.0.3"],
        "ipv6Addresses": ["fe80::1"],
        "ipInterfaces": [
            {"IPv6assignments": [{"address": "fe80::1"}], "IPv4assignments": [{"address": "10.0.0.3"}]},
            {"IPv4assignments": [{"address": "10.0.0.1"}]}
        ]
    }));

    let networks = builder.build_network_list(&input);
    let addresses: Vec<_> = networks.iter().map(|n| n.address.as_str()).collect();
    assert_eq!(addresses, vec!["10.0.0.3", "10.0.0.1", "fe80::1"]);
}

#[test]
fn test_network_missing_pieces_contribute_nothing() {
    let builder = SwitchRecordBuilder::new();

    // No interfaces at all
    assert!(builder
        .build_network_list(&switch(json!({"uuid": "U", "ipv4Addresses": ["10.0.0.1"]})))
        .is_empty());

    // Interfaces without a filter list
    let no_filter = switch(json!({
        "uuid": "U",
        "ipInterfaces": [{"IPv4assignments": [{"address": "10.0.0.1"}]}]
    }));
    assert!(builder.build_network_list(&no_filter).is_empty());

    // Interface lacking the assignment key, assignment lacking an address
    let partial = switch(json!({
        "uuid": "U",
        "ipv4Addresses": ["10.0.0.1"],
        "ipInterfaces": [{"name": "mgmt0"}, {"IPv4assignments": [{"subnet": "255.0.0.0"}]}]
    }));
    assert!(builder.build_network_list(&partial).is_empty());
}

#[test]
fn test_null_collections() {
    let builder = SwitchRecordBuilder::new();
    let (_, record) = builder
        .build(&switch(json!({"uuid": "U", "ports": null, "firmware": null, "ipInterfaces": null})))
        .unwrap();

    assert_eq!(record.hardware.guest_devices, None);
    assert_eq!(record.hardware.firmwares, None);
    assert!(record.hardware.networks.is_empty());

    let value = serde_json::to_value(&record).unwrap();
    assert!(value["hardware"].is_object());
    assert!(value["asset_detail"].is_object());
}

#[test]
fn test_empty_collections_stay_empty() {
    let builder = SwitchRecordBuilder::new();
    let (_, record) = builder
        .build(&switch(json!({"uuid": "U", "ports": [], "firmware": []})))
        .unwrap();

    assert_eq!(record.hardware.guest_devices, Some(vec![]));
    assert_eq!(record.hardware.firmwares, Some(vec![]));
}

#[test]
fn test_part_number_and_fru_trimming() {
    let builder = SwitchRecordBuilder::new();

    let (_, record) = builder
        .build(&switch(json!({"uuid": "U", "partNumber": "  ABC123  ", "FRU": " 00FE "})))
        .unwrap();
    assert_eq!(record.asset_detail.part_number.as_deref(), Some("ABC123"));
    assert_eq!(record.asset_detail.field_replaceable_unit.as_deref(), Some("00FE"));

    let (_, record) = builder
        .build(&switch(json!({"uuid": "U", "partNumber": "   ", "FRU": ""})))
        .unwrap();
    assert_eq!(record.asset_detail.part_number, None);
    assert_eq!(record.asset_detail.field_replaceable_unit, None);
}

#[test]
fn test_custom_firmware_parser() {
    let builder = SwitchRecordBuilder::new().with_firmware_parser(|fw: &RawFirmware| FirmwareRecord {
        name: fw.name.as_ref().map(|n| n.to_uppercase()),
        ..Default::default()
    });

    let (_, record) = builder
        .build(&switch(json!({"uuid": "U", "firmware": [{"name": "boot"}]})))
        .unwrap();
    let firmwares = record.hardware.firmwares.unwrap();
    assert_eq!(firmwares[0].name.as_deref(), Some("BOOT"));
}

#[test]
fn test_idempotent() {
    let builder = SwitchRecordBuilder::new();
    let input = full_switch();

    let first = builder.build(&input).unwrap();
    let second = builder.build(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first.1).unwrap(),
        serde_json::to_value(&second.1).unwrap()
    );
}

#[test]
fn test_build_all_isolates_failures() {
    let builder = SwitchRecordBuilder::new();
    let switches = vec![
        switch(json!({"uuid": "A"})),
        switch(json!({"name": "no uuid"})),
        switch(json!({"uuid": "C"})),
    ];

    let results = builder.build_all(&switches);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().0, "A");
    assert!(matches!(results[1], Err(InventoryError::MissingField("uuid"))));
    assert_eq!(results[2].as_ref().unwrap().0, "C");
}

#[test]
fn test_builder_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SwitchRecordBuilder>();

    let builder = std::sync::Arc::new(SwitchRecordBuilder::new());
    let handles: Vec<_> = ["A", "B"]
        .into_iter()
        .map(|id| {
            let builder = builder.clone();
            std::thread::spawn(move || {
                let input = RawSwitch {
                    uuid: Some(id.to_string()),
                    ..Default::default()
                };
                builder.build(&input).map(|(uuid, _)| uuid)
            })
        })
        .collect();

    let ids: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert_eq!(ids, vec!["A", "B"]);
}
