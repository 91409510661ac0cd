//! Physical Infrastructure Inventory Translation
//!
//! This crate converts physical-switch inventory objects reported by a
//! hardware management API into the normalized records consumed by the
//! infrastructure-management application.
//!
//! ## Architecture
//!
//! - **RawSwitch**: Typed view of the vendor JSON (`raw`)
//! - **FieldDictionary**: Declarative `(output key, source path)` tables (`dictionary`)
//! - **ComponentParser**: Evaluates dictionaries against vendor objects (`component`)
//! - **HealthStateMap**: Vendor health strings to normalized states (`health`)
//! - **FirmwareParser**: Firmware descriptor conversion (`firmware`)
//! - **SwitchRecordBuilder**: The switch translation itself (`switch`)
//!
//! ```
//! use physinfra_inventory::{RawSwitch, SwitchRecordBuilder};
//!
//! let switch = RawSwitch::from_json(r#"{"uuid": "A1", "powerState": "On"}"#).unwrap();
//! let (uuid, record) = SwitchRecordBuilder::new().build(&switch).unwrap();
//! assert_eq!(uuid, "A1");
//! assert_eq!(record.power_state.as_deref(), Some("on"));
//! ```

pub mod component;
pub mod dictionary;
pub mod error;
pub mod firmware;
pub mod health;
pub mod raw;
pub mod record;
pub mod switch;

// Re-exports for convenience
pub use component::{AttributeSource, ComponentParser, ExtractionConfig};
pub use dictionary::{FieldDictionary, FieldEntry, FieldMapping, PHYSICAL_SWITCH, PHYSICAL_SWITCH_NETWORK};
pub use error::{InventoryError, Result};
pub use firmware::{FirmwareParser, SwitchFirmwareParser};
pub use health::{HealthState, HealthStateMap};
pub use raw::{
    switches_from_document, IpAssignment, IpFamily, IpInterface, RawFirmware, RawPort, RawSwitch,
};
pub use record::{
    AssetDetail, FirmwareRecord, Hardware, NetworkAddress, NetworkRecord, PortRecord, SwitchRecord,
};
pub use switch::SwitchRecordBuilder;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
