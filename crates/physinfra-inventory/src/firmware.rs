//! Firmware descriptor parsing.

use crate::raw::{present, RawFirmware};
use crate::record::FirmwareRecord;

/// Converts vendor firmware descriptors into [`FirmwareRecord`]s.
pub trait FirmwareParser {
    fn parse_firmware(&self, firmware: &RawFirmware) -> FirmwareRecord;
}

impl<F> FirmwareParser for F
where
    F: Fn(&RawFirmware) -> FirmwareRecord,
{
    fn parse_firmware(&self, firmware: &RawFirmware) -> FirmwareRecord {
        self(firmware)
    }
}

/// Default parser for switch firmware.
///
/// The record name is `"{role} {name}-{status}"`, e.g. `"Active Boot-Running"`;
/// missing parts are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchFirmwareParser;

impl FirmwareParser for SwitchFirmwareParser {
    fn parse_firmware(&self, firmware: &RawFirmware) -> FirmwareRecord {
        FirmwareRecord {
            name: display_name(firmware),
            build: present(firmware.build.as_deref()),
            version: present(firmware.version.as_deref()),
            release_date: present(firmware.date.as_deref()),
        }
    }
}

fn display_name(firmware: &RawFirmware) -> Option<String> {
    let mut name = [firmware.role.as_deref(), firmware.name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if let Some(status) = present(firmware.status.as_deref()) {
        name.push('-');
        name.push_str(&status);
    }

    (!name.is_empty()).then_some(name)
}
