// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Definitions of the IPMI messages used by the client.

use super::{IpmiRequest, netfn};
use crate::record::{Empty, Layout, Message};
use std::sync::OnceLock;

/// Get Device ID (IPMI v2.0 - 20.1)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetDeviceId;

impl Message for GetDeviceId {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<GetDeviceId>> = OnceLock::new();
        LAYOUT.get_or_init(|| Layout::<Self>::builder().build())
    }
}

impl IpmiRequest for GetDeviceId {
    const NET_FN: u8 = netfn::APP;
    const COMMAND: u8 = 0x01;
}

/// Response to [GetDeviceId]. The auxiliary firmware revision is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceId {
    pub device_id: u8,
    pub device_revision: u8,
    pub firmware_major: u8,
    pub firmware_minor: u8,
    pub ipmi_version: u8,
    pub additional_support: u8,
    pub manufacturer_id: [u8; 3],
    pub product_id: u16,
    pub aux_firmware_revision: [u8; 4],
}

impl DeviceId {
    /// Returns the IANA enterprise number of the manufacturer.
    pub fn manufacturer(&self) -> u32 {
        self.manufacturer_id
            .iter()
            .rev()
            .fold(0, |acc, byte| (acc << 8) | *byte as u32)
    }

    /// Returns true if the device firmware is in update mode.
    pub fn update_in_progress(&self) -> bool {
        self.firmware_major & 0x80 != 0
    }
}

impl Message for DeviceId {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<DeviceId>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            Layout::<Self>::builder()
                .u8("device_id", 0, |r| r.device_id, |r, v| r.device_id = v)
                .u8("device_revision", 1, |r| r.device_revision, |r, v| r.device_revision = v)
                .u8("firmware_major", 2, |r| r.firmware_major, |r, v| r.firmware_major = v)
                .u8("firmware_minor", 3, |r| r.firmware_minor, |r, v| r.firmware_minor = v)
                .u8("ipmi_version", 4, |r| r.ipmi_version, |r, v| r.ipmi_version = v)
                .u8(
                    "additional_support",
                    5,
                    |r| r.additional_support,
                    |r, v| r.additional_support = v,
                )
                .bytes(
                    "manufacturer_id",
                    6,
                    3,
                    |r| r.manufacturer_id.as_slice(),
                    |r, v| r.manufacturer_id[..v.len()].copy_from_slice(v),
                )
                .u16("product_id", 9, |r| r.product_id, |r, v| r.product_id = v)
                .bytes(
                    "aux_firmware_revision",
                    11,
                    4,
                    |r| r.aux_firmware_revision.as_slice(),
                    |r, v| r.aux_firmware_revision[..v.len()].copy_from_slice(v),
                )
                .build()
        })
    }
}

/// Get Chassis Status (IPMI v2.0 - 28.2)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetChassisStatus;

impl Message for GetChassisStatus {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<GetChassisStatus>> = OnceLock::new();
        LAYOUT.get_or_init(|| Layout::<Self>::builder().build())
    }
}

impl IpmiRequest for GetChassisStatus {
    const NET_FN: u8 = netfn::CHASSIS;
    const COMMAND: u8 = 0x01;
}

/// Response to [GetChassisStatus]. The front panel byte is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChassisStatus {
    pub power_state: u8,
    pub last_power_event: u8,
    pub misc_state: u8,
    pub front_panel: u8,
}

impl ChassisStatus {
    #[inline]
    pub fn is_powered_on(&self) -> bool {
        self.power_state & 0x01 != 0
    }
}

impl Message for ChassisStatus {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<ChassisStatus>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            Layout::<Self>::builder()
                .u8("power_state", 0, |r| r.power_state, |r, v| r.power_state = v)
                .u8("last_power_event", 1, |r| r.last_power_event, |r, v| r.last_power_event = v)
                .u8("misc_state", 2, |r| r.misc_state, |r, v| r.misc_state = v)
                .u8("front_panel", 3, |r| r.front_panel, |r, v| r.front_panel = v)
                .build()
        })
    }
}

/// Chassis Control (IPMI v2.0 - 28.3)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChassisControl {
    pub control: u8,
}

impl ChassisControl {
    pub const POWER_DOWN: u8 = 0x00;
    pub const POWER_UP: u8 = 0x01;
    pub const POWER_CYCLE: u8 = 0x02;
    pub const HARD_RESET: u8 = 0x03;
}

impl Message for ChassisControl {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<ChassisControl>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            Layout::<Self>::builder()
                .u8("control", 0, |r| r.control, |r, v| r.control = v)
                .build()
        })
    }
}

impl IpmiRequest for ChassisControl {
    const NET_FN: u8 = netfn::CHASSIS;
    const COMMAND: u8 = 0x02;
}

/// Response to the commands that only return a completion code.
pub type Acknowledge = Empty;

/// Get FRU Inventory Area Info (IPMI v2.0 - 34.1)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetFruInventoryAreaInfo {
    pub fru_device_id: u8,
}

impl Message for GetFruInventoryAreaInfo {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<GetFruInventoryAreaInfo>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            Layout::<Self>::builder()
                .u8("fru_device_id", 0, |r| r.fru_device_id, |r, v| r.fru_device_id = v)
                .build()
        })
    }
}

impl IpmiRequest for GetFruInventoryAreaInfo {
    const NET_FN: u8 = netfn::STORAGE;
    const COMMAND: u8 = 0x10;
}

/// Response to [GetFruInventoryAreaInfo].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FruInventoryAreaInfo {
    /// Size of the inventory area in bytes
    pub area_size: u16,
    /// Bit 0 set when the device is accessed by words
    pub access: u8,
}

impl Message for FruInventoryAreaInfo {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<FruInventoryAreaInfo>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            Layout::<Self>::builder()
                .u16("area_size", 0, |r| r.area_size, |r, v| r.area_size = v)
                .u8("access", 2, |r| r.access, |r, v| r.access = v)
                .build()
        })
    }
}

/// Read FRU Data (IPMI v2.0 - 34.2)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadFruData {
    pub fru_device_id: u8,
    pub offset: u16,
    pub count: u8,
}

impl Message for ReadFruData {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<ReadFruData>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            Layout::<Self>::builder()
                .u8("fru_device_id", 0, |r| r.fru_device_id, |r, v| r.fru_device_id = v)
                .u16("offset", 1, |r| r.offset, |r, v| r.offset = v)
                .u8("count", 3, |r| r.count, |r, v| r.count = v)
                .build()
        })
    }
}

impl IpmiRequest for ReadFruData {
    const NET_FN: u8 = netfn::STORAGE;
    const COMMAND: u8 = 0x11;
}

/// Response to [ReadFruData].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadFruDataResponse {
    pub count: u8,
    pub data: Vec<u8>,
}

impl Message for ReadFruDataResponse {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<ReadFruDataResponse>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            Layout::<Self>::builder()
                .u8("count", 0, |r| r.count, |r, v| r.count = v)
                .remainder("data", 1, |r| r.data.as_slice(), |r, v| r.data = v.to_vec())
                .build()
        })
    }
}
