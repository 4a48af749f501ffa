// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Boundary with the physical transports.
//!
//! Opening serial ports or sockets is not handled by this crate. The transports are provided
//! by the caller through the [ChassisTransport] and [IpmiTransport] traits, and the device
//! clients only exchange byte buffers with them.

use crate::error::Error;
use crate::ipmi::IpmiFrame;
use std::fmt;

/// Kind of device reachable on the chassis bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceType {
    Server,
    Psu,
    Fan,
    PowerSwitch,
    Watchdog,
    StatusLed,
    Bmc,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DeviceType::Server => "server",
            DeviceType::Psu => "psu",
            DeviceType::Fan => "fan",
            DeviceType::PowerSwitch => "power-switch",
            DeviceType::Watchdog => "watchdog",
            DeviceType::StatusLed => "status-led",
            DeviceType::Bmc => "bmc",
        };
        write!(f, "{name}")
    }
}

/// Address of a device on the chassis bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceAddress {
    pub device_type: DeviceType,
    pub device_id: u8,
}

impl DeviceAddress {
    pub fn new(device_type: DeviceType, device_id: u8) -> Self {
        Self {
            device_type,
            device_id,
        }
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.device_type, self.device_id)
    }
}

/// Priority of a request. System requests are served before the user ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    System,
    #[default]
    User,
}

/// A channel able to exchange chassis protocol frames with the devices.
pub trait ChassisTransport {
    /// Sends the `request` frame to the device at `address` and returns the raw response.
    fn send_receive(
        &self,
        priority: Priority,
        address: DeviceAddress,
        request: &[u8],
    ) -> Result<Vec<u8>, Error>;
}

/// A channel able to exchange IPMI messages with a BMC.
///
/// The framing expected by the channel is selected through
/// [IpmiConfig::transport](crate::ipmi::IpmiConfig::transport).
pub trait IpmiTransport {
    /// Sends the `frame` to the BMC and returns the raw response.
    fn send_receive(&self, frame: &IpmiFrame) -> Result<Vec<u8>, Error>;
}

impl<T: ChassisTransport + ?Sized> ChassisTransport for &T {
    fn send_receive(
        &self,
        priority: Priority,
        address: DeviceAddress,
        request: &[u8],
    ) -> Result<Vec<u8>, Error> {
        (**self).send_receive(priority, address, request)
    }
}

impl<T: IpmiTransport + ?Sized> IpmiTransport for &T {
    fn send_receive(&self, frame: &IpmiFrame) -> Result<Vec<u8>, Error> {
        (**self).send_receive(frame)
    }
}
