// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Completion codes returned by the chassis devices and the BMCs.
//!
//! A completion code is the first thing a caller must look at: any value other than
//! [`CompletionCode::SUCCESS`] means that the payload fields of the response have not been
//! populated from the wire.

use std::fmt;

/// Single-byte status embedded in every response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletionCode(pub u8);

impl CompletionCode {
    pub const SUCCESS: Self = Self(0x00);

    // Chassis manager specific
    pub const CM_BUSY: Self = Self(0xA0);
    pub const CM_INVALID_COMMAND: Self = Self(0xA1);
    pub const CM_TIMEOUT: Self = Self(0xA2);
    pub const CM_OUT_OF_SPACE: Self = Self(0xA3);
    pub const CM_INVALID_REQUEST_LENGTH: Self = Self(0xA4);
    pub const CM_INVALID_DATA_FIELD: Self = Self(0xA5);
    pub const CM_RESPONSE_NOT_PROVIDED: Self = Self(0xA6);
    pub const CM_RESPONSE_MISMATCH: Self = Self(0xA7);

    // IPMI v2.0, table 5-2
    pub const NODE_BUSY: Self = Self(0xC0);
    pub const INVALID_COMMAND: Self = Self(0xC1);
    pub const INVALID_FOR_LUN: Self = Self(0xC2);
    pub const TIMEOUT: Self = Self(0xC3);
    pub const OUT_OF_SPACE: Self = Self(0xC4);
    pub const RESERVATION_CANCELED: Self = Self(0xC5);
    pub const REQUEST_DATA_TRUNCATED: Self = Self(0xC6);
    pub const INVALID_REQUEST_LENGTH: Self = Self(0xC7);
    pub const REQUEST_LENGTH_EXCEEDED: Self = Self(0xC8);
    pub const PARAMETER_OUT_OF_RANGE: Self = Self(0xC9);
    pub const CANNOT_RETURN_BYTES: Self = Self(0xCA);
    pub const NOT_PRESENT: Self = Self(0xCB);
    pub const INVALID_DATA_FIELD: Self = Self(0xCC);
    pub const ILLEGAL_COMMAND: Self = Self(0xCD);
    pub const RESPONSE_NOT_PROVIDED: Self = Self(0xCE);
    pub const DUPLICATE_REQUEST: Self = Self(0xCF);
    pub const SDR_UPDATE_MODE: Self = Self(0xD0);
    pub const FIRMWARE_UPDATE_MODE: Self = Self(0xD1);
    pub const INITIALIZATION_IN_PROGRESS: Self = Self(0xD2);
    pub const DESTINATION_UNAVAILABLE: Self = Self(0xD3);
    pub const INSUFFICIENT_PRIVILEGE: Self = Self(0xD4);
    pub const NOT_SUPPORTED_IN_PRESENT_STATE: Self = Self(0xD5);
    pub const SUB_FUNCTION_DISABLED: Self = Self(0xD6);
    pub const FRU_VERSION_NOT_SUPPORTED: Self = Self(0xD7);

    pub const UNKNOWN_DEVICE_TYPE: Self = Self(0xFD);
    pub const DEVICE_ERROR: Self = Self(0xFE);
    pub const UNSPECIFIED: Self = Self(0xFF);

    #[inline]
    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Returns true for the codes generated by the chassis manager itself.
    #[inline]
    pub fn is_chassis_specific(self) -> bool {
        (0xA0..=0xBF).contains(&self.0)
    }

    /// Returns true for the codes defined by IPMI v2.0.
    #[inline]
    pub fn is_ipmi_specific(self) -> bool {
        (0xC0..=0xD7).contains(&self.0)
    }

    fn description(self) -> &'static str {
        match self {
            Self::SUCCESS => "Success",
            Self::CM_BUSY | Self::NODE_BUSY => "Device busy",
            Self::CM_INVALID_COMMAND | Self::INVALID_COMMAND => "Invalid command",
            Self::INVALID_FOR_LUN => "Command invalid for the given LUN",
            Self::CM_TIMEOUT | Self::TIMEOUT => "Timeout while processing the command",
            Self::CM_OUT_OF_SPACE | Self::OUT_OF_SPACE => "Out of space",
            Self::RESERVATION_CANCELED => "Reservation canceled or invalid",
            Self::REQUEST_DATA_TRUNCATED => "Request data truncated",
            Self::CM_INVALID_REQUEST_LENGTH | Self::INVALID_REQUEST_LENGTH => {
                "Request data length invalid"
            }
            Self::REQUEST_LENGTH_EXCEEDED => "Request data field length limit exceeded",
            Self::PARAMETER_OUT_OF_RANGE => "Parameter out of range",
            Self::CANNOT_RETURN_BYTES => "Cannot return the number of requested bytes",
            Self::NOT_PRESENT => "Requested sensor, data or record not present",
            Self::CM_INVALID_DATA_FIELD | Self::INVALID_DATA_FIELD => "Invalid data field",
            Self::ILLEGAL_COMMAND => "Command illegal for the specified sensor or record",
            Self::CM_RESPONSE_NOT_PROVIDED | Self::RESPONSE_NOT_PROVIDED => {
                "Response could not be provided"
            }
            Self::CM_RESPONSE_MISMATCH => "Response does not match the request",
            Self::DUPLICATE_REQUEST => "Duplicate request",
            Self::SDR_UPDATE_MODE => "SDR repository in update mode",
            Self::FIRMWARE_UPDATE_MODE => "Device in firmware update mode",
            Self::INITIALIZATION_IN_PROGRESS => "BMC initialization in progress",
            Self::DESTINATION_UNAVAILABLE => "Destination unavailable",
            Self::INSUFFICIENT_PRIVILEGE => "Insufficient privilege level",
            Self::NOT_SUPPORTED_IN_PRESENT_STATE => "Command not supported in present state",
            Self::SUB_FUNCTION_DISABLED => "Sub-function disabled or unavailable",
            Self::FRU_VERSION_NOT_SUPPORTED => "FRU format version not supported",
            Self::UNKNOWN_DEVICE_TYPE => "Unknown device type",
            Self::DEVICE_ERROR => "Device error",
            Self::UNSPECIFIED => "Unspecified error",
            _ => "Unknown completion code",
        }
    }
}

impl From<u8> for CompletionCode {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl From<CompletionCode> for u8 {
    fn from(code: CompletionCode) -> Self {
        code.0
    }
}

impl fmt::Display for CompletionCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({:#04x})", self.description(), self.0)
    }
}
