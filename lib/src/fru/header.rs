// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Headers of the FRU information storage.

use crate::error::Error;
use crate::utils::is_zero_checksum;
use std::fmt;

/// The only FRU format version supported by this crate.
pub const FORMAT_VERSION: u8 = 0x01;

/// Size of the common header in bytes.
pub const COMMON_HEADER_SIZE: usize = 8;

/// Returns the format version stored in the low nibble of `byte` if it is supported.
fn check_version(byte: u8) -> Result<u8, Error> {
    let version = byte & 0x0F;
    if version != FORMAT_VERSION {
        log::warn!("Unsupported FRU format version: {version:#x}");
        return Err(Error::UnsupportedFruVersion(version));
    }
    Ok(version)
}

/// Common header of the FRU information (FRU Information Storage Definition v1.0 - 8).
///
/// The offsets are converted into bytes. A zero offset means that the area is not present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct CommonHeader {
    pub version: u8,
    pub internal_use_offset: usize,
    pub chassis_info_offset: usize,
    pub board_info_offset: usize,
    pub product_info_offset: usize,
    pub multi_record_offset: usize,
}

impl CommonHeader {
    pub fn from_slice(slice: &[u8]) -> Result<Self, Error> {
        let header = slice
            .get(..COMMON_HEADER_SIZE)
            .ok_or(Error::InvalidFruHeader)?;
        let version = check_version(header[0])?;

        if !is_zero_checksum(header) {
            log::warn!("Invalid FRU common header checksum: {:#04x}", header[7]);
            return Err(Error::InvalidFruHeader);
        }

        let offset = |index: usize| header[index] as usize * 8;
        Ok(CommonHeader {
            version,
            internal_use_offset: offset(1),
            chassis_info_offset: offset(2),
            board_info_offset: offset(3),
            product_info_offset: offset(4),
            multi_record_offset: offset(5),
        })
    }
}

impl fmt::Display for CommonHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "FRU v{} (chassis=0x{:x}, board=0x{:x}, product=0x{:x})",
            self.version, self.chassis_info_offset, self.board_info_offset, self.product_info_offset
        )
    }
}

/// Header shared by the chassis, board and product info areas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct AreaHeader {
    pub version: u8,
    /// Length of the area in multiples of 8 bytes
    pub length: u8,
    /// Last byte of the area
    pub checksum: u8,
    /// True if the area sums to zero
    pub checksum_valid: bool,
}

impl AreaHeader {
    pub fn from_slice(slice: &[u8]) -> Result<Self, Error> {
        let [version, length, ..] = *slice else {
            return Err(Error::TruncatedPayload {
                expected: 2,
                actual: slice.len(),
            });
        };
        let version = check_version(version)?;

        let (checksum, checksum_valid) = match slice.get(..length as usize * 8) {
            Some(area @ [.., last]) => (*last, is_zero_checksum(area)),
            _ => {
                log::warn!(
                    "FRU area is expected to be {}B but is {}B",
                    length as usize * 8,
                    slice.len()
                );
                (0, false)
            }
        };
        if !checksum_valid {
            log::warn!("Invalid FRU area checksum");
        }

        Ok(AreaHeader {
            version,
            length,
            checksum,
            checksum_valid,
        })
    }

    /// Returns the size of the area in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.length as usize * 8
    }
}
