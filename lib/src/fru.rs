// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! FRU information storage (Platform Management FRU Information Storage Definition v1.0).
//!
//! Only the common header and the chassis, board and product info areas are decoded. The
//! internal use and multi-record areas are left untouched.

pub mod area;
pub mod header;
pub mod string;

use crate::error::Error;

pub use area::{BoardInfo, ChassisInfo, ProductInfo};
pub use header::{AreaHeader, CommonHeader};
pub use string::{Encoding, FruString};

/// Decoded FRU information.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fru {
    pub header: CommonHeader,
    pub chassis: Option<ChassisInfo>,
    pub board: Option<BoardInfo>,
    pub product: Option<ProductInfo>,
}

impl Fru {
    /// Decodes the FRU information stored in `data`.
    ///
    /// Areas located beyond the end of `data` are reported as missing. Any other error found in
    /// the headers is returned.
    pub fn from_slice(data: &[u8]) -> Result<Self, Error> {
        let header = CommonHeader::from_slice(data)?;
        log::debug!("{header}");

        Ok(Fru {
            chassis: Self::area(data, header.chassis_info_offset, ChassisInfo::from_slice)?,
            board: Self::area(data, header.board_info_offset, BoardInfo::from_slice)?,
            product: Self::area(data, header.product_info_offset, ProductInfo::from_slice)?,
            header,
        })
    }

    fn area<A>(
        data: &[u8],
        offset: usize,
        parse: fn(&[u8]) -> Result<A, Error>,
    ) -> Result<Option<A>, Error> {
        if offset == 0 {
            return Ok(None);
        }
        let Some(slice) = data.get(offset..).filter(|slice| !slice.is_empty()) else {
            log::warn!("FRU area at offset 0x{offset:x} is beyond the {}B of data", data.len());
            return Ok(None);
        };
        parse(slice).map(Some)
    }
}
