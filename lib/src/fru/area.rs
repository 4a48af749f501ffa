// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Chassis, board and product info areas.

use super::header::AreaHeader;
use super::string::{END_OF_FIELDS, Encoding, FruString};
use crate::error::Error;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Reads the variable length fields of an area.
///
/// The reader stops at the end-of-fields marker or at the end of the area. A field whose
/// declared length exceeds the area is returned empty.
struct FieldReader<'a> {
    area: &'a [u8],
    cursor: usize,
    language: u8,
    done: bool,
}

impl<'a> FieldReader<'a> {
    fn new(area: &'a [u8], cursor: usize, language: u8) -> Self {
        Self {
            area,
            cursor,
            language,
            done: false,
        }
    }

    /// Returns the next field or an empty string once the fields are exhausted.
    fn field(&mut self) -> FruString {
        self.next().unwrap_or_else(|| FruString {
            language: self.language,
            ..FruString::default()
        })
    }

    /// Collects the remaining fields.
    fn custom_fields(&mut self) -> Vec<FruString> {
        self.by_ref().collect()
    }
}

impl Iterator for FieldReader<'_> {
    type Item = FruString;

    fn next(&mut self) -> Option<FruString> {
        if self.done {
            return None;
        }

        let Some(&type_length) = self.area.get(self.cursor) else {
            log::debug!("FRU area ends without end-of-fields marker");
            self.done = true;
            return None;
        };
        if type_length == END_OF_FIELDS {
            self.done = true;
            return None;
        }

        let (encoding, len) = Encoding::from_type_length(type_length);
        let start = self.cursor + 1;
        let raw = match self.area.get(start..start + len) {
            Some(raw) => raw.to_vec(),
            None => {
                log::warn!("FRU field at offset {start} overflows the area");
                self.done = true;
                Vec::new()
            }
        };
        self.cursor = start + len;

        Some(FruString {
            language: self.language,
            encoding,
            raw,
        })
    }
}

/// Returns the bytes of the area described by `header`, or the whole slice if it is shorter.
fn area_bytes<'a>(slice: &'a [u8], header: &AreaHeader) -> &'a [u8] {
    &slice[..header.size().min(slice.len())]
}

/// Chassis Info Area (FRU Information Storage Definition v1.0 - 10).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChassisInfo {
    pub header: AreaHeader,
    pub chassis_type: u8,
    pub part_number: FruString,
    pub serial_number: FruString,
    pub custom_fields: Vec<FruString>,
}

impl ChassisInfo {
    pub fn from_slice(slice: &[u8]) -> Result<Self, Error> {
        let header = AreaHeader::from_slice(slice)?;
        let area = area_bytes(slice, &header);
        let chassis_type = area.get(2).copied().unwrap_or_default();

        // Chassis area fields are always English.
        let mut fields = FieldReader::new(area, 3, 0);
        Ok(ChassisInfo {
            chassis_type,
            part_number: fields.field(),
            serial_number: fields.field(),
            custom_fields: fields.custom_fields(),
            header,
        })
    }
}

/// Board Info Area (FRU Information Storage Definition v1.0 - 11).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardInfo {
    pub header: AreaHeader,
    pub language: u8,
    /// Minutes since 1996-01-01 00:00. Zero when unspecified.
    pub manufacturing_minutes: u32,
    pub manufacturer: FruString,
    pub product_name: FruString,
    pub serial_number: FruString,
    pub part_number: FruString,
    pub fru_file_id: FruString,
    pub custom_fields: Vec<FruString>,
}

impl BoardInfo {
    pub fn from_slice(slice: &[u8]) -> Result<Self, Error> {
        let header = AreaHeader::from_slice(slice)?;
        let area = area_bytes(slice, &header);
        let language = area.get(2).copied().unwrap_or_default();
        let manufacturing_minutes = match area.get(3..6) {
            Some(&[b0, b1, b2]) => u32::from_le_bytes([b0, b1, b2, 0]),
            _ => 0,
        };

        let mut fields = FieldReader::new(area, 6, language);
        Ok(BoardInfo {
            language,
            manufacturing_minutes,
            manufacturer: fields.field(),
            product_name: fields.field(),
            serial_number: fields.field(),
            part_number: fields.field(),
            fru_file_id: fields.field(),
            custom_fields: fields.custom_fields(),
            header,
        })
    }

    /// Returns the manufacturing date if it is specified.
    pub fn manufactured(&self) -> Option<NaiveDateTime> {
        if self.manufacturing_minutes == 0 {
            return None;
        }
        let epoch = NaiveDate::from_ymd_opt(1996, 1, 1)?.and_hms_opt(0, 0, 0)?;
        epoch.checked_add_signed(TimeDelta::minutes(self.manufacturing_minutes as i64))
    }
}

/// Product Info Area (FRU Information Storage Definition v1.0 - 12).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductInfo {
    pub header: AreaHeader,
    pub language: u8,
    pub manufacturer: FruString,
    pub product_name: FruString,
    pub part_number: FruString,
    pub version: FruString,
    pub serial_number: FruString,
    pub asset_tag: FruString,
    pub fru_file_id: FruString,
    pub custom_fields: Vec<FruString>,
}

impl ProductInfo {
    pub fn from_slice(slice: &[u8]) -> Result<Self, Error> {
        let header = AreaHeader::from_slice(slice)?;
        let area = area_bytes(slice, &header);
        let language = area.get(2).copied().unwrap_or_default();

        let mut fields = FieldReader::new(area, 3, language);
        Ok(ProductInfo {
            language,
            manufacturer: fields.field(),
            product_name: fields.field(),
            part_number: fields.field(),
            version: fields.field(),
            serial_number: fields.field(),
            asset_tag: fields.field(),
            fru_file_id: fields.field(),
            custom_fields: fields.custom_fields(),
            header,
        })
    }
}
