// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use chassis_protocol::fru::CommonHeader;
use chassis_protocol::prelude::*;
use chrono::NaiveDate;

fn sample() -> Vec<u8> {
    std::fs::read("tests/samples/blade.fru").unwrap()
}

#[test]
fn common_header() {
    let header = CommonHeader::from_slice(&sample()).unwrap();
    assert_eq!(header.version, 1);
    assert_eq!(header.internal_use_offset, 0);
    assert_eq!(header.chassis_info_offset, 8);
    assert_eq!(header.board_info_offset, 48);
    assert_eq!(header.product_info_offset, 96);
    assert_eq!(header.multi_record_offset, 0);
}

#[test]
fn common_header_checksum() {
    let mut data = sample();
    data[7] ^= 0x01;
    assert!(matches!(Fru::from_slice(&data), Err(Error::InvalidFruHeader)));
}

#[test]
fn unsupported_version() {
    let mut data = sample();
    data[0] = 0x02;
    data[7] = data[7].wrapping_sub(1);
    let err = Fru::from_slice(&data).unwrap_err();
    assert_eq!(err.completion_code(), CompletionCode::FRU_VERSION_NOT_SUPPORTED);
}

#[test]
fn chassis_info() {
    let fru = Fru::from_slice(&sample()).unwrap();
    let chassis = fru.chassis.unwrap();

    assert!(chassis.header.checksum_valid);
    assert_eq!(chassis.chassis_type, 0x17);
    assert_eq!(chassis.part_number.to_string(), "CH-PN-0001");
    assert_eq!(chassis.serial_number.to_string(), "CHSN12345");
    assert_eq!(chassis.custom_fields.len(), 1);
    assert_eq!(chassis.custom_fields[0].to_string(), "rack=7");
}

#[test]
fn board_info() {
    let fru = Fru::from_slice(&sample()).unwrap();
    let board = fru.board.unwrap();

    assert!(board.header.checksum_valid);
    assert_eq!(board.language, 0);
    assert_eq!(
        board.manufactured(),
        NaiveDate::from_ymd_opt(2024, 3, 15).and_then(|date| date.and_hms_opt(12, 30, 0))
    );
    assert_eq!(board.manufacturer.decode(), "Contoso");
    assert_eq!(board.product_name.decode(), "Blade X1");
    assert_eq!(board.serial_number.decode(), "123456");
    assert_eq!(board.part_number.decode(), "BRD-0042");
    assert_eq!(board.fru_file_id.decode(), "0102");
    assert!(board.custom_fields.is_empty());
}

#[test]
fn product_info() {
    let fru = Fru::from_slice(&sample()).unwrap();
    let product = fru.product.unwrap();

    assert!(product.header.checksum_valid);
    assert_eq!(product.language, 25);
    assert_eq!(product.manufacturer.decode(), "Contoso");
    assert_eq!(product.product_name.decode(), "PSU 1600W");
    assert_eq!(product.part_number.decode(), "PSU-1600");
    assert_eq!(product.version.decode(), "A01");
    assert_eq!(product.serial_number.decode(), "PSN0001");
    assert_eq!(product.asset_tag.decode(), "ASSET-77");
    assert_eq!(product.fru_file_id.decode(), "");
}

#[test]
fn corrupted_area_checksum() {
    let mut data = sample();
    // Last character of the board manufacturer.
    data[48 + 13] = b'0';
    let fru = Fru::from_slice(&data).unwrap();
    let board = fru.board.unwrap();

    assert!(!board.header.checksum_valid);
    assert_eq!(board.manufacturer.decode(), "Contos0");
    assert!(fru.chassis.unwrap().header.checksum_valid);
}

#[test]
fn truncated_image() {
    // The product area is cut.
    let data = sample();
    let fru = Fru::from_slice(&data[..100]).unwrap();
    assert!(fru.chassis.is_some());
    assert!(fru.board.is_some());

    let product = fru.product.unwrap();
    assert!(!product.header.checksum_valid);
    assert_eq!(product.manufacturer.decode(), "");
}

#[test]
fn area_beyond_image() {
    let data = sample();
    let fru = Fru::from_slice(&data[..96]).unwrap();
    assert!(fru.board.is_some());
    assert!(fru.product.is_none());
}

#[test]
fn too_short() {
    assert!(matches!(
        Fru::from_slice(&[0x01, 0x00]),
        Err(Error::InvalidFruHeader)
    ));
}
