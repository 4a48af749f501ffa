// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use chassis_protocol::pmbus::{self, StatusFlags, Transaction};
use chassis_protocol::prelude::*;

#[test]
fn linear11_positive() {
    let value = Linear11::from_le_bytes([0x0A, 0x00]);
    assert_eq!(value.exponent(), 0);
    assert_eq!(value.mantissa(), 10);
    assert_eq!(value.milli(), 10000);
    assert_eq!(pmbus::decode_power(&[0x0A, 0x00]).unwrap(), 10000);
}

#[test]
fn linear11_negative_exponent() {
    // N = -1, Y = 10
    let value = Linear11::from_le_bytes([0x0A, 0xF8]);
    assert_eq!(value.exponent(), -1);
    assert_eq!(value.mantissa(), 10);
    assert_eq!(value.milli(), 5000);

    // N = -2, Y = 1: 0.25
    assert_eq!(Linear11::from_le_bytes([0x01, 0xF0]).value(), 0.25);
}

#[test]
fn linear11_negative_mantissa() {
    // N = 0, Y = -1
    let value = Linear11::from_le_bytes([0xFF, 0x07]);
    assert_eq!(value.mantissa(), -1);
    assert_eq!(value.milli(), -1000);

    // N = -3, Y = -3: -0.375
    let value = Linear11::from_le_bytes([0xFD, 0xEF]);
    assert_eq!(value.exponent(), -3);
    assert_eq!(value.mantissa(), -3);
    assert_eq!(value.milli(), -375);
    assert_eq!(f64::from(value), -0.375);
}

#[test]
fn linear11_large_exponent() {
    // N = 15, Y = 1
    assert_eq!(Linear11::from_le_bytes([0x01, 0x78]).value(), 32768.0);
}

#[test]
fn linear11_largest_power_reading() {
    // N = 15, Y = 1023
    let value = Linear11::from_le_bytes([0xFF, 0x7B]);
    assert_eq!(value.exponent(), 15);
    assert_eq!(value.mantissa(), 1023);
    assert_eq!(value.milli(), 33_521_664_000);
    assert_eq!(pmbus::decode_power(&[0xFF, 0x7B]).unwrap(), 33_521_664_000);
}

#[test]
fn truncated_power_reading() {
    assert!(matches!(
        pmbus::decode_power(&[0x0A]),
        Err(Error::TruncatedPayload {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn power_good_without_faults() {
    let status = StatusWord::from_slice(&[0x00, 0x00]).unwrap();
    assert!(status.power_good());
    assert!(status.is_healthy());
    assert!(status.flags().is_empty());
}

#[test]
fn power_good_with_low_byte_fault() {
    let status = StatusWord::from_slice(&[0x08, 0x00]).unwrap();
    assert!(status.power_good());
    assert!(!status.is_healthy());
    assert_eq!(status.flags(), StatusFlags::only(StatusFlag::VinUndervoltage));
}

#[test]
fn failed_with_high_byte_fault() {
    let status = StatusWord::from_slice(&[0x00, 0x01]).unwrap();
    assert!(status.power_good());
    assert!(!status.is_healthy());
    assert!(status.flags().contains(StatusFlag::Unknown));
}

#[test]
fn power_good_negated() {
    let status = StatusWord::from_slice(&[0x00, 0x08]).unwrap();
    assert!(!status.power_good());
    assert!(!status.is_healthy());
    assert_eq!(status.as_u16(), 0x0800);
    assert!(status.flags().contains(StatusFlag::PowerGoodNegated));
}

#[test]
fn command_table() {
    let (command, info) = pmbus::lookup(0x96).unwrap();
    assert_eq!(command, PmbusCommand::ReadPout);
    assert_eq!(info.transaction, Transaction::ReadWord);
    assert_eq!(info.response_len, 2);

    let (command, info) = pmbus::lookup(0x9A).unwrap();
    assert_eq!(command.to_string(), "MFR_MODEL");
    assert_eq!(info.transaction, Transaction::ReadBlock);

    assert_eq!(PmbusCommand::Operation.info().transaction, Transaction::WriteByte);
    assert_eq!(PmbusCommand::ClearFaults.code(), 0x03);
}

#[test]
fn unknown_command() {
    let err = pmbus::lookup(0x20).unwrap_err();
    assert!(matches!(err, Error::InvalidPmbusCommand(0x20)));
    assert_eq!(err.completion_code(), CompletionCode::CM_INVALID_COMMAND);
}

#[test]
fn validate_response() {
    assert_eq!(
        PmbusCommand::StatusWord.validate_response(&[1, 2, 3]).unwrap(),
        &[1, 2]
    );
    assert!(PmbusCommand::ReadVin.validate_response(&[1]).is_err());
    assert!(PmbusCommand::MfrModel.validate_response(&[]).is_err());
    assert_eq!(PmbusCommand::MfrRevision.validate_response(&[0; 32]).unwrap().len(), 9);
}

#[test]
fn block_strings() {
    assert_eq!(pmbus::decode_block_string(b"\x07PSU1600"), "PSU1600");
    // Padding is trimmed.
    assert_eq!(pmbus::decode_block_string(b"\x08SN42\0\0  "), "SN42");
    // Bytes after the declared length are ignored.
    assert_eq!(pmbus::decode_block_string(b"\x03ABCDEF"), "ABC");
    // A length larger than the payload is tolerated.
    assert_eq!(pmbus::decode_block_string(b"\x10ABC"), "ABC");
    assert_eq!(pmbus::decode_block_string(&[]), "");
}
