// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use chassis_protocol::prelude::*;
use chassis_protocol::record::{self, FieldKind, Layout};
use std::sync::OnceLock;

#[derive(Debug, Default, PartialEq)]
struct SetLed {
    led: u8,
    color: u16,
    blink_period: u32,
    tag: Vec<u8>,
    message: Vec<u8>,
}

impl Message for SetLed {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<SetLed>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            // Registered out of order on purpose, the table is sorted by offset.
            Layout::<Self>::builder()
                .u32("blink_period", 3, |r| r.blink_period, |r, v| r.blink_period = v)
                .u8("led", 0, |r| r.led, |r, v| r.led = v)
                .u16("color", 1, |r| r.color, |r, v| r.color = v)
                .bytes("tag", 7, 4, |r| r.tag.as_slice(), |r, v| r.tag = v.to_vec())
                .remainder(
                    "message",
                    12,
                    |r| r.message.as_slice(),
                    |r, v| r.message = v.to_vec(),
                )
                .build()
        })
    }
}

#[derive(Debug, Default)]
struct Overlapping {
    a: u16,
    b: u8,
}

impl Message for Overlapping {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<Overlapping>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            Layout::<Self>::builder()
                .u16("a", 0, |r| r.a, |r, v| r.a = v)
                .u8("b", 1, |r| r.b, |r, v| r.b = v)
                .build()
        })
    }
}

fn sample() -> SetLed {
    SetLed {
        led: 3,
        color: 0xBEEF,
        blink_period: 0x01020304,
        tag: b"LED0".to_vec(),
        message: b"hello".to_vec(),
    }
}

#[test]
fn layout_sorted() {
    let offsets: Vec<usize> = SetLed::layout()
        .fields()
        .iter()
        .map(|field| field.offset)
        .collect();
    assert_eq!(offsets, [0, 1, 3, 7, 12]);

    let kinds: Vec<FieldKind> = SetLed::layout().fields().iter().map(|f| f.kind()).collect();
    assert_eq!(
        kinds,
        [
            FieldKind::U8,
            FieldKind::U16,
            FieldKind::U32,
            FieldKind::Bytes(4),
            FieldKind::Bytes(0)
        ]
    );
}

#[test]
fn encode() {
    let bytes = record::encode(&sample());
    assert_eq!(
        bytes,
        [
            0x03, 0xEF, 0xBE, 0x04, 0x03, 0x02, 0x01, b'L', b'E', b'D', b'0', 0x00, b'h', b'e',
            b'l', b'l', b'o'
        ]
    );
}

#[test]
fn round_trip() {
    let led = sample();
    let decoded: SetLed = record::decode(&record::encode(&led));
    assert_eq!(decoded, led);
}

#[test]
fn fixed_bytes_truncated() {
    let led = SetLed {
        tag: b"TOO LONG".to_vec(),
        ..SetLed::default()
    };
    let bytes = record::encode(&led);
    assert_eq!(&bytes[7..11], b"TOO ");

    // The remainder is empty so the buffer ends with the gap byte.
    assert_eq!(bytes.len(), 12);
}

#[test]
fn short_payload_keeps_defaults() {
    let decoded: SetLed = record::decode(&[0x07, 0x34, 0x12, 0xAA]);

    assert_eq!(decoded.led, 7);
    assert_eq!(decoded.color, 0x1234);
    // Only one byte of the u32 is present.
    assert_eq!(decoded.blink_period, 0);
    assert!(decoded.tag.is_empty());
    assert!(decoded.message.is_empty());
}

#[test]
fn partial_fixed_bytes() {
    let decoded: SetLed = record::decode(&[0, 0, 0, 0, 0, 0, 0, b'A', b'B']);
    assert_eq!(decoded.tag, b"AB");
    assert!(decoded.message.is_empty());
}

#[test]
fn empty_payload() {
    let decoded: SetLed = record::decode(&[]);
    assert_eq!(decoded, SetLed::default());
}

#[test]
#[should_panic(expected = "overlaps")]
fn overlapping_fields() {
    let _ = Overlapping::layout();
}

#[test]
fn response_decode_on_success() {
    let response: Response<SetLed> = Response::decode(CompletionCode::SUCCESS, &[0x05]);
    assert!(response.is_success());
    assert_eq!(response.data.led, 5);
    assert_eq!(response.into_result().unwrap().led, 5);
}

#[test]
fn response_not_decoded_on_failure() {
    let response: Response<SetLed> = Response::decode(CompletionCode::CM_BUSY, &[0x05, 0x01]);
    assert!(!response.is_success());
    assert_eq!(response.data, SetLed::default());
    assert!(matches!(
        response.into_result(),
        Err(Error::Device(CompletionCode::CM_BUSY))
    ));
}

#[test]
fn completion_code_ranges() {
    assert!(CompletionCode::SUCCESS.is_success());
    assert!(CompletionCode::CM_RESPONSE_MISMATCH.is_chassis_specific());
    assert!(!CompletionCode::CM_RESPONSE_MISMATCH.is_ipmi_specific());
    assert!(CompletionCode::FRU_VERSION_NOT_SUPPORTED.is_ipmi_specific());
    assert!(!CompletionCode::UNSPECIFIED.is_ipmi_specific());
    assert_eq!(CompletionCode::from(0xD5), CompletionCode::NOT_SUPPORTED_IN_PRESENT_STATE);
}
