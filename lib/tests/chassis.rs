// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use chassis_protocol::chassis::{self, ChassisClient, ChassisRequest};
use chassis_protocol::prelude::*;
use chassis_protocol::record::Layout;
use std::cell::RefCell;
use std::sync::OnceLock;

/// Transport answering with a scripted response and recording the requests.
struct ScriptedTransport {
    response: Result<Vec<u8>, fn() -> Error>,
    requests: RefCell<Vec<(Priority, DeviceAddress, Vec<u8>)>>,
}

impl ScriptedTransport {
    fn answer(response: &[u8]) -> Self {
        Self {
            response: Ok(response.to_vec()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn fail(err: fn() -> Error) -> Self {
        Self {
            response: Err(err),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl ChassisTransport for ScriptedTransport {
    fn send_receive(
        &self,
        priority: Priority,
        address: DeviceAddress,
        request: &[u8],
    ) -> Result<Vec<u8>, Error> {
        self.requests
            .borrow_mut()
            .push((priority, address, request.to_vec()));
        self.response.clone().map_err(|err| err())
    }
}

#[derive(Debug, Default, PartialEq)]
struct SetFanSpeed {
    fan: u8,
    rpm: u16,
}

impl Message for SetFanSpeed {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<SetFanSpeed>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            Layout::<Self>::builder()
                .u8("fan", 0, |r| r.fan, |r, v| r.fan = v)
                .u16("rpm", 1, |r| r.rpm, |r, v| r.rpm = v)
                .build()
        })
    }
}

impl ChassisRequest for SetFanSpeed {
    const COMMAND: u8 = 0x42;
}

#[derive(Debug, Default, PartialEq)]
struct FanSpeed {
    rpm: u16,
    duty: u8,
}

impl Message for FanSpeed {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: OnceLock<Layout<FanSpeed>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            Layout::<Self>::builder()
                .u16("rpm", 0, |r| r.rpm, |r, v| r.rpm = v)
                .u8("duty", 2, |r| r.duty, |r, v| r.duty = v)
                .build()
        })
    }
}

#[test]
fn build_request() {
    let frame = chassis::build_request(&SetFanSpeed { fan: 1, rpm: 3000 }).unwrap();
    assert_eq!(frame, [0x42, 0x03, 0x00, 0x01, 0xB8, 0x0B]);
}

#[test]
fn build_frame_too_large() {
    let payload = vec![0; 0x10000];
    assert!(matches!(
        chassis::build_frame(0x01, &payload),
        Err(Error::PayloadTooLarge(0x10000))
    ));
}

#[test]
fn parse_response() {
    let response: Response<FanSpeed> =
        chassis::parse_response(&[0x00, 0x03, 0x00, 0xB8, 0x0B, 0x32]);
    assert_eq!(response.completion_code, CompletionCode::SUCCESS);
    assert_eq!(
        response.data,
        FanSpeed {
            rpm: 3000,
            duty: 0x32
        }
    );
}

#[test]
fn parse_response_declared_length_bounds_payload() {
    // Trailing bytes after the declared payload are ignored.
    let response: Response<FanSpeed> =
        chassis::parse_response(&[0x00, 0x02, 0x00, 0xB8, 0x0B, 0x32]);
    assert_eq!(response.data.rpm, 3000);
    assert_eq!(response.data.duty, 0);
}

#[test]
fn parse_short_response() {
    for frame in [&[][..], &[0x00][..], &[0x00, 0x02][..]] {
        let response: Response<FanSpeed> = chassis::parse_response(frame);
        assert_eq!(response.completion_code, CompletionCode::CM_RESPONSE_NOT_PROVIDED);
        assert_eq!(response.data, FanSpeed::default());
    }
}

#[test]
fn parse_failed_response() {
    let response: Response<FanSpeed> =
        chassis::parse_response(&[0xA0, 0x03, 0x00, 0xB8, 0x0B, 0x32]);
    assert_eq!(response.completion_code, CompletionCode::CM_BUSY);
    assert_eq!(response.data, FanSpeed::default());
}

#[test]
fn client_send() {
    let transport = ScriptedTransport::answer(&[0x00, 0x03, 0x00, 0xB8, 0x0B, 0x32]);
    let client = ChassisClient::new(&transport);
    let address = DeviceAddress::new(DeviceType::Fan, 2);

    let response: Response<FanSpeed> =
        client.send(Priority::System, address, &SetFanSpeed { fan: 2, rpm: 3000 });
    assert!(response.is_success());
    assert_eq!(response.data.rpm, 3000);

    let requests = transport.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, Priority::System);
    assert_eq!(requests[0].1.to_string(), "fan2");
    assert_eq!(requests[0].2, [0x42, 0x03, 0x00, 0x02, 0xB8, 0x0B]);
}

#[test]
fn client_transport_failures() {
    let address = DeviceAddress::new(DeviceType::Server, 1);

    let client = ChassisClient::new(ScriptedTransport::fail(|| Error::Timeout));
    let response: Response<FanSpeed> =
        client.send(Priority::User, address, &SetFanSpeed::default());
    assert_eq!(response.completion_code, CompletionCode::CM_TIMEOUT);

    let client = ChassisClient::new(ScriptedTransport::fail(|| {
        std::io::Error::from(std::io::ErrorKind::BrokenPipe).into()
    }));
    let response = client.transact(Priority::User, address, 0x10, &[]);
    assert_eq!(response.completion_code, CompletionCode::CM_RESPONSE_NOT_PROVIDED);
    assert!(response.data.is_empty());
}

#[test]
fn client_transact() {
    let transport = ScriptedTransport::answer(&[0x00, 0x02, 0x00, 0xAA, 0xBB]);
    let client = ChassisClient::new(transport);
    let response = client.transact(
        Priority::User,
        DeviceAddress::new(DeviceType::Psu, 1),
        0x79,
        &[],
    );
    assert_eq!(response.into_result().unwrap(), [0xAA, 0xBB]);
    assert_eq!(client.transport().requests.borrow()[0].2, [0x79, 0x00, 0x00]);
}
