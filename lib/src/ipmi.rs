// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! IPMI messaging over the serial, in-band and LAN transports.
//!
//! The framing only depends on the [TransportKind] selected in the [IpmiConfig]: every
//! function of this module is stateless apart from the [SequenceCounter] of the client.

pub mod commands;
pub mod kcs;
pub mod serial;

use crate::completion::CompletionCode;
use crate::error::Error;
use crate::fru::Fru;
use crate::record::{self, Message, Response};
use crate::transport::IpmiTransport;
use std::sync::atomic::{AtomicU8, Ordering};

use commands::{FruInventoryAreaInfo, GetFruInventoryAreaInfo, ReadFruData, ReadFruDataResponse};

/// Network function codes (requests).
pub mod netfn {
    pub const CHASSIS: u8 = 0x00;
    pub const BRIDGE: u8 = 0x02;
    pub const SENSOR_EVENT: u8 = 0x04;
    pub const APP: u8 = 0x06;
    pub const FIRMWARE: u8 = 0x08;
    pub const STORAGE: u8 = 0x0A;
    pub const TRANSPORT: u8 = 0x0C;
    pub const GROUP_EXTENSION: u8 = 0x2C;
    pub const OEM_GROUP: u8 = 0x2E;
    pub const OEM: u8 = 0x30;
}

/// Channel used to reach the BMC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportKind {
    /// Basic mode serial line, framed and checksummed by this crate.
    #[default]
    Serial,
    /// Network session. The session layer frames the message.
    Lan,
    /// In-band KCS interface reached through WMI.
    Wmi,
}

/// Software ID of the requester.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum RequesterAddress {
    #[default]
    RemoteSoftware,
    SystemSoftware,
}

impl RequesterAddress {
    pub fn as_u8(self) -> u8 {
        match self {
            RequesterAddress::RemoteSoftware => 0x81,
            RequesterAddress::SystemSoftware => 0x8F,
        }
    }
}

/// Settings of an [IpmiClient].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct IpmiConfig {
    pub transport: TransportKind,
    pub requester: RequesterAddress,
}

/// A message that can be sent to a BMC.
pub trait IpmiRequest: Message {
    const NET_FN: u8;
    const COMMAND: u8;
}

/// An IPMI message ready to be handed over to an [IpmiTransport].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpmiFrame {
    pub net_fn: u8,
    pub command: u8,
    /// Complete wire frame for the serial transport, request data otherwise.
    pub data: Vec<u8>,
}

/// Generator of the 6-bit request sequence numbers.
#[derive(Debug, Default)]
pub struct SequenceCounter(AtomicU8);

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next sequence number, wrapping after 63.
    pub fn next(&self) -> u8 {
        self.0.fetch_add(1, Ordering::Relaxed) & 0x3F
    }
}

/// Wraps the request data into a frame for the given transport.
pub fn build_frame(
    config: &IpmiConfig,
    net_fn: u8,
    command: u8,
    sequence: u8,
    payload: &[u8],
) -> IpmiFrame {
    let data = match config.transport {
        TransportKind::Serial => serial::build_frame(
            net_fn,
            command,
            config.requester.as_u8(),
            sequence,
            payload,
        ),
        TransportKind::Lan | TransportKind::Wmi => payload.to_vec(),
    };

    IpmiFrame {
        net_fn,
        command,
        data,
    }
}

/// Encodes `request` and wraps it into a frame for the given transport.
pub fn build_request<R: IpmiRequest>(config: &IpmiConfig, request: &R, sequence: u8) -> IpmiFrame {
    build_frame(
        config,
        R::NET_FN,
        R::COMMAND,
        sequence,
        &record::encode(request),
    )
}

/// Splits a response frame into its completion code and its data.
pub fn parse_frame<'a>(
    config: &IpmiConfig,
    frame: &'a [u8],
    sequence: u8,
) -> Result<(CompletionCode, &'a [u8]), Error> {
    match config.transport {
        TransportKind::Serial => serial::parse_frame(frame, sequence),
        TransportKind::Lan | TransportKind::Wmi => kcs::parse_frame(frame),
    }
}

/// Returns the IPMI flavour of the completion code associated to `err`.
fn completion_code(err: &Error) -> CompletionCode {
    match err {
        Error::Timeout => CompletionCode::TIMEOUT,
        Error::IOError(_) | Error::ResponseNotProvided => CompletionCode::RESPONSE_NOT_PROVIDED,
        err => err.completion_code(),
    }
}

/// Decodes a response frame into a typed response.
///
/// Malformed frames never fail: they produce a response holding the matching completion code.
pub fn parse_response<T: Message>(config: &IpmiConfig, frame: &[u8], sequence: u8) -> Response<T> {
    match parse_frame(config, frame, sequence) {
        Ok((completion_code, data)) => Response::decode(completion_code, data),
        Err(err) => Response::failed(completion_code(&err)),
    }
}

/// Sends IPMI requests to a BMC through an [IpmiTransport].
pub struct IpmiClient<T: IpmiTransport> {
    transport: T,
    config: IpmiConfig,
    sequence: SequenceCounter,
}

impl<T: IpmiTransport> IpmiClient<T> {
    pub fn new(transport: T, config: IpmiConfig) -> Self {
        Self {
            transport,
            config,
            sequence: SequenceCounter::new(),
        }
    }

    pub fn config(&self) -> &IpmiConfig {
        &self.config
    }

    /// Sends a typed request and decodes the typed response.
    pub fn send<Req, Rsp>(&self, request: &Req) -> Response<Rsp>
    where
        Req: IpmiRequest,
        Rsp: Message,
    {
        let sequence = self.sequence.next();
        let frame = build_request(&self.config, request, sequence);
        log::trace!(
            "IPMI {:#04x}/{:#04x} <- {:02x?}",
            frame.net_fn,
            frame.command,
            frame.data
        );

        match self.transport.send_receive(&frame) {
            Ok(response) => {
                log::trace!("IPMI {:#04x}/{:#04x} -> {response:02x?}", frame.net_fn, frame.command);
                parse_response(&self.config, &response, sequence)
            }
            Err(err) => {
                log::error!(
                    "IPMI command {:#04x}/{:#04x} failed: {err}",
                    Req::NET_FN,
                    Req::COMMAND
                );
                Response::failed(completion_code(&err))
            }
        }
    }

    /// Reads the complete FRU inventory area of the given FRU device.
    pub fn read_fru_data(&self, fru_device_id: u8) -> Response<Vec<u8>> {
        const CHUNK_SIZE: u8 = 16;

        let info: Response<FruInventoryAreaInfo> =
            self.send(&GetFruInventoryAreaInfo { fru_device_id });
        if !info.is_success() {
            return Response::failed(info.completion_code);
        }

        let size = info.data.area_size as usize;
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let count = (size - data.len()).min(CHUNK_SIZE as usize) as u8;
            let request = ReadFruData {
                fru_device_id,
                offset: data.len() as u16,
                count,
            };
            let chunk: Response<ReadFruDataResponse> = self.send(&request);
            if !chunk.is_success() {
                return Response::failed(chunk.completion_code);
            }
            if chunk.data.data.is_empty() {
                log::warn!("FRU read returned no data at offset {}", data.len());
                break;
            }
            data.extend_from_slice(&chunk.data.data);
        }
        data.truncate(size);

        Response {
            completion_code: CompletionCode::SUCCESS,
            data,
        }
    }

    /// Reads and parses the FRU inventory of the given FRU device.
    ///
    /// Parse failures are reported through the completion code, never as a fault.
    pub fn read_fru(&self, fru_device_id: u8) -> Response<Fru> {
        let raw = self.read_fru_data(fru_device_id);
        if !raw.is_success() {
            return Response::failed(raw.completion_code);
        }

        match Fru::from_slice(&raw.data) {
            Ok(fru) => Response {
                completion_code: CompletionCode::SUCCESS,
                data: fru,
            },
            Err(err) => {
                log::error!("Cannot parse FRU {fru_device_id}: {err}");
                Response::from_error(&err)
            }
        }
    }
}
