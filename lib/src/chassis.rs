// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Chassis serial bus protocol.
//!
//! Requests are framed as `[command][length (LE u16)][payload]` and responses as
//! `[completion code][length (LE u16)][payload]`.

use crate::completion::CompletionCode;
use crate::error::Error;
use crate::record::{self, Message, Response};
use crate::transport::{ChassisTransport, DeviceAddress, Priority};

/// Size of the request and response headers in bytes.
pub const HEADER_SIZE: usize = 3;

/// A message that can be sent to a device on the chassis bus.
pub trait ChassisRequest: Message {
    /// Command byte placed in the frame header.
    const COMMAND: u8;
}

/// Wraps `payload` into a request frame.
pub fn build_frame(command: u8, payload: &[u8]) -> Result<Vec<u8>, Error> {
    let len = u16::try_from(payload.len()).map_err(|_| Error::PayloadTooLarge(payload.len()))?;

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.push(command);
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Encodes `request` and wraps it into a request frame.
pub fn build_request<R: ChassisRequest>(request: &R) -> Result<Vec<u8>, Error> {
    build_frame(R::COMMAND, &record::encode(request))
}

/// Splits a response frame into its completion code and its payload.
pub fn parse_frame(frame: &[u8]) -> Result<(CompletionCode, &[u8]), Error> {
    let Some(header) = frame.get(..HEADER_SIZE) else {
        log::warn!("Chassis response too short: {}B", frame.len());
        return Err(Error::ResponseNotProvided);
    };

    let completion_code = CompletionCode(header[0]);
    let declared = u16::from_le_bytes([header[1], header[2]]) as usize;
    let available = frame.len() - HEADER_SIZE;

    if declared > available {
        log::warn!(
            "Truncated chassis response: payload is expected to be {declared}B but is {available}B"
        );
    }

    Ok((
        completion_code,
        &frame[HEADER_SIZE..HEADER_SIZE + declared.min(available)],
    ))
}

/// Decodes a response frame into a typed response.
///
/// Frames too short to carry a header are reported with
/// [CompletionCode::CM_RESPONSE_NOT_PROVIDED].
pub fn parse_response<T: Message>(frame: &[u8]) -> Response<T> {
    match parse_frame(frame) {
        Ok((completion_code, payload)) => Response::decode(completion_code, payload),
        Err(err) => Response::from_error(&err),
    }
}

/// Sends chassis protocol requests through a [ChassisTransport].
pub struct ChassisClient<T: ChassisTransport> {
    transport: T,
}

impl<T: ChassisTransport> ChassisClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn exchange(
        &self,
        priority: Priority,
        address: DeviceAddress,
        request: &[u8],
    ) -> Result<Vec<u8>, Error> {
        log::trace!("{address} <- {request:02x?}");
        let response = self.transport.send_receive(priority, address, request)?;
        log::trace!("{address} -> {response:02x?}");
        Ok(response)
    }

    /// Sends a typed request and decodes the typed response.
    pub fn send<Req, Rsp>(
        &self,
        priority: Priority,
        address: DeviceAddress,
        request: &Req,
    ) -> Response<Rsp>
    where
        Req: ChassisRequest,
        Rsp: Message,
    {
        let response =
            build_request(request).and_then(|frame| self.exchange(priority, address, &frame));
        match response {
            Ok(frame) => parse_response(&frame),
            Err(err) => {
                log::error!("Command {:#04x} to {address} failed: {err}", Req::COMMAND);
                Response::from_error(&err)
            }
        }
    }

    /// Sends a raw command and returns the raw response payload.
    pub fn transact(
        &self,
        priority: Priority,
        address: DeviceAddress,
        command: u8,
        payload: &[u8],
    ) -> Response<Vec<u8>> {
        let response = build_frame(command, payload)
            .and_then(|frame| self.exchange(priority, address, &frame));
        let frame = match response {
            Ok(frame) => frame,
            Err(err) => {
                log::error!("Command {command:#04x} to {address} failed: {err}");
                return Response::from_error(&err);
            }
        };

        match parse_frame(&frame) {
            Ok((completion_code, payload)) if completion_code.is_success() => Response {
                completion_code,
                data: payload.to_vec(),
            },
            Ok((completion_code, _)) => Response::failed(completion_code),
            Err(err) => Response::from_error(&err),
        }
    }
}
