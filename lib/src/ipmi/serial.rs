// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! IPMI basic mode serial framing.
//!
//! Request: `[start][rsAddr][netFn][chk1][rqAddr][rqSeq][cmd][data...][chk2][stop]`
//!
//! Response: `[start][rqAddr][netFn][chk1][rsAddr][rqSeq][cmd][cc][data...][chk2][stop]`
//!
//! The start and stop bytes are placeholders: the serial transport replaces them with the
//! framing characters of the line and escapes the content of the frame.

use crate::completion::CompletionCode;
use crate::error::Error;
use crate::utils::{is_zero_checksum, zero_checksum};

/// Slave address of the BMC.
pub const BMC_ADDRESS: u8 = 0x20;
/// Placeholder of the start character.
pub const START: u8 = 0x00;
/// Placeholder of the stop character.
pub const STOP: u8 = 0x00;

/// Offset of the request data in a request frame.
const REQUEST_DATA_OFFSET: usize = 7;
/// Offset of the completion code in a response frame.
const COMPLETION_CODE_OFFSET: usize = 7;
/// Offset of the rqSeq/rsLUN byte in both directions.
const SEQUENCE_OFFSET: usize = 5;
/// Smallest valid response: header, completion code, checksum and stop byte.
const MIN_RESPONSE_SIZE: usize = COMPLETION_CODE_OFFSET + 3;

/// Builds a request frame.
///
/// `sequence` is the 6-bit request sequence number. It is stored in the upper bits of the
/// rqSeq/rqLUN byte.
pub fn build_frame(
    net_fn: u8,
    command: u8,
    requester: u8,
    sequence: u8,
    payload: &[u8],
) -> Vec<u8> {
    let mut frame = Vec::with_capacity(REQUEST_DATA_OFFSET + payload.len() + 2);
    frame.extend_from_slice(&[START, BMC_ADDRESS, net_fn << 2]);
    frame.push(zero_checksum(&frame[1..3]));
    frame.extend_from_slice(&[requester, (sequence & 0x3F) << 2, command]);
    frame.extend_from_slice(payload);
    frame.push(zero_checksum(&frame[4..]));
    frame.push(STOP);
    frame
}

/// Splits a response frame into its completion code and its data.
///
/// The response is rejected with [Error::ResponseMismatch] if its sequence number differs from
/// the one of the request: a stale response from a previous exchange may still be on the line.
pub fn parse_frame(frame: &[u8], sequence: u8) -> Result<(CompletionCode, &[u8]), Error> {
    if frame.len() < MIN_RESPONSE_SIZE {
        log::warn!("IPMI serial response too short: {}B", frame.len());
        return Err(Error::ResponseNotProvided);
    }

    let trailer = frame.len() - 2;
    if !is_zero_checksum(&frame[1..4]) {
        log::warn!("Invalid IPMI header checksum: {:#04x}", frame[3]);
    }
    if !is_zero_checksum(&frame[4..=trailer]) {
        log::warn!("Invalid IPMI data checksum: {:#04x}", frame[trailer]);
    }

    let sequence = sequence & 0x3F;
    let received = frame[SEQUENCE_OFFSET] >> 2;
    if received != sequence {
        log::warn!("IPMI sequence mismatch: sent {sequence:#x}, received {received:#x}");
        return Err(Error::ResponseMismatch {
            expected: sequence,
            received,
        });
    }

    Ok((
        CompletionCode(frame[COMPLETION_CODE_OFFSET]),
        &frame[COMPLETION_CODE_OFFSET + 1..trailer],
    ))
}
