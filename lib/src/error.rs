// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use crate::completion::CompletionCode;
use std::time::Duration;
use std::{fmt, io};

/// Errors reported by the framing, decoding and device functions.
///
/// Every variant maps onto a [CompletionCode] through [Error::completion_code], which is how
/// the device clients report failures to their callers.
#[derive(Debug)]
pub enum Error {
    /// The transport gave up waiting for the device.
    Timeout,
    /// The transport failed to exchange the frame.
    IOError(io::Error),
    /// The response frame is too short to carry a completion code.
    ResponseNotProvided,
    /// The response frame belongs to another request.
    ResponseMismatch { expected: u8, received: u8 },
    /// The response payload is shorter than what the command requires.
    TruncatedPayload { expected: usize, actual: usize },
    /// The request payload does not fit in the length field of the frame.
    PayloadTooLarge(usize),
    InvalidPmbusCommand(u8),
    UnsupportedFruVersion(u8),
    InvalidFruHeader,
    /// The power supply was switched off recently and must cool down first.
    CoolingDown(Duration),
    /// The device answered with a non-zero completion code.
    Device(CompletionCode),
    #[cfg(feature = "serialize")]
    JsonError(serde_json::Error),
}

impl Error {
    /// Returns the completion code reported to the callers for this error.
    pub fn completion_code(&self) -> CompletionCode {
        match self {
            Error::Timeout => CompletionCode::CM_TIMEOUT,
            Error::IOError(_) | Error::ResponseNotProvided => {
                CompletionCode::CM_RESPONSE_NOT_PROVIDED
            }
            Error::ResponseMismatch { .. } => CompletionCode::CM_RESPONSE_MISMATCH,
            Error::InvalidPmbusCommand(_) => CompletionCode::CM_INVALID_COMMAND,
            Error::PayloadTooLarge(_) => CompletionCode::CM_INVALID_REQUEST_LENGTH,
            Error::UnsupportedFruVersion(_) => CompletionCode::FRU_VERSION_NOT_SUPPORTED,
            Error::CoolingDown(_) => CompletionCode::NOT_SUPPORTED_IN_PRESENT_STATE,
            Error::Device(cc) => *cc,
            Error::TruncatedPayload { .. } | Error::InvalidFruHeader => {
                CompletionCode::UNSPECIFIED
            }
            #[cfg(feature = "serialize")]
            Error::JsonError(_) => CompletionCode::UNSPECIFIED,
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Timeout => write!(f, "Timeout while waiting for the device"),
            Error::IOError(err) => write!(f, "Encountered IO error: {err}"),
            Error::ResponseNotProvided => write!(f, "The device did not provide a response"),
            Error::ResponseMismatch { expected, received } => write!(
                f,
                "Response sequence number {received:#x} does not match request {expected:#x}"
            ),
            Error::TruncatedPayload { expected, actual } => {
                write!(f, "Truncated payload: expected {expected}B but got {actual}B")
            }
            Error::PayloadTooLarge(size) => write!(f, "Request payload too large: {size}B"),
            Error::InvalidPmbusCommand(cmd) => write!(f, "Invalid PMBus command: {cmd:#x}"),
            Error::UnsupportedFruVersion(version) => {
                write!(f, "Unsupported FRU format version: {version:#x}")
            }
            Error::InvalidFruHeader => write!(f, "Invalid FRU common header"),
            Error::CoolingDown(remaining) => write!(
                f,
                "Power supply is cooling down ({}s remaining)",
                remaining.as_secs()
            ),
            Error::Device(cc) => write!(f, "Device error: {cc}"),
            #[cfg(feature = "serialize")]
            Error::JsonError(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::TimedOut {
            Error::Timeout
        } else {
            Error::IOError(err)
        }
    }
}

#[cfg(feature = "serialize")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonError(err)
    }
}

impl From<CompletionCode> for Error {
    fn from(cc: CompletionCode) -> Self {
        Error::Device(cc)
    }
}
