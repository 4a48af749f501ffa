// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Typed request and response messages and their binary representation.
//!
//! A message is a plain struct implementing [Message]: it exposes a [Layout] describing the
//! offset and the width of each of its fields. The codec functions [encode] and [decode] only
//! rely on this table.
//!
//! ```
//! use chassis_protocol::record::{self, FieldKind, Layout, Message};
//! use std::sync::OnceLock;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct SetFanSpeed {
//!     fan: u8,
//!     rpm: u16,
//! }
//!
//! impl Message for SetFanSpeed {
//!     fn layout() -> &'static Layout<Self> {
//!         static LAYOUT: OnceLock<Layout<SetFanSpeed>> = OnceLock::new();
//!         LAYOUT.get_or_init(|| {
//!             Layout::<Self>::builder()
//!                 .u8("fan", 0, |r| r.fan, |r, v| r.fan = v)
//!                 .u16("rpm", 1, |r| r.rpm, |r, v| r.rpm = v)
//!                 .build()
//!         })
//!     }
//! }
//!
//! let msg = SetFanSpeed { fan: 2, rpm: 0x1234 };
//! let bytes = record::encode(&msg);
//! assert_eq!(bytes, [0x02, 0x34, 0x12]);
//! assert_eq!(record::decode::<SetFanSpeed>(&bytes), msg);
//! assert_eq!(SetFanSpeed::layout().fields()[1].kind(), FieldKind::U16);
//! ```

mod layout;

use crate::completion::CompletionCode;
use crate::error::Error;

pub use layout::{Field, FieldKind, Layout, LayoutBuilder};

/// A message with a static field descriptor table.
pub trait Message: Default + 'static {
    /// Returns the field descriptor table of the message.
    fn layout() -> &'static Layout<Self>;
}

/// Serializes a message into its payload bytes.
pub fn encode<M: Message>(message: &M) -> Vec<u8> {
    M::layout().encode(message)
}

/// Deserializes a payload into a message. Missing trailing fields keep their default value.
pub fn decode<M: Message>(payload: &[u8]) -> M {
    let mut message = M::default();
    M::layout().decode_into(&mut message, payload);
    message
}

/// Message with no payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Empty;

impl Message for Empty {
    fn layout() -> &'static Layout<Self> {
        static LAYOUT: std::sync::OnceLock<Layout<Empty>> = std::sync::OnceLock::new();
        LAYOUT.get_or_init(|| Layout::<Self>::builder().build())
    }
}

/// Response of a device: a completion code and the decoded payload.
///
/// The payload is only decoded when the completion code is [CompletionCode::SUCCESS], it keeps
/// its default value otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response<T> {
    pub completion_code: CompletionCode,
    pub data: T,
}

impl<T: Default> Response<T> {
    /// Returns a response that only carries a failure code.
    pub fn failed(completion_code: CompletionCode) -> Self {
        Response {
            completion_code,
            data: T::default(),
        }
    }

    pub(crate) fn from_error(err: &Error) -> Self {
        Self::failed(err.completion_code())
    }
}

impl<T> Response<T> {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.completion_code.is_success()
    }

    /// Converts the response into a [Result], turning non-zero completion codes into
    /// [Error::Device].
    pub fn into_result(self) -> Result<T, Error> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(Error::Device(self.completion_code))
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            completion_code: self.completion_code,
            data: f(self.data),
        }
    }
}

impl<T: Default> From<Result<T, Error>> for Response<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(data) => Response {
                completion_code: CompletionCode::SUCCESS,
                data,
            },
            Err(err) => Self::from_error(&err),
        }
    }
}

impl<M: Message> Response<M> {
    /// Builds the response of a device from its completion code and payload bytes.
    pub fn decode(completion_code: CompletionCode, payload: &[u8]) -> Self {
        if completion_code.is_success() {
            Response {
                completion_code,
                data: decode(payload),
            }
        } else {
            log::debug!("Skipping payload decode: {completion_code}");
            Self::failed(completion_code)
        }
    }
}
