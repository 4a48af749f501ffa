// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Binary protocol core of the chassis management stack.
//!
//! This crate translates typed request and response messages to and from the byte frames
//! exchanged with the chassis devices:
//!
//! - [record]: declarative message codec built on static field descriptor tables.
//! - [chassis]: framing of the chassis serial bus protocol.
//! - [ipmi]: IPMI framing for the serial, LAN and in-band (WMI/KCS) transports.
//! - [pmbus]: command table and value decoders of the power supplies.
//! - [fru]: FRU information areas.
//! - [psu]: power supply client and its power-off guard.
//!
//! The physical transports are supplied by the caller through the traits of the [transport]
//! module. Every device operation returns a [record::Response] carrying a
//! [completion::CompletionCode], so a failing device never surfaces as a panic.

pub mod chassis;
pub mod completion;
pub mod error;
pub mod fru;
pub mod ipmi;
pub mod node;
pub mod pmbus;
pub mod prelude;
pub mod psu;
pub mod record;
pub mod transport;
mod utils;

pub use error::Error;
pub use utils::zero_checksum;
