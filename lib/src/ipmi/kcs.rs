// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! In-band (KCS through WMI) and session layer responses.
//!
//! The network function and the command travel next to the data, so the frame only holds the
//! request data one way and `[cc][data...]` the other way.

use crate::completion::CompletionCode;
use crate::error::Error;

pub fn parse_frame(frame: &[u8]) -> Result<(CompletionCode, &[u8]), Error> {
    match frame.split_first() {
        Some((cc, data)) => Ok((CompletionCode(*cc), data)),
        None => {
            log::warn!("Empty IPMI response");
            Err(Error::ResponseNotProvided)
        }
    }
}
