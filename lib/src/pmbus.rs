// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! PMBus commands supported by the chassis power supplies.

mod linear;
mod status;

use crate::error::Error;
use std::fmt;

pub use linear::Linear11;
pub use status::{StatusFlag, StatusFlags, StatusWord};

/// SMBus transaction used by a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transaction {
    SendByte,
    WriteByte,
    WriteWord,
    ReadByte,
    ReadWord,
    ReadBlock,
}

/// Shape of a PMBus command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandInfo {
    pub transaction: Transaction,
    /// Expected size of the response in bytes. Upper bound for block reads, length prefix
    /// included.
    pub response_len: usize,
}

impl CommandInfo {
    const fn new(transaction: Transaction, response_len: usize) -> Self {
        Self {
            transaction,
            response_len,
        }
    }
}

/// Registered PMBus commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PmbusCommand {
    Operation = 0x01,
    ClearFaults = 0x03,
    StatusWord = 0x79,
    ReadVin = 0x88,
    ReadIin = 0x89,
    ReadVout = 0x8B,
    ReadIout = 0x8C,
    ReadTemperature1 = 0x8D,
    ReadFanSpeed1 = 0x90,
    ReadPout = 0x96,
    ReadPin = 0x97,
    MfrId = 0x99,
    MfrModel = 0x9A,
    MfrRevision = 0x9B,
    MfrSerial = 0x9E,
}

impl PmbusCommand {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the transaction shape and the response size of the command.
    pub fn info(self) -> CommandInfo {
        use Transaction::*;

        match self {
            PmbusCommand::Operation => CommandInfo::new(WriteByte, 0),
            PmbusCommand::ClearFaults => CommandInfo::new(SendByte, 0),
            PmbusCommand::StatusWord
            | PmbusCommand::ReadVin
            | PmbusCommand::ReadIin
            | PmbusCommand::ReadVout
            | PmbusCommand::ReadIout
            | PmbusCommand::ReadTemperature1
            | PmbusCommand::ReadFanSpeed1
            | PmbusCommand::ReadPout
            | PmbusCommand::ReadPin => CommandInfo::new(ReadWord, 2),
            PmbusCommand::MfrId => CommandInfo::new(ReadBlock, 13),
            PmbusCommand::MfrModel | PmbusCommand::MfrSerial => CommandInfo::new(ReadBlock, 21),
            PmbusCommand::MfrRevision => CommandInfo::new(ReadBlock, 9),
        }
    }

    /// Checks the size of a response payload and returns the part holding the value.
    ///
    /// Fixed size responses must be complete. Block responses larger than the expected size
    /// are truncated.
    pub fn validate_response(self, payload: &[u8]) -> Result<&[u8], Error> {
        let info = self.info();
        match info.transaction {
            Transaction::SendByte | Transaction::WriteByte | Transaction::WriteWord => {
                Ok(&payload[..0])
            }
            Transaction::ReadByte | Transaction::ReadWord => payload
                .get(..info.response_len)
                .ok_or(Error::TruncatedPayload {
                    expected: info.response_len,
                    actual: payload.len(),
                }),
            Transaction::ReadBlock => {
                if payload.is_empty() {
                    return Err(Error::TruncatedPayload {
                        expected: 1,
                        actual: 0,
                    });
                }
                if payload.len() > info.response_len {
                    log::warn!(
                        "{self} response is {}B, truncating to {}B",
                        payload.len(),
                        info.response_len
                    );
                }
                Ok(&payload[..payload.len().min(info.response_len)])
            }
        }
    }
}

impl TryFrom<u8> for PmbusCommand {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Error> {
        Ok(match code {
            0x01 => PmbusCommand::Operation,
            0x03 => PmbusCommand::ClearFaults,
            0x79 => PmbusCommand::StatusWord,
            0x88 => PmbusCommand::ReadVin,
            0x89 => PmbusCommand::ReadIin,
            0x8B => PmbusCommand::ReadVout,
            0x8C => PmbusCommand::ReadIout,
            0x8D => PmbusCommand::ReadTemperature1,
            0x90 => PmbusCommand::ReadFanSpeed1,
            0x96 => PmbusCommand::ReadPout,
            0x97 => PmbusCommand::ReadPin,
            0x99 => PmbusCommand::MfrId,
            0x9A => PmbusCommand::MfrModel,
            0x9B => PmbusCommand::MfrRevision,
            0x9E => PmbusCommand::MfrSerial,
            code => return Err(Error::InvalidPmbusCommand(code)),
        })
    }
}

impl fmt::Display for PmbusCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PmbusCommand::Operation => "OPERATION",
            PmbusCommand::ClearFaults => "CLEAR_FAULTS",
            PmbusCommand::StatusWord => "STATUS_WORD",
            PmbusCommand::ReadVin => "READ_VIN",
            PmbusCommand::ReadIin => "READ_IIN",
            PmbusCommand::ReadVout => "READ_VOUT",
            PmbusCommand::ReadIout => "READ_IOUT",
            PmbusCommand::ReadTemperature1 => "READ_TEMPERATURE_1",
            PmbusCommand::ReadFanSpeed1 => "READ_FAN_SPEED_1",
            PmbusCommand::ReadPout => "READ_POUT",
            PmbusCommand::ReadPin => "READ_PIN",
            PmbusCommand::MfrId => "MFR_ID",
            PmbusCommand::MfrModel => "MFR_MODEL",
            PmbusCommand::MfrRevision => "MFR_REVISION",
            PmbusCommand::MfrSerial => "MFR_SERIAL",
        };
        write!(f, "{name}")
    }
}

/// Looks up a raw command code in the command table.
pub fn lookup(code: u8) -> Result<(PmbusCommand, CommandInfo), Error> {
    let command = PmbusCommand::try_from(code)?;
    Ok((command, command.info()))
}

/// Decodes a power reading in milliwatts.
pub fn decode_power(payload: &[u8]) -> Result<i64, Error> {
    Ok(Linear11::from_slice(payload)?.milli())
}

/// Decodes a manufacturer string (model, serial number...).
///
/// The first byte is the block length and is not part of the string.
pub fn decode_block_string(payload: &[u8]) -> String {
    let Some((len, data)) = payload.split_first() else {
        return String::new();
    };

    let len = *len as usize;
    if len > data.len() {
        log::debug!("Block length {len} exceeds the {}B payload", data.len());
    }

    let trim_chars = ['\0', ' '];
    String::from_utf8_lossy(&data[..len.min(data.len())])
        .trim_end_matches(&trim_chars)
        .to_string()
}
