// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use crate::error::Error;
use enumset::{EnumSet, EnumSetType};

/// Bits of the STATUS_WORD register (PMBus 1.2 part II - 17.2).
#[derive(EnumSetType, Debug)]
pub enum StatusFlag {
    NoneOfTheAbove = 0,
    Cml = 1,
    Temperature = 2,
    VinUndervoltage = 3,
    IoutOvercurrent = 4,
    VoutOvervoltage = 5,
    Off = 6,
    Busy = 7,
    Unknown = 8,
    Other = 9,
    Fans = 10,
    PowerGoodNegated = 11,
    Mfr = 12,
    Input = 13,
    IoutPout = 14,
    Vout = 15,
}

pub type StatusFlags = EnumSet<StatusFlag>;

/// Mask of the POWER_GOOD# bit in the high byte.
const POWER_GOOD_NEGATED: u8 = 0x08;

/// Content of the STATUS_WORD register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusWord {
    pub low: u8,
    pub high: u8,
}

impl StatusWord {
    /// Reads the status word from the first two bytes of `payload` (low byte first).
    pub fn from_slice(payload: &[u8]) -> Result<Self, Error> {
        match payload {
            [low, high, ..] => Ok(StatusWord {
                low: *low,
                high: *high,
            }),
            _ => Err(Error::TruncatedPayload {
                expected: 2,
                actual: payload.len(),
            }),
        }
    }

    #[inline]
    pub fn as_u16(self) -> u16 {
        u16::from_le_bytes([self.low, self.high])
    }

    /// Returns true if the output power is good. The register bit is active low.
    pub fn power_good(self) -> bool {
        ((self.high & POWER_GOOD_NEGATED) >> 3) ^ 0x01 == 1
    }

    /// Returns true if the power is good and no other status bit is set.
    pub fn is_healthy(self) -> bool {
        self.power_good() && self.low == 0 && self.high & !POWER_GOOD_NEGATED == 0
    }

    pub fn flags(self) -> StatusFlags {
        let word = self.as_u16() as u32 & EnumSet::<StatusFlag>::all().as_u32();
        EnumSet::<StatusFlag>::from_u32(word)
    }
}
