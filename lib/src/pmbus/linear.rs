// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use crate::error::Error;

/// PMBus Linear data format (PMBus 1.2 part II - 7.3).
///
/// The upper 5 bits hold a two's complement exponent `N` and the lower 11 bits a two's
/// complement mantissa `Y`. The value is `Y * 2^N`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Linear11(pub u16);

impl Linear11 {
    pub fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    /// Reads the value from the first two bytes of `payload`.
    pub fn from_slice(payload: &[u8]) -> Result<Self, Error> {
        match payload {
            [low, high, ..] => Ok(Self::from_le_bytes([*low, *high])),
            _ => Err(Error::TruncatedPayload {
                expected: 2,
                actual: payload.len(),
            }),
        }
    }

    /// Returns the 5-bit exponent.
    #[inline]
    pub fn exponent(self) -> i8 {
        let raw = (self.0 >> 11) as u8;
        ((raw << 3) as i8) >> 3
    }

    /// Returns the 11-bit mantissa.
    #[inline]
    pub fn mantissa(self) -> i16 {
        (((self.0 & 0x7FF) << 5) as i16) >> 5
    }

    pub fn value(self) -> f64 {
        self.mantissa() as f64 * 2f64.powi(self.exponent() as i32)
    }

    /// Returns the value scaled by 1000, truncated toward zero.
    pub fn milli(self) -> i64 {
        (self.value() * 1000.0) as i64
    }
}

impl From<Linear11> for f64 {
    fn from(value: Linear11) -> Self {
        value.value()
    }
}
