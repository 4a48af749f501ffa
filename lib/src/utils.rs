// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

/// Computes the two's-complement checksum of `bytes`.
///
/// The returned byte makes the covered range, checksum included, sum to zero modulo 256.
pub fn zero_checksum(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(0u8, |acc, byte| acc.wrapping_add(*byte))
        .wrapping_neg()
}

/// Returns true if the bytes, checksum included, sum to zero modulo 256.
pub fn is_zero_checksum(bytes: &[u8]) -> bool {
    bytes.iter().fold(0u8, |acc, byte| acc.wrapping_add(*byte)) == 0
}
