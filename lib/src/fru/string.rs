// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Variable length fields of the FRU info areas (FRU Information Storage Definition v1.0 - 13).

use std::fmt;
use std::fmt::Write;

/// Type/length byte marking the end of the fields of an area.
pub const END_OF_FIELDS: u8 = 0xC1;

/// Language codes decoded as 8-bit ASCII. Other languages use UTF-16.
const ENGLISH_LANGUAGE_CODES: [u8; 2] = [0, 25];

/// Encoding selected by the upper two bits of the type/length byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Encoding {
    Binary,
    BcdPlus,
    Packed6BitAscii,
    #[default]
    Text,
}

impl Encoding {
    /// Splits a type/length byte into the encoding and the length of the field.
    pub fn from_type_length(type_length: u8) -> (Encoding, usize) {
        let encoding = match type_length >> 6 {
            0b00 => Encoding::Binary,
            0b01 => Encoding::BcdPlus,
            0b10 => Encoding::Packed6BitAscii,
            _ => Encoding::Text,
        };
        (encoding, (type_length & 0x3F) as usize)
    }
}

/// A raw field read from a FRU area.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FruString {
    /// Language code of the area that holds the field
    pub language: u8,
    pub encoding: Encoding,
    pub raw: Vec<u8>,
}

impl FruString {
    /// Returns the printable representation of the field.
    pub fn decode(&self) -> String {
        match self.encoding {
            Encoding::Binary => decode_binary(&self.raw),
            Encoding::BcdPlus => decode_bcd_plus(&self.raw),
            Encoding::Packed6BitAscii => decode_packed_ascii(&self.raw),
            Encoding::Text if ENGLISH_LANGUAGE_CODES.contains(&self.language) => {
                decode_ascii(&self.raw)
            }
            Encoding::Text => decode_utf16(&self.raw),
        }
    }
}

impl fmt::Display for FruString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.decode())
    }
}

fn without_control(c: char) -> char {
    if c < ' ' { ' ' } else { c }
}

fn decode_binary(raw: &[u8]) -> String {
    raw.iter().fold(String::with_capacity(raw.len() * 2), |mut s, byte| {
        let _ = write!(s, "{byte:02X}");
        s
    })
}

fn decode_bcd_plus(raw: &[u8]) -> String {
    raw.iter()
        .flat_map(|&byte| [byte >> 4, byte & 0xF])
        .filter_map(|digit| match digit {
            0..=9 => Some((b'0' + digit) as char),
            0xA => Some(' '),
            0xB => Some('-'),
            0xC => Some('.'),
            _ => None,
        })
        .collect()
}

/// Unpacks groups of 3 bytes into 4 characters, least significant bits first.
fn decode_packed_ascii(raw: &[u8]) -> String {
    let chars = raw.len() * 8 / 6;
    let mut s = String::with_capacity(chars);
    let mut bits: u32 = 0;
    let mut available = 0;

    for byte in raw {
        bits |= (*byte as u32) << available;
        available += 8;
        while available >= 6 {
            s.push(without_control(((bits & 0x3F) as u8 + 0x20) as char));
            bits >>= 6;
            available -= 6;
        }
    }
    s
}

fn decode_ascii(raw: &[u8]) -> String {
    raw.iter()
        .map(|byte| match byte {
            0x00..0x20 => ' ',
            0x20..0x80 => *byte as char,
            _ => '?',
        })
        .collect()
}

fn decode_utf16(raw: &[u8]) -> String {
    let units = raw
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    let mut text: String = char::decode_utf16(units)
        .map(|c| without_control(c.unwrap_or(char::REPLACEMENT_CHARACTER)))
        .collect();
    if raw.len() % 2 != 0 {
        log::debug!("UTF-16 FRU field has an odd length: {}B", raw.len());
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}
