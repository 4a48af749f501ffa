// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Field descriptor tables.
//!
//! A [Layout] lists where every field of a message lives in the wire payload. Each entry
//! carries the byte offset of the field, its width and a pair of plain function pointers used
//! to read the value out of the message and to store a decoded value back into it.

use std::fmt;

/// Wire representation of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    /// Raw bytes copied verbatim. A length of zero consumes the remainder of the payload.
    Bytes(usize),
}

impl FieldKind {
    /// Returns the fixed width of the field in bytes, or [`None`] for remainder fields.
    #[inline]
    pub fn width(&self) -> Option<usize> {
        match self {
            FieldKind::U8 => Some(1),
            FieldKind::U16 => Some(2),
            FieldKind::U32 => Some(4),
            FieldKind::Bytes(0) => None,
            FieldKind::Bytes(len) => Some(*len),
        }
    }
}

enum Accessor<R> {
    U8 {
        get: fn(&R) -> u8,
        set: fn(&mut R, u8),
    },
    U16 {
        get: fn(&R) -> u16,
        set: fn(&mut R, u16),
    },
    U32 {
        get: fn(&R) -> u32,
        set: fn(&mut R, u32),
    },
    Bytes {
        len: usize,
        get: fn(&R) -> &[u8],
        set: fn(&mut R, &[u8]),
    },
}

/// A single entry of a [Layout].
pub struct Field<R> {
    /// Name of the field, only used for diagnostics
    pub name: &'static str,
    /// Offset of the field in the payload
    pub offset: usize,
    accessor: Accessor<R>,
}

impl<R> Field<R> {
    pub fn kind(&self) -> FieldKind {
        match self.accessor {
            Accessor::U8 { .. } => FieldKind::U8,
            Accessor::U16 { .. } => FieldKind::U16,
            Accessor::U32 { .. } => FieldKind::U32,
            Accessor::Bytes { len, .. } => FieldKind::Bytes(len),
        }
    }

    fn encoded_len(&self, record: &R) -> usize {
        match self.accessor {
            Accessor::Bytes { len: 0, get, .. } => get(record).len(),
            _ => self.kind().width().unwrap_or_default(),
        }
    }

    fn write(&self, record: &R, buf: &mut [u8]) {
        let out = &mut buf[self.offset..];
        match self.accessor {
            Accessor::U8 { get, .. } => out[0] = get(record),
            Accessor::U16 { get, .. } => out[..2].copy_from_slice(&get(record).to_le_bytes()),
            Accessor::U32 { get, .. } => out[..4].copy_from_slice(&get(record).to_le_bytes()),
            Accessor::Bytes { len, get, .. } => {
                let value = get(record);
                let size = if len == 0 { value.len() } else { value.len().min(len) };
                if size < value.len() {
                    log::warn!(
                        "Field {} truncated to {len}B (value is {}B)",
                        self.name,
                        value.len()
                    );
                }
                out[..size].copy_from_slice(&value[..size]);
            }
        }
    }

    /// Populates the field from the payload. Returns false if the field lies outside of it.
    fn read(&self, record: &mut R, payload: &[u8]) -> bool {
        let Some(slice) = payload.get(self.offset..) else {
            return false;
        };
        if slice.is_empty() {
            return false;
        }

        match self.accessor {
            Accessor::U8 { set, .. } => set(record, slice[0]),
            Accessor::U16 { set, .. } => match slice.get(..2) {
                Some(bytes) => set(record, u16::from_le_bytes([bytes[0], bytes[1]])),
                None => return false,
            },
            Accessor::U32 { set, .. } => match slice.get(..4).and_then(|b| b.try_into().ok()) {
                Some(bytes) => set(record, u32::from_le_bytes(bytes)),
                None => return false,
            },
            Accessor::Bytes { len, set, .. } => {
                let end = if len == 0 { slice.len() } else { len.min(slice.len()) };
                set(record, &slice[..end])
            }
        }
        true
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}:{:?}", self.name, self.offset, self.kind())
    }
}

/// Field descriptor table of a message type.
///
/// Fields are sorted by offset. The table is immutable once built and is meant to be stored in
/// a `static` [OnceLock](std::sync::OnceLock) so that it is built once per message type.
pub struct Layout<R> {
    fields: Vec<Field<R>>,
}

impl<R> Layout<R> {
    pub fn builder() -> LayoutBuilder<R> {
        LayoutBuilder { fields: Vec::new() }
    }

    /// Returns the fields in ascending offset order.
    pub fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    /// Serializes the fields of `record` into a freshly sized buffer.
    pub fn encode(&self, record: &R) -> Vec<u8> {
        let size = self
            .fields
            .iter()
            .map(|field| field.offset + field.encoded_len(record))
            .max()
            .unwrap_or_default();

        let mut buf = vec![0; size];
        for field in self.fields.iter() {
            field.write(record, &mut buf);
        }
        log::trace!("Encoded payload: {buf:02x?}");
        buf
    }

    /// Populates the fields of `record` that are present in `payload`.
    ///
    /// Fields located after the end of the payload are left untouched: shorter responses are
    /// produced by devices that omit the trailing optional fields.
    pub fn decode_into(&self, record: &mut R, payload: &[u8]) {
        for field in self.fields.iter() {
            if !field.read(record, payload) {
                log::debug!(
                    "Field {field:?} is not present in the {}B payload",
                    payload.len()
                );
            }
        }
    }
}

/// Registers the fields of a [Layout].
pub struct LayoutBuilder<R> {
    fields: Vec<Field<R>>,
}

impl<R> LayoutBuilder<R> {
    fn push(mut self, name: &'static str, offset: usize, accessor: Accessor<R>) -> Self {
        self.fields.push(Field {
            name,
            offset,
            accessor,
        });
        self
    }

    pub fn u8(
        self,
        name: &'static str,
        offset: usize,
        get: fn(&R) -> u8,
        set: fn(&mut R, u8),
    ) -> Self {
        self.push(name, offset, Accessor::U8 { get, set })
    }

    pub fn u16(
        self,
        name: &'static str,
        offset: usize,
        get: fn(&R) -> u16,
        set: fn(&mut R, u16),
    ) -> Self {
        self.push(name, offset, Accessor::U16 { get, set })
    }

    pub fn u32(
        self,
        name: &'static str,
        offset: usize,
        get: fn(&R) -> u32,
        set: fn(&mut R, u32),
    ) -> Self {
        self.push(name, offset, Accessor::U32 { get, set })
    }

    /// Registers a byte array of `len` bytes. A `len` of zero consumes the remainder of the
    /// payload.
    ///
    /// The field always encodes to `len` bytes, zero padded, while `set` receives at most `len`
    /// bytes. Back fixed fields with a `[u8; N]` so that decoding restores the padding.
    pub fn bytes(
        self,
        name: &'static str,
        offset: usize,
        len: usize,
        get: fn(&R) -> &[u8],
        set: fn(&mut R, &[u8]),
    ) -> Self {
        self.push(name, offset, Accessor::Bytes { len, get, set })
    }

    /// Registers a byte array that extends until the end of the payload.
    pub fn remainder(
        self,
        name: &'static str,
        offset: usize,
        get: fn(&R) -> &[u8],
        set: fn(&mut R, &[u8]),
    ) -> Self {
        self.bytes(name, offset, 0, get, set)
    }

    /// Sorts and validates the table.
    ///
    /// # Panics
    ///
    /// A table with overlapping fields, or with a remainder field that is not the last one, is
    /// a defect in the message definition and aborts immediately.
    pub fn build(mut self) -> Layout<R> {
        self.fields.sort_by_key(|field| field.offset);

        for pair in self.fields.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            match current.kind().width() {
                None => panic!(
                    "Remainder field {current:?} must be the last field (followed by {next:?})"
                ),
                Some(width) if current.offset + width > next.offset => {
                    panic!("Field {current:?} overlaps with {next:?}")
                }
                Some(_) => (),
            }
        }

        Layout {
            fields: self.fields,
        }
    }
}
