// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serializer that only looks at floats.
//!
//! `serde_json` writes NaN and infinities as `null`. Scanning first turns
//! them into an error before any value is built.

use serde::ser::{self, Serialize};

#[derive(Debug, thiserror::Error)]
pub(crate) enum ScanError {
    #[error("non-finite number ({0})")]
    NonFinite(f64),
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for ScanError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        ScanError::Custom(msg.to_string())
    }
}

/// Fail on the first non-finite float anywhere inside `value`.
pub(crate) fn ensure_finite<T: Serialize + ?Sized>(value: &T) -> Result<(), ScanError> {
    value.serialize(FiniteScan)
}

#[derive(Clone, Copy)]
struct FiniteScan;

type Scan = Result<(), ScanError>;

fn check(n: f64) -> Scan {
    if n.is_finite() {
        Ok(())
    } else {
        Err(ScanError::NonFinite(n))
    }
}

impl ser::Serializer for FiniteScan {
    type Ok = ();
    type Error = ScanError;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_f32(self, v: f32) -> Scan {
        check(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Scan {
        check(v)
    }

    fn serialize_bool(self, _: bool) -> Scan {
        Ok(())
    }

    fn serialize_i8(self, _: i8) -> Scan {
        Ok(())
    }

    fn serialize_i16(self, _: i16) -> Scan {
        Ok(())
    }

    fn serialize_i32(self, _: i32) -> Scan {
        Ok(())
    }

    fn serialize_i64(self, _: i64) -> Scan {
        Ok(())
    }

    fn serialize_i128(self, _: i128) -> Scan {
        Ok(())
    }

    fn serialize_u8(self, _: u8) -> Scan {
        Ok(())
    }

    fn serialize_u16(self, _: u16) -> Scan {
        Ok(())
    }

    fn serialize_u32(self, _: u32) -> Scan {
        Ok(())
    }

    fn serialize_u64(self, _: u64) -> Scan {
        Ok(())
    }

    fn serialize_u128(self, _: u128) -> Scan {
        Ok(())
    }

    fn serialize_char(self, _: char) -> Scan {
        Ok(())
    }

    fn serialize_str(self, _: &str) -> Scan {
        Ok(())
    }

    fn serialize_bytes(self, _: &[u8]) -> Scan {
        Ok(())
    }

    fn serialize_none(self) -> Scan {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Scan {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Scan {
        Ok(())
    }

    fn serialize_unit_struct(self, _: &'static str) -> Scan {
        Ok(())
    }

    fn serialize_unit_variant(self, _: &'static str, _: u32, _: &'static str) -> Scan {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _: &'static str, value: &T) -> Scan {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        value: &T,
    ) -> Scan {
        value.serialize(self)
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_tuple(self, _: usize) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_tuple_struct(self, _: &'static str, _: usize) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self, ScanError> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self, ScanError> {
        Ok(self)
    }
}

impl ser::SerializeSeq for FiniteScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Scan {
        value.serialize(*self)
    }

    fn end(self) -> Scan {
        Ok(())
    }
}

impl ser::SerializeTuple for FiniteScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Scan {
        value.serialize(*self)
    }

    fn end(self) -> Scan {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for FiniteScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Scan {
        value.serialize(*self)
    }

    fn end(self) -> Scan {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for FiniteScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Scan {
        value.serialize(*self)
    }

    fn end(self) -> Scan {
        Ok(())
    }
}

impl ser::SerializeMap for FiniteScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Scan {
        key.serialize(*self)
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Scan {
        value.serialize(*self)
    }

    fn end(self) -> Scan {
        Ok(())
    }
}

impl ser::SerializeStruct for FiniteScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _: &'static str, value: &T) -> Scan {
        value.serialize(*self)
    }

    fn end(self) -> Scan {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FiniteScan {
    type Ok = ();
    type Error = ScanError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _: &'static str, value: &T) -> Scan {
        value.serialize(*self)
    }

    fn end(self) -> Scan {
        Ok(())
    }
}
