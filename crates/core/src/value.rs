// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed in-memory model of resource properties.

use indexmap::IndexMap;
use serde_json::Number;

use crate::codec::CodecError;
use crate::sentinel::UnknownKind;

/// Decoded property map. Equality ignores insertion order.
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// Raw wire map (a JSON object) as it arrives in a request.
pub type WireMap = serde_json::Map<String, serde_json::Value>;

/// A decoded property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<PropertyValue>),
    Object(PropertyMap),
    Asset(Asset),
    Archive(Archive),
    /// Marker kept when decoding in preserve mode so secrecy survives a
    /// round trip through the write proxy and the encoder.
    Secret(Box<PropertyValue>),
}

/// A blob of data, referenced by exactly one payload field on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    File { path: String },
    String { text: String },
    Remote { uri: String },
}

/// A collection of assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Archive {
    File { path: String },
    Remote { uri: String },
    Assets(IndexMap<String, ArchiveMember>),
}

/// Entry of an [`Archive::Assets`] collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveMember {
    Asset(Asset),
    Archive(Archive),
}

crate::simple_display! {
    PropertyValue {
        Null => "null",
        Bool(..) => "boolean",
        Number(..) => "number",
        String(..) => "string",
        Array(..) => "array",
        Object(..) => "object",
        Asset(..) => "asset",
        Archive(..) => "archive",
        Secret(..) => "secret",
    }
}

impl PropertyValue {
    /// Wrap a value in a fresh secret marker.
    pub fn secret(value: impl Into<PropertyValue>) -> Self {
        PropertyValue::Secret(Box::new(value.into()))
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, PropertyValue::Secret(_))
    }

    /// Strip any secret markers, returning the plaintext value.
    pub fn reveal(&self) -> &PropertyValue {
        match self {
            PropertyValue::Secret(inner) => inner.reveal(),
            other => other,
        }
    }

    /// Mutable counterpart of [`PropertyValue::reveal`].
    pub fn reveal_mut(&mut self) -> &mut PropertyValue {
        match self {
            PropertyValue::Secret(inner) => inner.reveal_mut(),
            other => other,
        }
    }

    /// The unknown kind if this is exactly one of the unknown sentinels.
    pub fn unknown_kind(&self) -> Option<UnknownKind> {
        match self {
            PropertyValue::String(s) => UnknownKind::from_sentinel(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            PropertyValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    pub fn as_array(&self) -> Option<&Vec<PropertyValue>> {
        match self {
            PropertyValue::Array(elems) => Some(elems),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<PropertyValue>> {
        match self {
            PropertyValue::Array(elems) => Some(elems),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut PropertyMap> {
        match self {
            PropertyValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_asset(&self) -> Option<&Asset> {
        match self {
            PropertyValue::Asset(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn as_archive(&self) -> Option<&Archive> {
        match self {
            PropertyValue::Archive(archive) => Some(archive),
            _ => None,
        }
    }

    /// Convert any serializable value into the property model.
    ///
    /// Maps carrying the signature key are interpreted as special values and
    /// secrets are kept as markers. Values JSON cannot represent (for example
    /// maps with non-string keys, NaN or infinities) fail with
    /// [`CodecError::UnsupportedType`].
    pub fn from_serialize<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self, CodecError> {
        crate::finite::ensure_finite(value)
            .map_err(|e| CodecError::UnsupportedType { kind: e.to_string() })?;
        let wire = serde_json::to_value(value)
            .map_err(|e| CodecError::UnsupportedType { kind: e.to_string() })?;
        crate::codec::decode(&wire, crate::codec::SecretMode::Preserve)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Number(n.into())
    }
}

impl From<u64> for PropertyValue {
    fn from(n: u64) -> Self {
        PropertyValue::Number(n.into())
    }
}

impl From<Number> for PropertyValue {
    fn from(n: Number) -> Self {
        PropertyValue::Number(n)
    }
}

impl TryFrom<f64> for PropertyValue {
    type Error = CodecError;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        Number::from_f64(n)
            .map(PropertyValue::Number)
            .ok_or_else(|| CodecError::UnsupportedType { kind: format!("non-finite number ({n})") })
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(elems: Vec<PropertyValue>) -> Self {
        PropertyValue::Array(elems)
    }
}

impl From<PropertyMap> for PropertyValue {
    fn from(map: PropertyMap) -> Self {
        PropertyValue::Object(map)
    }
}

impl From<Asset> for PropertyValue {
    fn from(asset: Asset) -> Self {
        PropertyValue::Asset(asset)
    }
}

impl From<Archive> for PropertyValue {
    fn from(archive: Archive) -> Self {
        PropertyValue::Archive(archive)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropertyValue::Null, Into::into)
    }
}

impl From<Asset> for ArchiveMember {
    fn from(asset: Asset) -> Self {
        ArchiveMember::Asset(asset)
    }
}

impl From<Archive> for ArchiveMember {
    fn from(archive: Archive) -> Self {
        ArchiveMember::Archive(archive)
    }
}

/// Backing tree of a proxy node, borrowed as stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawTree<'a> {
    Map(&'a PropertyMap),
    Value(&'a PropertyValue),
}

impl RawTree<'_> {
    pub fn encode(&self) -> serde_json::Value {
        match self {
            RawTree::Map(map) => serde_json::Value::Object(crate::codec::encode_properties(map)),
            RawTree::Value(value) => crate::codec::encode(value),
        }
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
