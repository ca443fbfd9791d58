// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property codec: wire tree <-> [`PropertyValue`].
//!
//! Wire format is plain JSON. A JSON object carrying [`SIG_KEY`] is a special
//! value whose kind is the signature stored under that key:
//!
//! ```text
//! {SIG_KEY: ASSET_SIG,   "path" | "text" | "uri": <string>}
//! {SIG_KEY: ARCHIVE_SIG, "assets": {..} | "path" | "uri": <string>}
//! {SIG_KEY: SECRET_SIG,  "value": <any>}
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::sentinel::{Signature, SIG_KEY};
use crate::value::{Archive, ArchiveMember, Asset, PropertyMap, PropertyValue, WireMap};

/// How secret-signature maps are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretMode {
    /// Return the plaintext and drop the secret marker.
    #[default]
    Reveal,
    /// Keep a [`PropertyValue::Secret`] marker around the plaintext.
    Preserve,
}

/// Errors from decoding a wire tree or converting foreign values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid asset encountered when unmarshaling resource property")]
    InvalidAsset,
    #[error("invalid archive encountered when unmarshaling resource property")]
    InvalidArchive,
    #[error("invalid secret encountered when unmarshaling resource property")]
    InvalidSecret,
    #[error("expected AssetArchive's assets to be Asset or Archive, got {found}")]
    ArchiveMember { found: String },
    #[error("unrecognized signature '{0}' when unmarshaling resource property")]
    UnrecognizedSignature(String),
    #[error("unsupported value type: {kind}")]
    UnsupportedType { kind: String },
}

/// Decode a top-level property map.
pub fn decode_properties(props: &WireMap, mode: SecretMode) -> Result<PropertyMap, CodecError> {
    props.iter().map(|(k, v)| Ok((k.clone(), decode(v, mode)?))).collect()
}

/// Decode a single wire value.
pub fn decode(prop: &Value, mode: SecretMode) -> Result<PropertyValue, CodecError> {
    match prop {
        Value::Null => Ok(PropertyValue::Null),
        Value::Bool(b) => Ok(PropertyValue::Bool(*b)),
        Value::Number(n) => Ok(PropertyValue::Number(n.clone())),
        // Unknown sentinels pass through; detection belongs to the unknown proxy
        Value::String(s) => Ok(PropertyValue::String(s.clone())),
        Value::Array(elems) => {
            elems.iter().map(|e| decode(e, mode)).collect::<Result<_, _>>().map(PropertyValue::Array)
        }
        Value::Object(map) => match map.get(SIG_KEY) {
            Some(sig) => decode_special(sig, map, mode),
            None => decode_properties(map, mode).map(PropertyValue::Object),
        },
    }
}

fn decode_special(sig: &Value, map: &WireMap, mode: SecretMode) -> Result<PropertyValue, CodecError> {
    let signature = sig.as_str().and_then(Signature::parse);
    match signature {
        Some(Signature::Asset) => decode_asset(map).map(PropertyValue::Asset),
        Some(Signature::Archive) => decode_archive(map).map(PropertyValue::Archive),
        Some(Signature::Secret) => {
            let value = map.get("value").ok_or(CodecError::InvalidSecret)?;
            let inner = decode(value, mode)?;
            Ok(match mode {
                SecretMode::Reveal => inner,
                SecretMode::Preserve => PropertyValue::secret(inner),
            })
        }
        None => Err(CodecError::UnrecognizedSignature(match sig {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })),
    }
}

fn decode_asset(map: &WireMap) -> Result<Asset, CodecError> {
    if let Some(path) = map.get("path") {
        return payload(path, CodecError::InvalidAsset).map(|path| Asset::File { path });
    }
    if let Some(text) = map.get("text") {
        return payload(text, CodecError::InvalidAsset).map(|text| Asset::String { text });
    }
    if let Some(uri) = map.get("uri") {
        return payload(uri, CodecError::InvalidAsset).map(|uri| Asset::Remote { uri });
    }
    Err(CodecError::InvalidAsset)
}

fn decode_archive(map: &WireMap) -> Result<Archive, CodecError> {
    // `assets` wins when several payload fields are present
    if let Some(assets) = map.get("assets") {
        let assets = assets.as_object().ok_or(CodecError::InvalidArchive)?;
        let mut members = IndexMap::with_capacity(assets.len());
        for (key, value) in assets {
            // Members have no slot for a secret marker, so they always decode revealed
            let member = match decode(value, SecretMode::Reveal)? {
                PropertyValue::Asset(asset) => ArchiveMember::Asset(asset),
                PropertyValue::Archive(archive) => ArchiveMember::Archive(archive),
                other => return Err(CodecError::ArchiveMember { found: other.to_string() }),
            };
            members.insert(key.clone(), member);
        }
        return Ok(Archive::Assets(members));
    }
    if let Some(path) = map.get("path") {
        return payload(path, CodecError::InvalidArchive).map(|path| Archive::File { path });
    }
    if let Some(uri) = map.get("uri") {
        return payload(uri, CodecError::InvalidArchive).map(|uri| Archive::Remote { uri });
    }
    Err(CodecError::InvalidArchive)
}

fn payload(value: &Value, err: CodecError) -> Result<String, CodecError> {
    value.as_str().map(str::to_string).ok_or(err)
}

/// Encode a top-level property map.
pub fn encode_properties(props: &PropertyMap) -> WireMap {
    props.iter().map(|(k, v)| (k.clone(), encode(v))).collect()
}

/// Encode a single value, re-emitting signature maps for special values.
pub fn encode(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Null => Value::Null,
        PropertyValue::Bool(b) => Value::Bool(*b),
        PropertyValue::Number(n) => Value::Number(n.clone()),
        PropertyValue::String(s) => Value::String(s.clone()),
        PropertyValue::Array(elems) => Value::Array(elems.iter().map(encode).collect()),
        PropertyValue::Object(map) => Value::Object(encode_properties(map)),
        PropertyValue::Asset(asset) => encode_asset(asset),
        PropertyValue::Archive(archive) => encode_archive(archive),
        PropertyValue::Secret(inner) => special(Signature::Secret, "value", encode(inner)),
    }
}

fn encode_asset(asset: &Asset) -> Value {
    match asset {
        Asset::File { path } => special(Signature::Asset, "path", path.as_str().into()),
        Asset::String { text } => special(Signature::Asset, "text", text.as_str().into()),
        Asset::Remote { uri } => special(Signature::Asset, "uri", uri.as_str().into()),
    }
}

fn encode_archive(archive: &Archive) -> Value {
    match archive {
        Archive::File { path } => special(Signature::Archive, "path", path.as_str().into()),
        Archive::Remote { uri } => special(Signature::Archive, "uri", uri.as_str().into()),
        Archive::Assets(members) => {
            let assets: WireMap = members
                .iter()
                .map(|(k, member)| {
                    let encoded = match member {
                        ArchiveMember::Asset(asset) => encode_asset(asset),
                        ArchiveMember::Archive(archive) => encode_archive(archive),
                    };
                    (k.clone(), encoded)
                })
                .collect();
            special(Signature::Archive, "assets", Value::Object(assets))
        }
    }
}

fn special(sig: Signature, field: &str, payload: Value) -> Value {
    let mut map = WireMap::new();
    map.insert(SIG_KEY.to_string(), Value::String(sig.as_str().to_string()));
    map.insert(field.to_string(), payload);
    Value::Object(map)
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
