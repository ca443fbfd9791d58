// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reserved wire strings.
//!
//! Special values travel through an otherwise untyped map/list tree: a map
//! carrying [`SIG_KEY`] encodes an asset, archive or secret, and a string equal
//! to one of the `UNKNOWN_*` sentinels stands in for a value that is not known
//! until the update runs.

/// Key whose presence marks a map as an encoded special value.
pub const SIG_KEY: &str = "4dabf18193072939515e22adb298388d";

/// Signature value identifying an encoded asset.
pub const ASSET_SIG: &str = "c44067f5952c0a294b673a41bacd8c17";

/// Signature value identifying an encoded archive.
pub const ARCHIVE_SIG: &str = "0def7320c3a5731c473e5ecbe6d01bc7";

/// Signature value identifying an encoded secret.
pub const SECRET_SIG: &str = "1b47061264138c4ac30d75fd1eb44270";

pub const UNKNOWN_BOOLEAN_VALUE: &str = "1c4a061d-8072-4f0a-a4cb-0ff528b18fe7";
pub const UNKNOWN_NUMBER_VALUE: &str = "3eeb2bf0-c639-47a8-9e75-3b44932eb421";
pub const UNKNOWN_STRING_VALUE: &str = "04da6b54-80e4-46f7-96ec-b56ff0331ba9";
pub const UNKNOWN_ARRAY_VALUE: &str = "6a19a0b0-7e62-4c92-b797-7f8e31da9cc2";
pub const UNKNOWN_ASSET_VALUE: &str = "030794c1-ac77-496b-92df-f27374a8bd58";
pub const UNKNOWN_ARCHIVE_VALUE: &str = "e48ece36-62e2-4504-bad9-02848725956a";
pub const UNKNOWN_OBJECT_VALUE: &str = "dd056dcd-154b-4c76-9bd3-c8f88648b5ff";

/// Known values of [`SIG_KEY`].
///
/// New signatures become new variants; anything that does not parse is an
/// unrecognized signature for the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signature {
    Asset,
    Archive,
    Secret,
}

impl Signature {
    pub fn parse(sig: &str) -> Option<Self> {
        match sig {
            ASSET_SIG => Some(Signature::Asset),
            ARCHIVE_SIG => Some(Signature::Archive),
            SECRET_SIG => Some(Signature::Secret),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Signature::Asset => ASSET_SIG,
            Signature::Archive => ARCHIVE_SIG,
            Signature::Secret => SECRET_SIG,
        }
    }
}

/// The kind of value an unknown sentinel stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnknownKind {
    Boolean,
    Number,
    String,
    Array,
    Asset,
    Archive,
    Object,
}

impl UnknownKind {
    pub const ALL: [UnknownKind; 7] = [
        UnknownKind::Boolean,
        UnknownKind::Number,
        UnknownKind::String,
        UnknownKind::Array,
        UnknownKind::Asset,
        UnknownKind::Archive,
        UnknownKind::Object,
    ];

    /// Classify a string; `None` for anything that is not an exact sentinel.
    pub fn from_sentinel(s: &str) -> Option<Self> {
        match s {
            UNKNOWN_BOOLEAN_VALUE => Some(UnknownKind::Boolean),
            UNKNOWN_NUMBER_VALUE => Some(UnknownKind::Number),
            UNKNOWN_STRING_VALUE => Some(UnknownKind::String),
            UNKNOWN_ARRAY_VALUE => Some(UnknownKind::Array),
            UNKNOWN_ASSET_VALUE => Some(UnknownKind::Asset),
            UNKNOWN_ARCHIVE_VALUE => Some(UnknownKind::Archive),
            UNKNOWN_OBJECT_VALUE => Some(UnknownKind::Object),
            _ => None,
        }
    }

    pub fn sentinel(&self) -> &'static str {
        match self {
            UnknownKind::Boolean => UNKNOWN_BOOLEAN_VALUE,
            UnknownKind::Number => UNKNOWN_NUMBER_VALUE,
            UnknownKind::String => UNKNOWN_STRING_VALUE,
            UnknownKind::Array => UNKNOWN_ARRAY_VALUE,
            UnknownKind::Asset => UNKNOWN_ASSET_VALUE,
            UnknownKind::Archive => UNKNOWN_ARCHIVE_VALUE,
            UnknownKind::Object => UNKNOWN_OBJECT_VALUE,
        }
    }
}

// Same descriptive names the other policy SDKs print.
crate::simple_display! {
    UnknownKind {
        Boolean => "boolean",
        Number => "number",
        String => "string",
        Array => "Array",
        Asset => "asset",
        Archive => "archive",
        Object => "Object",
    }
}

#[cfg(test)]
#[path = "sentinel_tests.rs"]
mod tests;
