// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property decoding specs
//!
//! Verify the wire tree decodes into the property model, that reveal mode is
//! lossy for secrets, and that malformed special values are rejected.

use crate::prelude::*;
use similar_asserts::assert_eq;

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn reveal_mode_drops_secret_markers_on_reencode() {
    let wire = wire_map(json!({
        "regular": "v",
        "list": ["v", file_asset("a/path")],
        "secret": secret(json!("s")),
    }));

    let decoded = decode_properties(&wire, SecretMode::Reveal).unwrap();

    let expected: PropertyMap = [
        ("regular".to_string(), PropertyValue::from("v")),
        (
            "list".to_string(),
            PropertyValue::Array(vec![
                PropertyValue::from("v"),
                PropertyValue::Asset(Asset::File { path: "a/path".into() }),
            ]),
        ),
        ("secret".to_string(), PropertyValue::from("s")),
    ]
    .into_iter()
    .collect();
    assert_eq!(decoded, expected);

    // Secrets do not survive a reveal round trip
    assert_eq!(
        encode_properties(&decoded),
        wire_map(json!({
            "regular": "v",
            "list": ["v", file_asset("a/path")],
            "secret": "s",
        }))
    );
}

#[test]
fn preserve_mode_round_trips_secrets() {
    let wire = wire_map(json!({ "secret": secret(json!({ "nested": [1, 2] })) }));
    let decoded = decode_properties(&wire, SecretMode::Preserve).unwrap();
    assert!(decoded["secret"].is_secret());
    assert_eq!(encode_properties(&decoded), wire);
}

#[test]
fn archives_decode_members() {
    let wire = json!({
        SIG_KEY: ARCHIVE_SIG,
        "assets": {
            "index.js": { SIG_KEY: ASSET_SIG, "text": "exports.handler = 1" },
            "lib": { SIG_KEY: ARCHIVE_SIG, "path": "./lib" },
        },
    });

    let PropertyValue::Archive(Archive::Assets(members)) = decode(&wire, SecretMode::Reveal).unwrap() else {
        panic!("expected an asset archive");
    };
    assert_eq!(
        members["index.js"],
        ArchiveMember::Asset(Asset::String { text: "exports.handler = 1".into() })
    );
    assert_eq!(members["lib"], ArchiveMember::Archive(Archive::File { path: "./lib".into() }));
}

// =============================================================================
// Malformed input
// =============================================================================

#[test]
fn unrecognized_signature_fails() {
    let err = decode(&json!({ SIG_KEY: "not-a-real-signature" }), SecretMode::Reveal).unwrap_err();
    assert_eq!(err, CodecError::UnrecognizedSignature("not-a-real-signature".into()));
}

#[test]
fn asset_without_payload_fails() {
    let err = decode(&json!({ SIG_KEY: ASSET_SIG }), SecretMode::Reveal).unwrap_err();
    assert_eq!(err, CodecError::InvalidAsset);
}

#[test]
fn secret_without_value_fails() {
    for mode in [SecretMode::Reveal, SecretMode::Preserve] {
        let err = decode(&json!({ SIG_KEY: SECRET_SIG }), mode).unwrap_err();
        assert_eq!(err, CodecError::InvalidSecret);
    }
}

#[test]
fn malformed_nested_value_fails_whole_map() {
    let wire = wire_map(json!({ "ok": 1, "deep": { "list": [{ SIG_KEY: ASSET_SIG }] } }));
    assert!(decode_properties(&wire, SecretMode::Reveal).is_err());
}
