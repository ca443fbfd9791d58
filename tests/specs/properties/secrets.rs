// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secret-preserving write specs
//!
//! Verify secrecy sticks to the written position and survives re-encoding.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn preserved(wire: Value) -> PropertyMap {
    decode_properties(&wire_map(wire), SecretMode::Preserve).unwrap()
}

#[test]
fn overwriting_a_secret_stays_secret() {
    let mut props = preserved(json!({ "k": secret(json!("x")) }));
    let mut proxy = SecretsProxy::new(&mut props);

    proxy.set("k", "y").unwrap();

    assert_eq!(proxy.get("k").unwrap().as_str(), Some("y"));
    assert_eq!(encode_properties(&props), wire_map(json!({ "k": secret(json!("y")) })));
}

#[test]
fn overwriting_a_plain_value_stays_plain() {
    let mut props = preserved(json!({ "k": "x" }));
    SecretsProxy::new(&mut props).set("k", "y").unwrap();
    assert_eq!(encode_properties(&props), wire_map(json!({ "k": "y" })));
}

#[test]
fn nested_writes_inside_a_secret_keep_the_outer_marker() {
    let mut props = preserved(json!({ "db": secret(json!({ "user": "admin", "port": 5432 })) }));
    let mut proxy = SecretsProxy::new(&mut props);

    proxy.get_mut("db").unwrap().set("user", "app").unwrap();

    assert_eq!(
        encode_properties(&props),
        wire_map(json!({ "db": secret(json!({ "user": "app", "port": 5432 })) }))
    );
}

#[test]
fn list_elements_keep_their_secrecy() {
    let mut props = preserved(json!({ "keys": ["public", secret(json!("private"))] }));
    let mut proxy = SecretsProxy::new(&mut props);
    let mut keys = proxy.get_mut("keys").unwrap();

    keys.set_index(0, "public-2").unwrap();
    keys.set_index(1, "private-2").unwrap();
    assert_eq!(keys.set_index(2, "x"), Err(WriteError::IndexOutOfRange { index: 2, len: 2 }));

    assert_eq!(
        encode_properties(&props),
        wire_map(json!({ "keys": ["public-2", secret(json!("private-2"))] }))
    );
}
