// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unknown-value specs
//!
//! Verify unknown sentinels only fail when read, and that the error names the
//! exact access path.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn props() -> PropertyMap {
    let wire = wire_map(json!({
        "foo": { "bar": ["known", 2, unknown(UnknownKind::Number)] },
        "name": "web",
    }));
    decode_properties(&wire, SecretMode::Reveal).unwrap()
}

#[test]
fn reading_the_unknown_fails_with_exact_path() {
    let props = props();
    let view = UnknownCheckingProxy::new(&props);
    let bar = view.get("foo").unwrap().unwrap().get("bar").unwrap().unwrap();

    let err = bar.index(2).unwrap_err();

    assert_eq!(err.kind, UnknownKind::Number);
    assert_eq!(err.path, vec!["foo".to_string(), "bar".to_string(), "2".to_string()]);
    assert_eq!(err.to_string(), "number value at .foo.bar.2 can't be known during preview");
}

#[test]
fn siblings_and_iteration_do_not_fail() {
    let props = props();
    let view = UnknownCheckingProxy::new(&props);
    let bar = view.get("foo").unwrap().unwrap().get("bar").unwrap().unwrap();

    assert_eq!(bar.index(0).unwrap().unwrap().as_str(), Some("known"));
    assert_eq!(bar.len(), 3);
    assert_eq!(view.keys().collect::<Vec<_>>(), vec!["foo", "name"]);
    assert_eq!(view.get("name").unwrap().unwrap().as_str(), Some("web"));
}

#[test]
fn every_kind_is_detected() {
    for kind in UnknownKind::ALL {
        let wire = wire_map(json!({ "value": unknown(kind) }));
        let props = decode_properties(&wire, SecretMode::Reveal).unwrap();
        let err = UnknownCheckingProxy::new(&props).get("value").unwrap_err();
        assert_eq!(err.kind, kind);
    }
}

#[test]
fn near_miss_strings_are_plain() {
    let near = format!("{} ", UnknownKind::String.sentinel());
    let wire = wire_map(json!({ "value": near.clone() }));
    let props = decode_properties(&wire, SecretMode::Reveal).unwrap();
    let value = UnknownCheckingProxy::new(&props).get("value").unwrap().unwrap();
    assert_eq!(value.as_str(), Some(near.as_str()));
}
