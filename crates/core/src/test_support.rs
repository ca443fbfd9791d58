// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::resource::{ResourceEntry, ResourceInput};
use crate::value::WireMap;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for the property model.
pub mod strategies {
    use crate::value::{Archive, ArchiveMember, Asset, PropertyMap, PropertyValue};
    use indexmap::IndexMap;
    use proptest::prelude::*;
    use serde_json::Number;

    fn arb_key() -> impl Strategy<Value = String> {
        "[a-zA-Z_][a-zA-Z0-9_]{0,7}"
    }

    pub fn arb_asset() -> impl Strategy<Value = Asset> {
        prop_oneof![
            "[a-z/]{1,12}".prop_map(|path| Asset::File { path }),
            any::<String>().prop_map(|text| Asset::String { text }),
            "https://[a-z]{1,8}\\.com/[a-z]{0,8}".prop_map(|uri| Asset::Remote { uri }),
        ]
    }

    pub fn arb_archive() -> impl Strategy<Value = Archive> {
        let leaf = prop_oneof![
            "[a-z/]{1,12}".prop_map(|path| Archive::File { path }),
            "https://[a-z]{1,8}\\.com/[a-z]{0,8}".prop_map(|uri| Archive::Remote { uri }),
        ];
        leaf.prop_recursive(2, 8, 4, |inner| {
            let member = prop_oneof![
                arb_asset().prop_map(ArchiveMember::Asset),
                inner.prop_map(ArchiveMember::Archive),
            ];
            prop::collection::vec((arb_key(), member), 0..4)
                .prop_map(|members| Archive::Assets(members.into_iter().collect::<IndexMap<_, _>>()))
        })
    }

    fn arb_number() -> impl Strategy<Value = Number> {
        prop_oneof![
            any::<i64>().prop_map(Number::from),
            any::<u64>().prop_map(Number::from),
            (-1.0e12f64..1.0e12).prop_filter_map("finite", Number::from_f64),
        ]
    }

    /// Property values without secret markers.
    pub fn arb_property_value() -> impl Strategy<Value = PropertyValue> {
        let leaf = prop_oneof![
            Just(PropertyValue::Null),
            any::<bool>().prop_map(PropertyValue::Bool),
            arb_number().prop_map(PropertyValue::Number),
            any::<String>().prop_map(PropertyValue::String),
            arb_asset().prop_map(PropertyValue::Asset),
            arb_archive().prop_map(PropertyValue::Archive),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(PropertyValue::Array),
                prop::collection::vec((arb_key(), inner), 0..4)
                    .prop_map(|entries| PropertyValue::Object(entries.into_iter().collect())),
            ]
        })
    }

    pub fn arb_property_map() -> impl Strategy<Value = PropertyMap> {
        prop::collection::vec((arb_key(), arb_property_value()), 0..6)
            .prop_map(|entries| entries.into_iter().collect())
    }
}

// ── Wire factories ──────────────────────────────────────────────────────

/// Object payload of a JSON value; empty for anything else.
pub fn wire_map(value: serde_json::Value) -> WireMap {
    match value {
        serde_json::Value::Object(map) => map,
        _ => WireMap::new(),
    }
}

/// URN of a test resource with the given name.
pub fn test_urn(name: &str) -> String {
    format!("urn:pulumi:stack::project::test:index:Resource::{name}")
}

/// Stack entry for a test resource named `name` with the given properties.
pub fn stack_entry(name: &str, properties: serde_json::Value) -> ResourceEntry {
    ResourceInput::builder()
        .name(name)
        .urn(test_urn(name))
        .properties(wire_map(properties))
        .build()
        .into()
}
