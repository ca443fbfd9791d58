// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for specs.

pub use pp_core::sentinel::{ARCHIVE_SIG, ASSET_SIG, SECRET_SIG, SIG_KEY};
pub use pp_core::test_support::{stack_entry, test_urn, wire_map};
pub use pp_core::*;
pub use pp_engine::*;
pub use pp_wire::{
    AnalyzeDiagnostic, AnalyzeRequest, AnalyzerResource, PolicyConfig, PropertyDependencies,
    Remediation, Request, Response,
};
pub use serde_json::{json, Value};

/// Secret-signature wrapper around `value`.
pub fn secret(value: Value) -> Value {
    json!({ SIG_KEY: SECRET_SIG, "value": value })
}

/// File asset signature map.
pub fn file_asset(path: &str) -> Value {
    json!({ SIG_KEY: ASSET_SIG, "path": path })
}

/// Sentinel string for an unknown of the given kind.
pub fn unknown(kind: UnknownKind) -> Value {
    Value::String(kind.sentinel().to_string())
}

/// Analyze request for a test resource.
pub fn resource_request(name: &str, resource_type: &str, properties: Value) -> AnalyzeRequest {
    AnalyzeRequest {
        resource_type: resource_type.to_string(),
        properties: wire_map(properties),
        urn: test_urn(name),
        name: name.to_string(),
        ..Default::default()
    }
}

/// Stack request entry for a test resource.
pub fn stack_resource(name: &str, properties: Value) -> AnalyzerResource {
    AnalyzerResource {
        resource: resource_request(name, "test:index:Resource", properties),
        ..Default::default()
    }
}

/// Analyzer over a single-policy pack, with no runtime settings.
pub fn analyzer_for(policy: impl Into<Policy>) -> Analyzer {
    let pack = PolicyPack::new("acme-policies", vec![policy.into()]).unwrap();
    Analyzer::new(pack).with_settings(None)
}
