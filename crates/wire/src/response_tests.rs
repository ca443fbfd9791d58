// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn diagnostic_serializes_camel_case() {
    let diag = AnalyzeDiagnostic {
        policy_name: "p".into(),
        policy_pack_name: "pack".into(),
        policy_pack_version: "0.0.1".into(),
        description: "d".into(),
        message: "d\nm".into(),
        enforcement_level: EnforcementLevel::Mandatory,
        urn: String::new(),
    };
    assert_eq!(
        serde_json::to_value(Response::Analyze { diagnostics: vec![diag] }).unwrap(),
        json!({
            "type": "Analyze",
            "diagnostics": [{
                "policyName": "p",
                "policyPackName": "pack",
                "policyPackVersion": "0.0.1",
                "description": "d",
                "message": "d\nm",
                "enforcementLevel": "mandatory",
                "urn": "",
            }],
        })
    );
}

#[test]
fn remediation_omits_absent_fields() {
    let remediation = Remediation {
        policy_name: "p".into(),
        policy_pack_name: "pack".into(),
        policy_pack_version: "0.0.1".into(),
        description: "d".into(),
        urn: "urn:x".into(),
        properties: None,
        diagnostic: Some("can't run".into()),
    };
    let value = serde_json::to_value(&remediation).unwrap();
    assert!(value.get("properties").is_none());
    assert_eq!(value["diagnostic"], json!("can't run"));
}

#[test]
fn error_response_roundtrips() {
    let response = Response::Error { message: "boom".into() };
    let json = serde_json::to_string(&response).unwrap();
    assert_eq!(json, r#"{"type":"Error","message":"boom"}"#);
    assert_eq!(serde_json::from_str::<Response>(&json).unwrap(), response);
}
