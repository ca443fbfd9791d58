// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Framed protocol specs
//!
//! Drive an analyzer over an in-memory stream the way the engine host does.

use std::time::Duration;

use serde::Deserialize;
use similar_asserts::assert_eq;
use tokio::io::AsyncWriteExt;

use crate::prelude::*;

const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Default, Deserialize)]
struct AclConfig {
    #[serde(default)]
    allowed: Vec<String>,
}

fn pack() -> Analyzer {
    let policy = ResourceValidationPolicy::new("no-public", "Buckets must be private.")
        .config_schema(pp_wire::PolicyConfigSchema {
            properties: wire_map(json!({ "allowed": { "type": "array" } })),
            required: vec![],
        })
        .validation(validate_resource(|args, report| {
            let allowed = args.context.config_as::<AclConfig>()?.unwrap_or_default().allowed;
            let acl = args.resource.props().get("acl")?.and_then(|acl| acl.as_str());
            if let Some(acl) = acl.filter(|acl| !allowed.iter().any(|a| a == acl)) {
                report.report(format!("acl '{acl}' is not allowed"), Some(args.resource.urn()));
            }
            Ok(())
        }));
    analyzer_for(policy)
}

#[tokio::test]
async fn host_session_over_framed_stream() {
    let analyzer = pack();
    let (client, server) = tokio::io::duplex(64 * 1024);
    let (server_read, server_write) = tokio::io::split(server);
    let (mut reader, mut writer) = tokio::io::split(client);

    let host = async move {
        let mut responses = Vec::new();
        for request in [
            Request::GetAnalyzerInfo,
            Request::Analyze {
                resource: resource_request("b", "aws:s3:Bucket", json!({ "acl": "public-read" })),
            },
            Request::Configure {
                policy_config: [(
                    "no-public".to_string(),
                    PolicyConfig {
                        enforcement_level: Some(EnforcementLevel::Mandatory),
                        properties: wire_map(json!({ "allowed": ["public-read"] })),
                    },
                )]
                .into_iter()
                .collect(),
            },
            Request::Analyze {
                resource: resource_request("b", "aws:s3:Bucket", json!({ "acl": "public-read" })),
            },
        ] {
            pp_wire::write_request(&mut writer, &request, TIMEOUT).await.unwrap();
            responses.push(pp_wire::read_response(&mut reader, TIMEOUT).await.unwrap());
        }
        writer.shutdown().await.unwrap();
        responses
    };

    let (served, responses) = tokio::join!(serve(&analyzer, server_read, server_write, TIMEOUT), host);
    served.unwrap();

    let Response::AnalyzerInfo { info } = &responses[0] else { panic!("expected analyzer info") };
    assert_eq!(info.name, "acme-policies");
    assert!(info.supports_config);
    assert!(info.policies[0].config_schema.is_some());

    let Response::Analyze { diagnostics } = &responses[1] else { panic!("expected diagnostics") };
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Buckets must be private.\nacl 'public-read' is not allowed");

    assert_eq!(responses[2], Response::Ok);
    assert_eq!(responses[3], Response::Analyze { diagnostics: vec![] });
}

#[tokio::test]
async fn requests_round_trip_as_tagged_json() {
    let request: Request = serde_json::from_value(json!({
        "type": "Analyze",
        "resource": {
            "type": "aws:s3:Bucket",
            "properties": { "acl": secret(json!("public-read")) },
            "urn": test_urn("b"),
            "name": "b",
            "options": { "protect": true, "deleteBeforeReplaceDefined": true, "deleteBeforeReplace": false },
        },
    }))
    .unwrap();

    let response = pack().handle(request).await;

    let Response::Analyze { diagnostics } = response else { panic!("expected diagnostics") };
    assert_eq!(
        serde_json::to_value(&diagnostics[0]).unwrap(),
        json!({
            "policyName": "no-public",
            "policyPackName": "acme-policies",
            "policyPackVersion": DEFAULT_PACK_VERSION,
            "description": "Buckets must be private.",
            "message": "Buckets must be private.\nacl 'public-read' is not allowed",
            "enforcementLevel": "advisory",
            "urn": test_urn("b"),
        })
    );
}
