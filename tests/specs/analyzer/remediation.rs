// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remediation specs
//!
//! Verify remediations edit properties without leaking secrets.

use similar_asserts::assert_eq;

use crate::prelude::*;

fn private_acl() -> ResourceValidationPolicy {
    ResourceValidationPolicy::new("private-acl", "Buckets must be private.")
        .enforcement_level(EnforcementLevel::Remediate)
        .remediation(remediate_resource(|args| {
            if args.props().get("acl")?.and_then(|acl| acl.as_str()) == Some("private") {
                return Ok(None);
            }
            args.props_mut().set("acl", "private")?;
            Ok(Some(args.take_props()))
        }))
}

#[tokio::test]
async fn remediation_rewrites_properties_and_keeps_secrets() {
    let analyzer = analyzer_for(private_acl());
    let request = resource_request(
        "b",
        "aws:s3:Bucket",
        json!({ "acl": secret(json!("public-read")), "website": { "index": file_asset("index.html") } }),
    );

    let remediations = analyzer.remediate(request).await.unwrap();

    assert_eq!(
        remediations,
        vec![Remediation {
            policy_name: "private-acl".into(),
            policy_pack_name: "acme-policies".into(),
            policy_pack_version: DEFAULT_PACK_VERSION.into(),
            description: "Buckets must be private.".into(),
            urn: test_urn("b"),
            properties: Some(wire_map(json!({
                "acl": secret(json!("private")),
                "website": { "index": file_asset("index.html") },
            }))),
            diagnostic: None,
        }]
    );
}

#[tokio::test]
async fn compliant_resources_are_left_alone() {
    let analyzer = analyzer_for(private_acl());
    let request = resource_request("b", "aws:s3:Bucket", json!({ "acl": "private" }));

    let remediations = analyzer.remediate(request).await.unwrap();
    assert_eq!(remediations.len(), 1);
    assert_eq!(remediations[0].properties, None);
}

#[tokio::test]
async fn configure_switches_between_remediate_and_validate() {
    let policy = private_acl().validation(validate_resource(|args, report| {
        if args.resource.props().get("acl")?.and_then(|acl| acl.as_str()) != Some("private") {
            report.report("", Some(args.resource.urn()));
        }
        Ok(())
    }));
    let analyzer = analyzer_for(policy);
    let request = || resource_request("b", "aws:s3:Bucket", json!({ "acl": "public-read" }));

    // At remediate level the validation is replaced by the remediation
    assert!(analyzer.analyze(request()).await.unwrap().is_empty());
    assert_eq!(analyzer.remediate(request()).await.unwrap().len(), 1);

    analyzer.configure(
        [(
            "private-acl".to_string(),
            PolicyConfig { enforcement_level: Some(EnforcementLevel::Mandatory), ..Default::default() },
        )]
        .into_iter()
        .collect(),
    );

    assert!(analyzer.remediate(request()).await.unwrap().is_empty());
    let diagnostics = analyzer.analyze(request()).await.unwrap();
    assert_eq!(diagnostics[0].enforcement_level, EnforcementLevel::Mandatory);
}
