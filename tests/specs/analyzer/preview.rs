// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource validation specs
//!
//! Verify resource policies report violations, and that reading a value that
//! is unknown during preview downgrades the policy to an advisory note.

use std::sync::Arc;

use async_trait::async_trait;
use similar_asserts::assert_eq;

use crate::prelude::*;

/// Validation implemented as a type, awaiting between reads.
struct RequiredTags {
    tags: Vec<&'static str>,
}

#[async_trait]
impl ResourceValidation for RequiredTags {
    async fn validate(
        &self,
        args: &ResourceValidationArgs<'_>,
        report: &ReportViolation<'_>,
    ) -> Result<(), PolicyError> {
        let Some(tags) = args.resource.props().get("tags")? else {
            report.report("no tags", Some(args.resource.urn()));
            return Ok(());
        };
        for tag in &self.tags {
            tokio::task::yield_now().await;
            if tags.get(tag)?.is_none() {
                report.report(format!("missing tag '{tag}'"), Some(args.resource.urn()));
            }
        }
        Ok(())
    }
}

fn required_tags() -> ResourceValidationPolicy {
    ResourceValidationPolicy::new("required-tags", "Resources must be tagged.")
        .enforcement_level(EnforcementLevel::Mandatory)
        .validation(Arc::new(RequiredTags { tags: vec!["owner", "team"] }))
}

#[tokio::test]
async fn trait_validations_report_each_violation() {
    let analyzer = analyzer_for(required_tags());
    let request = resource_request("web", "aws:s3:Bucket", json!({ "tags": { "owner": "me" } }));

    let diagnostics = analyzer.analyze(request).await.unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0],
        AnalyzeDiagnostic {
            policy_name: "required-tags".into(),
            policy_pack_name: "acme-policies".into(),
            policy_pack_version: DEFAULT_PACK_VERSION.into(),
            description: "Resources must be tagged.".into(),
            message: "Resources must be tagged.\nmissing tag 'team'".into(),
            enforcement_level: EnforcementLevel::Mandatory,
            urn: test_urn("web"),
        }
    );
}

#[tokio::test]
async fn unknown_tags_downgrade_to_advisory() {
    let analyzer = analyzer_for(required_tags());
    let request = resource_request(
        "web",
        "aws:s3:Bucket",
        json!({ "tags": { "owner": "me", "team": unknown(UnknownKind::String) } }),
    );

    let diagnostics = analyzer.analyze(request).await.unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].enforcement_level, EnforcementLevel::Advisory);
    assert_eq!(diagnostics[0].urn, "");
    assert_eq!(
        diagnostics[0].message,
        "can't run policy 'required-tags' during preview: string value at .tags.team can't be known during preview"
    );
}

#[tokio::test]
async fn typed_validations_ignore_other_types() {
    let policy = ResourceValidationPolicy::new("no-public-buckets", "Buckets must be private.")
        .validation(validate_resource_of_type("aws:s3:Bucket", |args, report| {
            if args.resource.props().get("acl")?.and_then(|acl| acl.as_str()) == Some("public-read") {
                report.report("", Some(args.resource.urn()));
            }
            Ok(())
        }));
    let analyzer = analyzer_for(policy);
    let props = json!({ "acl": "public-read" });

    let bucket = analyzer.analyze(resource_request("b", "aws:s3:Bucket", props.clone())).await.unwrap();
    let other = analyzer.analyze(resource_request("o", "aws:s3:BucketObject", props)).await.unwrap();

    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket[0].message, "Buckets must be private.");
    assert!(other.is_empty());
}

#[tokio::test]
async fn provider_properties_are_visible() {
    let policy = ResourceValidationPolicy::new("region", "Use us-west-2.").validation(validate_resource(
        |args, report| {
            let region = match args.resource.provider() {
                Some(provider) => provider.props().get("region")?.and_then(|r| r.as_str()),
                None => None,
            };
            if region != Some("us-west-2") {
                report.report(format!("region is {region:?}"), None);
            }
            Ok(())
        },
    ));
    let analyzer = analyzer_for(policy);
    let mut request = resource_request("b", "aws:s3:Bucket", json!({}));
    request.provider = Some(pp_wire::AnalyzerProviderResource {
        provider_type: "pulumi:providers:aws".into(),
        properties: wire_map(json!({ "region": "eu-west-1" })),
        urn: test_urn("aws"),
        name: "aws".into(),
    });

    let diagnostics = analyzer.analyze(request).await.unwrap();
    assert_eq!(diagnostics[0].message, "Use us-west-2.\nregion is Some(\"eu-west-1\")");
}
