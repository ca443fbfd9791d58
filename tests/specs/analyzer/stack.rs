// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stack validation specs
//!
//! Verify stack policies see the assembled resource graph.

use similar_asserts::assert_eq;

use crate::prelude::*;

#[test]
fn graph_links_resolve_and_dangling_links_drop() {
    let a = stack_entry("a", json!({}));
    let mut b = stack_entry("b", json!({}));
    b.parent = Some(test_urn("a"));
    let mut c = stack_entry("c", json!({}));
    c.dependencies = vec![test_urn("a"), "urn:does-not-exist".to_string()];

    let graph = assemble(&[a, b, c], SecretMode::Reveal).unwrap();

    let b = graph.by_urn(&test_urn("b")).unwrap();
    assert_eq!(b.parent().map(|p| p.urn()), Some(test_urn("a").as_str()));
    let c = graph.by_urn(&test_urn("c")).unwrap();
    let deps: Vec<_> = c.dependencies().map(|d| d.urn()).collect();
    assert_eq!(deps, vec![test_urn("a").as_str()]);
}

#[tokio::test]
async fn stack_policy_walks_property_dependencies() {
    let policy = StackValidationPolicy::new(
        "encrypted-sources",
        "Objects must come from encrypted buckets.",
        validate_stack(|args, report| {
            for resource in &args.resources {
                for source in resource.property_dependencies("bucket") {
                    let encrypted = source.resource().props().get("encrypted")?.and_then(|e| e.as_bool());
                    if encrypted != Some(true) {
                        report.report(
                            format!("'{}' is not encrypted", source.resource().name()),
                            Some(resource.resource().urn()),
                        );
                    }
                }
            }
            Ok(())
        }),
    );
    let analyzer = analyzer_for(policy);

    let bucket = stack_resource("bucket", json!({ "encrypted": secret(json!(false)) }));
    let mut object = stack_resource("object", json!({}));
    object.dependencies = vec![test_urn("bucket")];
    object
        .property_dependencies
        .insert("bucket".into(), PropertyDependencies { urns: vec![test_urn("bucket")] });

    let diagnostics = analyzer.analyze_stack(vec![bucket, object]).await.unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message,
        "Objects must come from encrypted buckets.\n'bucket' is not encrypted"
    );
    assert_eq!(diagnostics[0].urn, test_urn("object"));
}

#[tokio::test]
async fn duplicate_urns_are_rejected() {
    let analyzer = analyzer_for(StackValidationPolicy::new("any", "desc", validate_stack(|_, _| Ok(()))));

    let response = analyzer
        .handle(Request::AnalyzeStack {
            resources: vec![stack_resource("a", json!({})), stack_resource("a", json!({}))],
        })
        .await;

    assert!(matches!(response, Response::Error { ref message } if message.contains(&test_urn("a"))));
}
