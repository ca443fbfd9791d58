// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use serial_test::serial;

const VARS: [&str; 5] =
    ["PULUMI_PROJECT", "PULUMI_STACK", "PULUMI_DRY_RUN", "PULUMI_ORGANIZATION", "PULUMI_CONFIG"];

fn with_env(vars: &[(&str, &str)], f: impl FnOnce()) {
    for var in VARS {
        std::env::remove_var(var);
    }
    for (k, v) in vars {
        std::env::set_var(k, v);
    }
    f();
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn settings_need_project_stack_and_dry_run() {
    with_env(&[("PULUMI_PROJECT", "proj"), ("PULUMI_STACK", "dev")], || {
        assert!(runtime_settings().is_none());
    });
}

#[test]
#[serial]
fn settings_default_organization() {
    with_env(&[("PULUMI_PROJECT", "proj"), ("PULUMI_STACK", "dev"), ("PULUMI_DRY_RUN", "true")], || {
        let settings = runtime_settings().unwrap();
        assert_eq!(settings.project, "proj");
        assert_eq!(settings.stack, "dev");
        assert!(settings.dry_run);
        assert_eq!(settings.organization, DEFAULT_ORGANIZATION);
        assert!(settings.config.is_empty());
    });
}

#[test]
#[serial]
fn dry_run_is_exactly_true() {
    for (value, expected) in [("true", true), ("TRUE", false), ("false", false), ("", false)] {
        with_env(&[("PULUMI_PROJECT", "p"), ("PULUMI_STACK", "s"), ("PULUMI_DRY_RUN", value)], || {
            assert_eq!(runtime_settings().unwrap().dry_run, expected, "PULUMI_DRY_RUN={value:?}");
        });
    }
}

#[test]
#[serial]
fn settings_read_organization_and_config() {
    with_env(
        &[
            ("PULUMI_PROJECT", "p"),
            ("PULUMI_STACK", "s"),
            ("PULUMI_DRY_RUN", "false"),
            ("PULUMI_ORGANIZATION", "acme"),
            ("PULUMI_CONFIG", r#"{"aws:region":"us-west-2"}"#),
        ],
        || {
            let settings = runtime_settings().unwrap();
            assert_eq!(settings.organization, "acme");
            assert_eq!(settings.config["aws:region"], json!("us-west-2"));
        },
    );
}

#[test]
#[serial]
fn malformed_config_is_ignored() {
    with_env(&[("PULUMI_CONFIG", "not json")], || {
        assert!(stack_config().is_empty());
    });
}

#[test]
#[serial]
fn ipc_timeout_reads_millis_with_default() {
    std::env::remove_var("PULUMI_POLICY_IPC_TIMEOUT_MS");
    assert_eq!(ipc_timeout(), Duration::from_secs(5));
    std::env::set_var("PULUMI_POLICY_IPC_TIMEOUT_MS", "250");
    assert_eq!(ipc_timeout(), Duration::from_millis(250));
    std::env::set_var("PULUMI_POLICY_IPC_TIMEOUT_MS", "soon");
    assert_eq!(ipc_timeout(), Duration::from_secs(5));
    std::env::remove_var("PULUMI_POLICY_IPC_TIMEOUT_MS");
}
