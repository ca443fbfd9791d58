// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::time::Duration;

use pp_core::WireMap;

/// Organization used when the backend does not report one.
pub const DEFAULT_ORGANIZATION: &str = "organization";

/// Details of the update the pack is running under.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    pub project: String,
    pub stack: String,
    pub organization: String,
    /// True during preview.
    pub dry_run: bool,
    /// Stack configuration, keyed `namespace:key`.
    pub config: WireMap,
}

/// Read runtime settings from `PULUMI_*` variables.
///
/// `None` unless project, stack and dry-run are all set.
pub fn runtime_settings() -> Option<RuntimeSettings> {
    let project = std::env::var("PULUMI_PROJECT").ok()?;
    let stack = std::env::var("PULUMI_STACK").ok()?;
    let dry_run = std::env::var("PULUMI_DRY_RUN").ok()? == "true";
    let organization =
        std::env::var("PULUMI_ORGANIZATION").unwrap_or_else(|_| DEFAULT_ORGANIZATION.to_string());
    Some(RuntimeSettings { project, stack, organization, dry_run, config: stack_config() })
}

/// Stack configuration from `PULUMI_CONFIG` (a JSON object). Empty when unset
/// or malformed.
pub fn stack_config() -> WireMap {
    let Ok(raw) = std::env::var("PULUMI_CONFIG") else {
        return WireMap::new();
    };
    match serde_json::from_str::<WireMap>(&raw) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed PULUMI_CONFIG");
            WireMap::new()
        }
    }
}

/// Bound on writing one response frame.
pub fn ipc_timeout() -> Duration {
    std::env::var("PULUMI_POLICY_IPC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
