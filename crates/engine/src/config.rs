// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-policy configuration set by the engine host.

use std::collections::HashMap;

use indexmap::IndexMap;
use pp_core::{EnforcementLevel, WireMap};
use pp_wire::PolicyConfig;

/// Configuration from the most recent `Configure` call.
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    properties: HashMap<String, WireMap>,
    levels: HashMap<String, EnforcementLevel>,
}

impl ConfigState {
    /// Replace all configuration. Policies missing from `config` fall back to
    /// their defaults.
    pub fn from_request(config: IndexMap<String, PolicyConfig>) -> Self {
        let mut state = ConfigState::default();
        for (policy, value) in config {
            if let Some(level) = value.enforcement_level {
                state.levels.insert(policy.clone(), level);
            }
            state.properties.insert(policy, value.properties);
        }
        state
    }

    /// Configured level override for a policy.
    pub fn level_for(&self, policy: &str) -> Option<EnforcementLevel> {
        self.levels.get(policy).copied()
    }

    /// Per-call copy of a policy's configured properties. `None` when unset or
    /// empty.
    pub fn properties_for(&self, policy: &str) -> Option<WireMap> {
        self.properties.get(policy).filter(|props| !props.is_empty()).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.levels.is_empty()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
