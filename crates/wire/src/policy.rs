// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Policy metadata exchanged with the engine host.

use indexmap::IndexMap;
use pp_core::{EnforcementLevel, WireMap};
use serde::{Deserialize, Serialize};

/// Configuration of one policy, as sent by `Configure` or advertised as the
/// pack's initial config.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement_level: Option<EnforcementLevel>,
    #[serde(default, skip_serializing_if = "WireMap::is_empty")]
    pub properties: WireMap,
}

/// JSON-schema fragment describing a policy's config properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PolicyConfigSchema {
    #[serde(default, skip_serializing_if = "WireMap::is_empty")]
    pub properties: WireMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl PolicyConfigSchema {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.required.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInfo {
    pub name: String,
    pub description: String,
    pub enforcement_level: EnforcementLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_schema: Option<PolicyConfigSchema>,
}

/// Metadata describing a policy pack and its policies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerInfo {
    pub name: String,
    pub version: String,
    pub supports_config: bool,
    pub policies: Vec<PolicyInfo>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub initial_config: IndexMap<String, PolicyConfig>,
}
