// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use indexmap::IndexMap;
use pp_core::WireMap;
use serde::{Deserialize, Serialize};

use super::PolicyConfig;

/// Request from the engine host to a policy pack
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    /// Validate a single resource
    Analyze { resource: AnalyzeRequest },

    /// Validate the full set of resources in a stack
    AnalyzeStack { resources: Vec<AnalyzerResource> },

    /// Compute property rewrites for a single resource
    Remediate { resource: AnalyzeRequest },

    /// Describe the pack and its policies
    GetAnalyzerInfo,

    /// Report the plugin version
    GetPluginInfo,

    /// Replace the per-policy configuration
    Configure {
        #[serde(rename = "policyConfig", default)]
        policy_config: IndexMap<String, PolicyConfig>,
    },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomTimeouts {
    #[serde(default)]
    pub create: f64,
    #[serde(default)]
    pub update: f64,
    #[serde(default)]
    pub delete: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerResourceOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub protect: bool,
    #[serde(default)]
    pub ignore_changes: Vec<String>,
    #[serde(default)]
    pub delete_before_replace: bool,
    /// Whether `delete_before_replace` was set by the program at all.
    #[serde(default)]
    pub delete_before_replace_defined: bool,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_timeouts: Option<CustomTimeouts>,
    #[serde(default)]
    pub additional_secret_outputs: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyzerProviderResource {
    #[serde(rename = "type")]
    pub provider_type: String,
    #[serde(default)]
    pub properties: WireMap,
    pub urn: String,
    pub name: String,
}

/// A resource to validate or remediate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeRequest {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub properties: WireMap,
    pub urn: String,
    pub name: String,
    #[serde(default)]
    pub options: AnalyzerResourceOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<AnalyzerProviderResource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyDependencies {
    #[serde(default)]
    pub urns: Vec<String>,
}

/// A resource as part of a stack, with links to other resources by URN.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerResource {
    #[serde(flatten)]
    pub resource: AnalyzeRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub property_dependencies: IndexMap<String, PropertyDependencies>,
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
