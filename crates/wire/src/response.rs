// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use pp_core::{EnforcementLevel, WireMap};
use serde::{Deserialize, Serialize};

use super::AnalyzerInfo;

/// Response from a policy pack to the engine host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Response {
    /// Generic success
    Ok,

    /// Diagnostics from `Analyze` or `AnalyzeStack`
    Analyze { diagnostics: Vec<AnalyzeDiagnostic> },

    /// Property rewrites from `Remediate`
    Remediate { remediations: Vec<Remediation> },

    /// Pack metadata
    AnalyzerInfo { info: AnalyzerInfo },

    /// Plugin version
    PluginInfo { version: String },

    /// Error response
    Error { message: String },
}

/// A single policy violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeDiagnostic {
    pub policy_name: String,
    pub policy_pack_name: String,
    pub policy_pack_version: String,
    pub description: String,
    pub message: String,
    pub enforcement_level: EnforcementLevel,
    /// Empty when the violation is not tied to a resource.
    #[serde(default)]
    pub urn: String,
}

/// Outcome of one remediation policy for one resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Remediation {
    pub policy_name: String,
    pub policy_pack_name: String,
    pub policy_pack_version: String,
    pub description: String,
    pub urn: String,
    /// Replacement properties, secrets re-encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<WireMap>,
    /// Why the remediation could not run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
