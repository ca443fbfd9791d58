// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Policy packs: named, versioned sets of policies.

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use pp_core::{EnforcementLevel, WireMap};
use pp_wire::PolicyConfig;
use regex::Regex;
use thiserror::Error;

use crate::policy::Policy;

/// Version reported when the pack's own metadata does not set one.
pub const DEFAULT_PACK_VERSION: &str = "0.0.1";

/// Config property name reserved for per-policy enforcement levels.
pub const ENFORCEMENT_LEVEL_KEY: &str = "enforcementLevel";

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static PACK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.-]{1,100}$").expect("constant regex pattern is valid"));

/// Errors from assembling a policy pack
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackError {
    #[error(
        "invalid policy pack name '{0}': names may only contain alphanumerics, hyphens, underscores, or periods"
    )]
    InvalidPackName(String),
    #[error("a policy pack needs at least one policy")]
    NoPolicies,
    #[error("policy name must not be empty")]
    EmptyPolicyName,
    #[error("invalid policy name \"all\"; \"all\" is a reserved name")]
    ReservedPolicyName,
    #[error("duplicate policy name '{0}'")]
    DuplicatePolicyName(String),
    #[error("policy '{0}' is missing a description")]
    MissingDescription(String),
    #[error("policy '{0}' has neither a validation nor a remediation")]
    NoValidation(String),
    #[error("policy '{0}': enforcementLevel cannot be part of the config schema")]
    ReservedConfigProperty(String),
    #[error("initial config for '{policy}': {reason}")]
    InvalidInitialConfig { policy: String, reason: String },
}

/// Initial configuration of one policy: either just a level, or an object
/// holding an optional `enforcementLevel` plus config properties.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialConfig {
    Level(EnforcementLevel),
    Object(WireMap),
}

impl From<EnforcementLevel> for InitialConfig {
    fn from(level: EnforcementLevel) -> Self {
        InitialConfig::Level(level)
    }
}

impl From<WireMap> for InitialConfig {
    fn from(object: WireMap) -> Self {
        InitialConfig::Object(object)
    }
}

impl InitialConfig {
    /// Split into a level and the remaining properties.
    fn normalize(self, policy: &str) -> Result<PolicyConfig, PackError> {
        match self {
            InitialConfig::Level(level) => {
                Ok(PolicyConfig { enforcement_level: Some(level), properties: WireMap::new() })
            }
            InitialConfig::Object(mut properties) => {
                let enforcement_level = properties
                    .remove(ENFORCEMENT_LEVEL_KEY)
                    .map(serde_json::from_value::<EnforcementLevel>)
                    .transpose()
                    .map_err(|e| PackError::InvalidInitialConfig {
                        policy: policy.to_string(),
                        reason: e.to_string(),
                    })?;
                Ok(PolicyConfig { enforcement_level, properties })
            }
        }
    }
}

/// A validated set of policies.
pub struct PolicyPack {
    name: String,
    version: String,
    enforcement_level: EnforcementLevel,
    policies: Vec<Policy>,
    initial_config: IndexMap<String, PolicyConfig>,
}

impl std::fmt::Debug for PolicyPack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyPack")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("enforcement_level", &self.enforcement_level)
            .field("policies", &self.policies.iter().map(Policy::name).collect::<Vec<_>>())
            .finish()
    }
}

impl PolicyPack {
    pub fn new(name: impl Into<String>, policies: Vec<Policy>) -> Result<Self, PackError> {
        let name = name.into();
        if !PACK_NAME.is_match(&name) {
            return Err(PackError::InvalidPackName(name));
        }
        if policies.is_empty() {
            return Err(PackError::NoPolicies);
        }
        let mut seen = HashSet::new();
        for policy in &policies {
            check_policy(policy)?;
            if !seen.insert(policy.name()) {
                return Err(PackError::DuplicatePolicyName(policy.name().to_string()));
            }
        }
        Ok(Self {
            name,
            version: DEFAULT_PACK_VERSION.to_string(),
            enforcement_level: EnforcementLevel::Advisory,
            policies,
            initial_config: IndexMap::new(),
        })
    }

    /// Default level for policies that don't set their own.
    pub fn with_enforcement_level(mut self, level: EnforcementLevel) -> Self {
        self.enforcement_level = level;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Configuration advertised to the engine before any `Configure` call.
    pub fn with_initial_config<K, V>(
        mut self,
        config: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, PackError>
    where
        K: Into<String>,
        V: Into<InitialConfig>,
    {
        for (policy, value) in config {
            let policy = policy.into();
            let normalized = value.into().normalize(&policy)?;
            self.initial_config.insert(policy, normalized);
        }
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn enforcement_level(&self) -> EnforcementLevel {
        self.enforcement_level
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn initial_config(&self) -> &IndexMap<String, PolicyConfig> {
        &self.initial_config
    }
}

fn check_policy(policy: &Policy) -> Result<(), PackError> {
    let name = policy.name();
    if name.is_empty() {
        return Err(PackError::EmptyPolicyName);
    }
    if name == "all" {
        return Err(PackError::ReservedPolicyName);
    }
    if policy.description().is_empty() {
        return Err(PackError::MissingDescription(name.to_string()));
    }
    if let Policy::Resource(p) = policy {
        if p.validations.is_empty() && p.remediation.is_none() {
            return Err(PackError::NoValidation(name.to_string()));
        }
    }
    if let Some(schema) = policy.config_schema() {
        if schema.properties.contains_key(ENFORCEMENT_LEVEL_KEY)
            || schema.required.iter().any(|r| r == ENFORCEMENT_LEVEL_KEY)
        {
            return Err(PackError::ReservedConfigProperty(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "pack_tests.rs"]
mod tests;
