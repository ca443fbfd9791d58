// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Analyzer: runs a policy pack against incoming resources.

use futures_util::future::join_all;
use indexmap::IndexMap;
use parking_lot::RwLock;
use pp_core::{
    assemble, encode_properties, CodecError, EnforcementLevel, GraphError, ResourceEntry,
    ResourceInput, SecretMode, WireMap,
};
use pp_wire::{
    AnalyzeDiagnostic, AnalyzeRequest, AnalyzerInfo, AnalyzerResource, PolicyConfig, PolicyInfo,
    Remediation, Request, Response,
};
use thiserror::Error;

use crate::args::{
    CallContext, RemediationArgs, ResourceValidationArgs, ResourceView, StackResource,
    StackValidationArgs,
};
use crate::config::ConfigState;
use crate::env::{self, RuntimeSettings};
use crate::pack::PolicyPack;
use crate::policy::{Policy, PolicyError, ResourceValidationPolicy, StackValidationPolicy};
use crate::report::{PolicyStamp, ReportViolation};

/// Errors that abort an analyzer call
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to decode resource '{urn}': {source}")]
    Decode {
        urn: String,
        #[source]
        source: CodecError,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("policy '{policy}' failed: {source}")]
    Policy {
        policy: String,
        #[source]
        source: PolicyError,
    },
}

#[derive(Debug)]
enum SettingsSource {
    /// Read `PULUMI_*` variables on every call.
    Env,
    Fixed(Option<RuntimeSettings>),
}

/// Runs a [`PolicyPack`] on behalf of the engine host.
///
/// Configuration set by [`Analyzer::configure`] applies to every later call.
/// Calls may run concurrently; each decodes its own copy of the inputs.
#[derive(Debug)]
pub struct Analyzer {
    pack: PolicyPack,
    config: RwLock<ConfigState>,
    settings: SettingsSource,
}

impl Analyzer {
    pub fn new(pack: PolicyPack) -> Self {
        Self { pack, config: RwLock::new(ConfigState::default()), settings: SettingsSource::Env }
    }

    /// Use fixed runtime settings instead of reading the environment.
    pub fn with_settings(mut self, settings: Option<RuntimeSettings>) -> Self {
        self.settings = SettingsSource::Fixed(settings);
        self
    }

    pub fn pack(&self) -> &PolicyPack {
        &self.pack
    }

    fn runtime_settings(&self) -> Option<RuntimeSettings> {
        match &self.settings {
            SettingsSource::Env => env::runtime_settings(),
            SettingsSource::Fixed(settings) => settings.clone(),
        }
    }

    /// Configured level, then the policy's own, then the pack default.
    fn resolve_level(&self, name: &str, own: Option<EnforcementLevel>) -> EnforcementLevel {
        self.config.read().level_for(name).or(own).unwrap_or(self.pack.enforcement_level())
    }

    fn policy_config(&self, name: &str) -> Option<WireMap> {
        self.config.read().properties_for(name)
    }

    fn stamp<'a>(&'a self, name: &'a str, description: &'a str) -> PolicyStamp<'a> {
        PolicyStamp {
            policy_name: name,
            description,
            pack_name: self.pack.name(),
            pack_version: self.pack.version(),
        }
    }

    /// Validate one resource against every enabled resource policy.
    pub async fn analyze(
        &self,
        request: AnalyzeRequest,
    ) -> Result<Vec<AnalyzeDiagnostic>, AnalyzeError> {
        let input = ResourceInput::from(request);
        let settings = self.runtime_settings();
        let mut diagnostics = Vec::new();

        for policy in self.pack.policies() {
            let Policy::Resource(policy) = policy else { continue };
            let level = self.resolve_level(&policy.name, policy.enforcement_level);
            if level.is_disabled() || policy.validations.is_empty() {
                continue;
            }
            // Remediations run instead of validations at this level
            if level == EnforcementLevel::Remediate && policy.remediation.is_some() {
                continue;
            }
            tracing::debug!(policy = %policy.name, urn = %input.urn, "running resource policy");
            let found = self.run_resource_policy(policy, level, &input, settings.as_ref()).await?;
            diagnostics.extend(found);
        }
        Ok(diagnostics)
    }

    async fn run_resource_policy(
        &self,
        policy: &ResourceValidationPolicy,
        level: EnforcementLevel,
        input: &ResourceInput,
        settings: Option<&RuntimeSettings>,
    ) -> Result<Vec<AnalyzeDiagnostic>, AnalyzeError> {
        let resource = input
            .decode(SecretMode::Reveal)
            .map_err(|source| AnalyzeError::Decode { urn: input.urn.clone(), source })?;
        let config = self.policy_config(&policy.name);
        let args = ResourceValidationArgs {
            resource: ResourceView::new(&resource),
            context: CallContext::new(config.as_ref(), settings),
        };

        let stamp = self.stamp(&policy.name, &policy.description);
        let report = ReportViolation::new(stamp, level.for_validation());
        let results = join_all(policy.validations.iter().map(|v| v.validate(&args, &report))).await;
        settle(stamp, results, report)
    }

    /// Validate a whole stack against every enabled stack policy.
    pub async fn analyze_stack(
        &self,
        resources: Vec<AnalyzerResource>,
    ) -> Result<Vec<AnalyzeDiagnostic>, AnalyzeError> {
        let entries: Vec<ResourceEntry> = resources.into_iter().map(ResourceEntry::from).collect();
        let settings = self.runtime_settings();
        let mut diagnostics = Vec::new();

        for policy in self.pack.policies() {
            let Policy::Stack(policy) = policy else { continue };
            let level = self.resolve_level(&policy.name, policy.enforcement_level);
            if level.is_disabled() {
                continue;
            }
            tracing::debug!(policy = %policy.name, resources = entries.len(), "running stack policy");
            let found = self.run_stack_policy(policy, level, &entries, settings.as_ref()).await?;
            diagnostics.extend(found);
        }
        Ok(diagnostics)
    }

    async fn run_stack_policy(
        &self,
        policy: &StackValidationPolicy,
        level: EnforcementLevel,
        entries: &[ResourceEntry],
        settings: Option<&RuntimeSettings>,
    ) -> Result<Vec<AnalyzeDiagnostic>, AnalyzeError> {
        let graph = assemble(entries, SecretMode::Reveal)?;
        let config = self.policy_config(&policy.name);
        let args = StackValidationArgs {
            resources: graph.iter().map(StackResource::new).collect(),
            context: CallContext::new(config.as_ref(), settings),
        };

        let stamp = self.stamp(&policy.name, &policy.description);
        let report = ReportViolation::new(stamp, level.for_validation());
        let result = policy.validation.validate(&args, &report).await;
        settle(stamp, [result], report)
    }

    /// Run the remediations of every policy set to `remediate`.
    ///
    /// Remediations run in pack order, each seeing the properties left by the
    /// previous one.
    pub async fn remediate(&self, request: AnalyzeRequest) -> Result<Vec<Remediation>, AnalyzeError> {
        let mut input = ResourceInput::from(request);
        let settings = self.runtime_settings();
        let mut remediations = Vec::new();

        for policy in self.pack.policies() {
            let Policy::Resource(policy) = policy else { continue };
            let Some(remediation) = &policy.remediation else { continue };
            let level = self.resolve_level(&policy.name, policy.enforcement_level);
            if level != EnforcementLevel::Remediate {
                continue;
            }
            tracing::debug!(policy = %policy.name, urn = %input.urn, "running remediation");

            let resource = input
                .decode(SecretMode::Preserve)
                .map_err(|source| AnalyzeError::Decode { urn: input.urn.clone(), source })?;
            let config = self.policy_config(&policy.name);
            let mut args =
                RemediationArgs::new(resource, CallContext::new(config.as_ref(), settings.as_ref()));

            let mut entry = Remediation {
                policy_name: policy.name.clone(),
                policy_pack_name: self.pack.name().to_string(),
                policy_pack_version: self.pack.version().to_string(),
                description: policy.description.clone(),
                urn: input.urn.clone(),
                properties: None,
                diagnostic: None,
            };
            match remediation.remediate(&mut args).await {
                Ok(Some(properties)) => {
                    let encoded = encode_properties(&properties);
                    input.properties = encoded.clone();
                    entry.properties = Some(encoded);
                }
                Ok(None) => {}
                Err(PolicyError::UnknownValue(e)) => {
                    tracing::warn!(policy = %policy.name, error = %e, "remediation skipped during preview");
                    entry.diagnostic =
                        Some(format!("can't run policy '{}' during preview: {e}", policy.name));
                }
                Err(source) => {
                    return Err(AnalyzeError::Policy { policy: policy.name.clone(), source });
                }
            }
            remediations.push(entry);
        }
        Ok(remediations)
    }

    /// Pack metadata reported to the engine host.
    pub fn analyzer_info(&self) -> AnalyzerInfo {
        let policies = self
            .pack
            .policies()
            .iter()
            .map(|policy| PolicyInfo {
                name: policy.name().to_string(),
                description: policy.description().to_string(),
                enforcement_level: policy
                    .enforcement_level()
                    .unwrap_or(self.pack.enforcement_level()),
                config_schema: policy.config_schema().filter(|s| !s.is_empty()).cloned(),
            })
            .collect();
        AnalyzerInfo {
            name: self.pack.name().to_string(),
            version: self.pack.version().to_string(),
            supports_config: true,
            policies,
            initial_config: self.pack.initial_config().clone(),
        }
    }

    pub fn plugin_info(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Replace the policy configuration.
    pub fn configure(&self, config: IndexMap<String, PolicyConfig>) {
        tracing::info!(policies = config.len(), "configuring policies");
        *self.config.write() = ConfigState::from_request(config);
    }

    /// Dispatch a request envelope. Failures become [`Response::Error`].
    pub async fn handle(&self, request: Request) -> Response {
        let result = match request {
            Request::Analyze { resource } => {
                self.analyze(resource).await.map(|diagnostics| Response::Analyze { diagnostics })
            }
            Request::AnalyzeStack { resources } => self
                .analyze_stack(resources)
                .await
                .map(|diagnostics| Response::Analyze { diagnostics }),
            Request::Remediate { resource } => self
                .remediate(resource)
                .await
                .map(|remediations| Response::Remediate { remediations }),
            Request::GetAnalyzerInfo => Ok(Response::AnalyzerInfo { info: self.analyzer_info() }),
            Request::GetPluginInfo => Ok(Response::PluginInfo { version: self.plugin_info() }),
            Request::Configure { policy_config } => {
                self.configure(policy_config);
                Ok(Response::Ok)
            }
        };
        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "request failed");
            Response::Error { message: e.to_string() }
        })
    }
}

/// Merge reported violations with callback outcomes.
///
/// Violations reported before an unknown read are kept; the first unknown read
/// adds one advisory diagnostic. Any other error aborts the call.
fn settle(
    stamp: PolicyStamp<'_>,
    results: impl IntoIterator<Item = Result<(), PolicyError>>,
    report: ReportViolation<'_>,
) -> Result<Vec<AnalyzeDiagnostic>, AnalyzeError> {
    let mut unknown = None;
    for result in results {
        match result {
            Ok(()) => {}
            Err(PolicyError::UnknownValue(e)) => {
                unknown.get_or_insert(e);
            }
            Err(source) => {
                return Err(AnalyzeError::Policy { policy: stamp.policy_name.to_string(), source });
            }
        }
    }

    let mut diagnostics = report.into_diagnostics();
    if let Some(e) = unknown {
        tracing::warn!(policy = %stamp.policy_name, error = %e, "policy skipped during preview");
        diagnostics.push(stamp.preview_skipped(&e));
    }
    Ok(diagnostics)
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
