// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Policy definitions and the callback traits they run.

use std::sync::Arc;

use async_trait::async_trait;
use pp_core::{EnforcementLevel, PropertyMap, UnknownValueError, WriteError};
use pp_wire::PolicyConfigSchema;
use thiserror::Error;

use crate::args::{RemediationArgs, ResourceValidationArgs, StackValidationArgs};
use crate::report::ReportViolation;

/// Errors returned by policy callbacks
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A callback read a value that is not known during preview.
    #[error(transparent)]
    UnknownValue(#[from] UnknownValueError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("invalid policy config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("{0}")]
    Failed(String),
}

impl PolicyError {
    pub fn failed(message: impl Into<String>) -> Self {
        PolicyError::Failed(message.into())
    }
}

#[async_trait]
pub trait ResourceValidation: Send + Sync {
    async fn validate(
        &self,
        args: &ResourceValidationArgs<'_>,
        report: &ReportViolation<'_>,
    ) -> Result<(), PolicyError>;
}

#[async_trait]
pub trait StackValidation: Send + Sync {
    async fn validate(
        &self,
        args: &StackValidationArgs<'_>,
        report: &ReportViolation<'_>,
    ) -> Result<(), PolicyError>;
}

#[async_trait]
pub trait ResourceRemediation: Send + Sync {
    /// Return replacement properties, or `None` to leave the resource as is.
    async fn remediate(
        &self,
        args: &mut RemediationArgs<'_>,
    ) -> Result<Option<PropertyMap>, PolicyError>;
}

// ── Closure adapters ────────────────────────────────────────────────────

struct FnResourceValidation<F>(F);

#[async_trait]
impl<F> ResourceValidation for FnResourceValidation<F>
where
    F: Fn(&ResourceValidationArgs<'_>, &ReportViolation<'_>) -> Result<(), PolicyError> + Send + Sync,
{
    async fn validate(
        &self,
        args: &ResourceValidationArgs<'_>,
        report: &ReportViolation<'_>,
    ) -> Result<(), PolicyError> {
        (self.0)(args, report)
    }
}

/// Resource validation from a synchronous closure.
pub fn validate_resource<F>(f: F) -> Arc<dyn ResourceValidation>
where
    F: Fn(&ResourceValidationArgs<'_>, &ReportViolation<'_>) -> Result<(), PolicyError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnResourceValidation(f))
}

/// Resource validation that only runs for resources of one type.
pub fn validate_resource_of_type<F>(resource_type: impl Into<String>, f: F) -> Arc<dyn ResourceValidation>
where
    F: Fn(&ResourceValidationArgs<'_>, &ReportViolation<'_>) -> Result<(), PolicyError>
        + Send
        + Sync
        + 'static,
{
    let resource_type = resource_type.into();
    validate_resource(move |args: &ResourceValidationArgs<'_>, report: &ReportViolation<'_>| {
        if args.resource.is_type(&resource_type) {
            f(args, report)
        } else {
            Ok(())
        }
    })
}

struct FnStackValidation<F>(F);

#[async_trait]
impl<F> StackValidation for FnStackValidation<F>
where
    F: Fn(&StackValidationArgs<'_>, &ReportViolation<'_>) -> Result<(), PolicyError> + Send + Sync,
{
    async fn validate(
        &self,
        args: &StackValidationArgs<'_>,
        report: &ReportViolation<'_>,
    ) -> Result<(), PolicyError> {
        (self.0)(args, report)
    }
}

/// Stack validation from a synchronous closure.
pub fn validate_stack<F>(f: F) -> Arc<dyn StackValidation>
where
    F: Fn(&StackValidationArgs<'_>, &ReportViolation<'_>) -> Result<(), PolicyError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnStackValidation(f))
}

struct FnRemediation<F>(F);

#[async_trait]
impl<F> ResourceRemediation for FnRemediation<F>
where
    F: Fn(&mut RemediationArgs<'_>) -> Result<Option<PropertyMap>, PolicyError> + Send + Sync,
{
    async fn remediate(
        &self,
        args: &mut RemediationArgs<'_>,
    ) -> Result<Option<PropertyMap>, PolicyError> {
        (self.0)(args)
    }
}

/// Remediation from a synchronous closure.
pub fn remediate_resource<F>(f: F) -> Arc<dyn ResourceRemediation>
where
    F: Fn(&mut RemediationArgs<'_>) -> Result<Option<PropertyMap>, PolicyError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnRemediation(f))
}

// ── Policies ────────────────────────────────────────────────────────────

/// Policy run against each resource individually.
pub struct ResourceValidationPolicy {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) enforcement_level: Option<EnforcementLevel>,
    pub(crate) config_schema: Option<PolicyConfigSchema>,
    pub(crate) validations: Vec<Arc<dyn ResourceValidation>>,
    pub(crate) remediation: Option<Arc<dyn ResourceRemediation>>,
}

impl ResourceValidationPolicy {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            enforcement_level: None,
            config_schema: None,
            validations: Vec::new(),
            remediation: None,
        }
    }

    pp_core::optional_setters! {
        enforcement_level: EnforcementLevel,
        config_schema: PolicyConfigSchema,
    }

    /// Add a validation. All validations of the policy run together.
    pub fn validation(mut self, validation: Arc<dyn ResourceValidation>) -> Self {
        self.validations.push(validation);
        self
    }

    pub fn remediation(mut self, remediation: Arc<dyn ResourceRemediation>) -> Self {
        self.remediation = Some(remediation);
        self
    }
}

/// Policy run once against every resource in the stack.
pub struct StackValidationPolicy {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) enforcement_level: Option<EnforcementLevel>,
    pub(crate) config_schema: Option<PolicyConfigSchema>,
    pub(crate) validation: Arc<dyn StackValidation>,
}

impl StackValidationPolicy {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        validation: Arc<dyn StackValidation>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            enforcement_level: None,
            config_schema: None,
            validation,
        }
    }

    pp_core::optional_setters! {
        enforcement_level: EnforcementLevel,
        config_schema: PolicyConfigSchema,
    }
}

/// Any policy a pack can hold.
pub enum Policy {
    Resource(ResourceValidationPolicy),
    Stack(StackValidationPolicy),
}

impl Policy {
    pub fn name(&self) -> &str {
        match self {
            Policy::Resource(p) => &p.name,
            Policy::Stack(p) => &p.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Policy::Resource(p) => &p.description,
            Policy::Stack(p) => &p.description,
        }
    }

    /// The level the policy itself asks for, before pack defaults or config.
    pub fn enforcement_level(&self) -> Option<EnforcementLevel> {
        match self {
            Policy::Resource(p) => p.enforcement_level,
            Policy::Stack(p) => p.enforcement_level,
        }
    }

    pub fn config_schema(&self) -> Option<&PolicyConfigSchema> {
        match self {
            Policy::Resource(p) => p.config_schema.as_ref(),
            Policy::Stack(p) => p.config_schema.as_ref(),
        }
    }
}

impl From<ResourceValidationPolicy> for Policy {
    fn from(policy: ResourceValidationPolicy) -> Self {
        Policy::Resource(policy)
    }
}

impl From<StackValidationPolicy> for Policy {
    fn from(policy: StackValidationPolicy) -> Self {
        Policy::Stack(policy)
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
