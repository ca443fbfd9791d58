// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Arguments handed to policy callbacks.
//!
//! Reads go through [`UnknownCheckingProxy`], so touching a value that is not
//! known during preview fails with an error the analyzer downgrades to an
//! advisory diagnostic.

use pp_core::{
    PropertyMap, ProviderRecord, Resource, ResourceNode, ResourceOptions, SecretsProxy,
    UnknownCheckingProxy, WireMap,
};
use serde::de::DeserializeOwned;

use crate::env::RuntimeSettings;

/// Policy configuration and update context shared by every callback kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallContext<'a> {
    config: Option<&'a WireMap>,
    settings: Option<&'a RuntimeSettings>,
}

impl<'a> CallContext<'a> {
    pub fn new(config: Option<&'a WireMap>, settings: Option<&'a RuntimeSettings>) -> Self {
        Self { config, settings }
    }

    /// This policy's configured properties, if any were set.
    pub fn config(&self) -> Option<&'a WireMap> {
        self.config
    }

    /// Configured properties deserialized into `T`. `Ok(None)` when unset.
    pub fn config_as<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.config
            .map(|config| serde_json::from_value(serde_json::Value::Object(config.clone())))
            .transpose()
    }

    pub fn settings(&self) -> Option<&'a RuntimeSettings> {
        self.settings
    }
}

/// Read-only view of a decoded provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderView<'a> {
    provider: &'a ProviderRecord,
}

impl<'a> ProviderView<'a> {
    pub fn provider_type(&self) -> &'a str {
        &self.provider.provider_type
    }

    pub fn urn(&self) -> &'a str {
        &self.provider.urn
    }

    pub fn name(&self) -> &'a str {
        &self.provider.name
    }

    pub fn props(&self) -> UnknownCheckingProxy<'a> {
        UnknownCheckingProxy::new(&self.provider.properties)
    }
}

/// Read-only view of a decoded resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceView<'a> {
    resource: &'a Resource,
}

impl<'a> ResourceView<'a> {
    pub fn new(resource: &'a Resource) -> Self {
        Self { resource }
    }

    pub fn resource_type(&self) -> &'a str {
        &self.resource.resource_type
    }

    pub fn urn(&self) -> &'a str {
        &self.resource.urn
    }

    pub fn name(&self) -> &'a str {
        &self.resource.name
    }

    pub fn opts(&self) -> &'a ResourceOptions {
        &self.resource.options
    }

    pub fn props(&self) -> UnknownCheckingProxy<'a> {
        UnknownCheckingProxy::new(&self.resource.properties)
    }

    pub fn provider(&self) -> Option<ProviderView<'a>> {
        self.resource.provider.as_ref().map(|provider| ProviderView { provider })
    }

    /// Whether this resource is of the given type token.
    pub fn is_type(&self, resource_type: &str) -> bool {
        self.resource.resource_type == resource_type
    }
}

/// Arguments of a resource validation.
#[derive(Debug, Clone, Copy)]
pub struct ResourceValidationArgs<'a> {
    pub resource: ResourceView<'a>,
    pub context: CallContext<'a>,
}

/// A resource within a stack, able to follow its links.
#[derive(Debug, Clone, Copy)]
pub struct StackResource<'a> {
    node: ResourceNode<'a>,
}

impl<'a> StackResource<'a> {
    pub(crate) fn new(node: ResourceNode<'a>) -> Self {
        Self { node }
    }

    pub fn resource(&self) -> ResourceView<'a> {
        ResourceView::new(self.node.resource())
    }

    pub fn parent(&self) -> Option<StackResource<'a>> {
        self.node.parent().map(StackResource::new)
    }

    pub fn dependencies(&self) -> Vec<StackResource<'a>> {
        self.node.dependencies().map(StackResource::new).collect()
    }

    /// Resources the named property depends on.
    pub fn property_dependencies(&self, property: &str) -> Vec<StackResource<'a>> {
        self.node.property_dependencies(property).into_iter().map(StackResource::new).collect()
    }

    pub fn property_dependency_names(&self) -> Vec<&'a str> {
        self.node.property_dependency_names().collect()
    }
}

/// Arguments of a stack validation.
#[derive(Debug, Clone)]
pub struct StackValidationArgs<'a> {
    pub resources: Vec<StackResource<'a>>,
    pub context: CallContext<'a>,
}

impl<'a> StackValidationArgs<'a> {
    pub fn by_urn(&self, urn: &str) -> Option<StackResource<'a>> {
        self.resources.iter().find(|r| r.resource().urn() == urn).copied()
    }
}

/// Arguments of a remediation.
///
/// Owns a copy of the resource decoded with secret markers kept, so writes
/// through [`RemediationArgs::props_mut`] preserve secrecy.
#[derive(Debug)]
pub struct RemediationArgs<'a> {
    resource: Resource,
    pub context: CallContext<'a>,
}

impl<'a> RemediationArgs<'a> {
    pub(crate) fn new(resource: Resource, context: CallContext<'a>) -> Self {
        Self { resource, context }
    }

    pub fn resource_type(&self) -> &str {
        &self.resource.resource_type
    }

    pub fn urn(&self) -> &str {
        &self.resource.urn
    }

    pub fn name(&self) -> &str {
        &self.resource.name
    }

    pub fn opts(&self) -> &ResourceOptions {
        &self.resource.options
    }

    pub fn provider(&self) -> Option<ProviderView<'_>> {
        self.resource.provider.as_ref().map(|provider| ProviderView { provider })
    }

    /// Unknown-checked reads of the current properties.
    pub fn props(&self) -> UnknownCheckingProxy<'_> {
        UnknownCheckingProxy::new(&self.resource.properties)
    }

    /// Secret-preserving writes to the current properties.
    pub fn props_mut(&mut self) -> SecretsProxy<'_> {
        SecretsProxy::new(&mut self.resource.properties)
    }

    /// Move the (possibly edited) properties out, leaving an empty map.
    pub fn take_props(&mut self) -> PropertyMap {
        std::mem::take(&mut self.resource.properties)
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
