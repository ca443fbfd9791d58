// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource records as they arrive in a request and after decoding.

use indexmap::IndexMap;

use crate::codec::{decode_properties, CodecError, SecretMode};
use crate::value::{PropertyMap, WireMap};

/// Custom operation timeouts, in seconds. Zero when unset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CustomTimeouts {
    pub create_seconds: f64,
    pub update_seconds: f64,
    pub delete_seconds: f64,
}

/// Options a resource was registered with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceOptions {
    /// URN of the parent resource, if the program set one.
    pub parent: Option<String>,
    pub protect: bool,
    pub ignore_changes: Vec<String>,
    /// `None` when the program never set the option.
    pub delete_before_replace: Option<bool>,
    pub aliases: Vec<String>,
    pub custom_timeouts: CustomTimeouts,
    pub additional_secret_outputs: Vec<String>,
}

/// Provider of a resource, properties still in wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderInput {
    pub provider_type: String,
    pub properties: WireMap,
    pub urn: String,
    pub name: String,
}

/// Decoded provider of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRecord {
    pub provider_type: String,
    pub properties: PropertyMap,
    pub urn: String,
    pub name: String,
}

impl ProviderInput {
    pub fn decode(&self, mode: SecretMode) -> Result<ProviderRecord, CodecError> {
        Ok(ProviderRecord {
            provider_type: self.provider_type.clone(),
            properties: decode_properties(&self.properties, mode)?,
            urn: self.urn.clone(),
            name: self.name.clone(),
        })
    }
}

/// A resource as it arrives in a request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceInput {
    pub resource_type: String,
    pub properties: WireMap,
    pub urn: String,
    pub name: String,
    pub options: ResourceOptions,
    pub provider: Option<ProviderInput>,
}

/// A resource with its own and its provider's properties decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub resource_type: String,
    pub properties: PropertyMap,
    pub urn: String,
    pub name: String,
    pub options: ResourceOptions,
    pub provider: Option<ProviderRecord>,
}

impl ResourceInput {
    /// Decode properties and provider properties with the given secret mode.
    pub fn decode(&self, mode: SecretMode) -> Result<Resource, CodecError> {
        let provider = match &self.provider {
            Some(provider) => Some(provider.decode(mode)?),
            None => None,
        };
        Ok(Resource {
            resource_type: self.resource_type.clone(),
            properties: decode_properties(&self.properties, mode)?,
            urn: self.urn.clone(),
            name: self.name.clone(),
            options: self.options.clone(),
            provider,
        })
    }
}

/// Stack resource entry: the resource plus its links, by URN.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceEntry {
    pub resource: ResourceInput,
    pub parent: Option<String>,
    pub dependencies: Vec<String>,
    pub property_dependencies: IndexMap<String, Vec<String>>,
}

impl From<ResourceInput> for ResourceEntry {
    fn from(resource: ResourceInput) -> Self {
        Self {
            resource,
            parent: None,
            dependencies: Vec::new(),
            property_dependencies: IndexMap::new(),
        }
    }
}

crate::record_builder! {
    ResourceInputBuilder => ResourceInput {
        resource_type: String = "test:index:Resource".into(),
        urn: String = "urn:pulumi:stack::project::test:index:Resource::res".into(),
        name: String = "res".into(),
        properties: WireMap = WireMap::new(),
        options: ResourceOptions = ResourceOptions::default(),
        provider: Option<ProviderInput> = None,
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
