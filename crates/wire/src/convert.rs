// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conversions from request payloads into core resource inputs.

use pp_core::{CustomTimeouts, ProviderInput, ResourceEntry, ResourceInput, ResourceOptions};

use super::{AnalyzeRequest, AnalyzerProviderResource, AnalyzerResource, AnalyzerResourceOptions};

impl From<AnalyzerResourceOptions> for ResourceOptions {
    fn from(opts: AnalyzerResourceOptions) -> Self {
        let custom_timeouts = opts
            .custom_timeouts
            .map(|t| CustomTimeouts {
                create_seconds: t.create,
                update_seconds: t.update,
                delete_seconds: t.delete,
            })
            .unwrap_or_default();
        ResourceOptions {
            parent: opts.parent,
            protect: opts.protect,
            ignore_changes: opts.ignore_changes,
            delete_before_replace: opts
                .delete_before_replace_defined
                .then_some(opts.delete_before_replace),
            aliases: opts.aliases,
            custom_timeouts,
            additional_secret_outputs: opts.additional_secret_outputs,
        }
    }
}

impl From<AnalyzerProviderResource> for ProviderInput {
    fn from(provider: AnalyzerProviderResource) -> Self {
        ProviderInput {
            provider_type: provider.provider_type,
            properties: provider.properties,
            urn: provider.urn,
            name: provider.name,
        }
    }
}

impl From<AnalyzeRequest> for ResourceInput {
    fn from(req: AnalyzeRequest) -> Self {
        ResourceInput {
            resource_type: req.resource_type,
            properties: req.properties,
            urn: req.urn,
            name: req.name,
            options: req.options.into(),
            provider: req.provider.map(Into::into),
        }
    }
}

impl From<AnalyzerResource> for ResourceEntry {
    fn from(res: AnalyzerResource) -> Self {
        ResourceEntry {
            resource: res.resource.into(),
            parent: res.parent,
            dependencies: res.dependencies,
            property_dependencies: res
                .property_dependencies
                .into_iter()
                .map(|(name, deps)| (name, deps.urns))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
