// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource graph assembly for stack validation.
//!
//! Entries reference each other by URN. Assembly runs in two passes: decode
//! and index every entry, then resolve links. URNs that name no entry in the
//! request are dropped, so links never dangle.

use std::collections::HashMap;

use indexmap::IndexMap;
use thiserror::Error;

use crate::codec::{CodecError, SecretMode};
use crate::resource::{Resource, ResourceEntry};

/// Handle of a resource within one [`ResourceGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(usize);

impl ResourceId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("failed to decode properties of {urn}: {source}")]
    Decode {
        urn: String,
        #[source]
        source: CodecError,
    },
    #[error("duplicate resource urn: {0}")]
    DuplicateUrn(String),
}

/// A decoded resource and its resolved links.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub resource: Resource,
    pub parent: Option<ResourceId>,
    pub dependencies: Vec<ResourceId>,
    pub property_dependencies: IndexMap<String, Vec<ResourceId>>,
}

/// Resources of one stack request, in request order.
#[derive(Debug, Clone, Default)]
pub struct ResourceGraph {
    records: Vec<ResourceRecord>,
    by_urn: HashMap<String, ResourceId>,
}

impl ResourceGraph {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: ResourceId) -> Option<ResourceNode<'_>> {
        self.records.get(id.0).map(|record| ResourceNode { graph: self, id, record })
    }

    pub fn by_urn(&self, urn: &str) -> Option<ResourceNode<'_>> {
        self.by_urn.get(urn).and_then(|id| self.get(*id))
    }

    pub fn iter(&self) -> impl Iterator<Item = ResourceNode<'_>> {
        self.records
            .iter()
            .enumerate()
            .map(move |(i, record)| ResourceNode { graph: self, id: ResourceId(i), record })
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    fn resolve(&self, urn: &str) -> Option<ResourceId> {
        let id = self.by_urn.get(urn).copied();
        if id.is_none() {
            tracing::debug!(urn, "dropping link to resource outside the request");
        }
        id
    }
}

/// Borrowed view of one resource that can follow its links.
#[derive(Debug, Clone, Copy)]
pub struct ResourceNode<'g> {
    graph: &'g ResourceGraph,
    id: ResourceId,
    record: &'g ResourceRecord,
}

impl<'g> ResourceNode<'g> {
    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn resource(&self) -> &'g Resource {
        &self.record.resource
    }

    pub fn urn(&self) -> &'g str {
        &self.record.resource.urn
    }

    pub fn parent(&self) -> Option<ResourceNode<'g>> {
        self.record.parent.and_then(|id| self.graph.get(id))
    }

    pub fn dependencies(&self) -> impl Iterator<Item = ResourceNode<'g>> + 'g {
        let graph = self.graph;
        self.record.dependencies.iter().filter_map(move |id| graph.get(*id))
    }

    /// Resources the named property depends on. Empty for unknown names.
    pub fn property_dependencies(&self, property: &str) -> Vec<ResourceNode<'g>> {
        let graph = self.graph;
        self.record
            .property_dependencies
            .get(property)
            .map(|ids| ids.iter().filter_map(|id| graph.get(*id)).collect())
            .unwrap_or_default()
    }

    pub fn property_dependency_names(&self) -> impl Iterator<Item = &'g str> + 'g {
        self.record.property_dependencies.keys().map(String::as_str)
    }
}

/// Assemble request entries into a linked graph.
///
/// Fails on the first entry whose properties do not decode, or when two
/// entries share a URN.
pub fn assemble(entries: &[ResourceEntry], mode: SecretMode) -> Result<ResourceGraph, GraphError> {
    let mut graph = ResourceGraph {
        records: Vec::with_capacity(entries.len()),
        by_urn: HashMap::with_capacity(entries.len()),
    };

    for (i, entry) in entries.iter().enumerate() {
        let urn = &entry.resource.urn;
        let resource = entry
            .resource
            .decode(mode)
            .map_err(|source| GraphError::Decode { urn: urn.clone(), source })?;
        if graph.by_urn.insert(urn.clone(), ResourceId(i)).is_some() {
            return Err(GraphError::DuplicateUrn(urn.clone()));
        }
        graph.records.push(ResourceRecord {
            resource,
            parent: None,
            dependencies: Vec::new(),
            property_dependencies: IndexMap::new(),
        });
    }

    let links: Vec<_> = entries
        .iter()
        .map(|entry| {
            let parent = entry.parent.as_deref().and_then(|urn| graph.resolve(urn));
            let dependencies =
                entry.dependencies.iter().filter_map(|urn| graph.resolve(urn)).collect::<Vec<_>>();
            let property_dependencies = entry
                .property_dependencies
                .iter()
                .map(|(name, urns)| {
                    (name.clone(), urns.iter().filter_map(|urn| graph.resolve(urn)).collect())
                })
                .collect::<IndexMap<_, _>>();
            (parent, dependencies, property_dependencies)
        })
        .collect();

    for (record, (parent, dependencies, property_dependencies)) in graph.records.iter_mut().zip(links) {
        record.parent = parent;
        record.dependencies = dependencies;
        record.property_dependencies = property_dependencies;
    }

    Ok(graph)
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
