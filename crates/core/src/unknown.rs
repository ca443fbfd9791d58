// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unknown-checking read view over decoded properties.
//!
//! During preview some inputs are not computed yet and arrive as sentinel
//! strings. The view lets policies walk the tree freely and only fails when a
//! sentinel is actually read, reporting the full access path.
//!
//! Secret markers met on the way are revealed, so the view also works over
//! trees decoded with [`SecretMode::Preserve`](crate::codec::SecretMode).

use thiserror::Error;

use crate::sentinel::UnknownKind;
use crate::value::{Archive, Asset, PropertyMap, PropertyValue, RawTree};

/// A read hit a value that can't be known until the update runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} value at .{} can't be known during preview", .path.join("."))]
pub struct UnknownValueError {
    pub kind: UnknownKind,
    /// Access path from the view root; list indices are stringified.
    pub path: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Node<'a> {
    Root(&'a PropertyMap),
    Value(&'a PropertyValue),
}

/// Read-only view that fails on access to unknown values.
#[derive(Debug, Clone)]
pub struct UnknownCheckingProxy<'a> {
    node: Node<'a>,
    path: Vec<String>,
}

impl<'a> UnknownCheckingProxy<'a> {
    pub fn new(props: &'a PropertyMap) -> Self {
        Self { node: Node::Root(props), path: Vec::new() }
    }

    /// Backing tree of this node, skipping every unknown check.
    pub fn raw(&self) -> RawTree<'a> {
        match self.node {
            Node::Root(map) => RawTree::Map(map),
            Node::Value(value) => RawTree::Value(value),
        }
    }

    /// Path of this node from the view root.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Look up a map entry. `Ok(None)` when the key is absent or this node is
    /// not a map.
    pub fn get(&self, key: &str) -> Result<Option<UnknownCheckingProxy<'a>>, UnknownValueError> {
        match self.as_map().and_then(|m| m.get(key)) {
            Some(value) => self.child(key.to_string(), value).map(Some),
            None => Ok(None),
        }
    }

    /// Look up a list element. `Ok(None)` when out of range or this node is
    /// not a list.
    pub fn index(&self, i: usize) -> Result<Option<UnknownCheckingProxy<'a>>, UnknownValueError> {
        match self.as_list().and_then(|l| l.get(i)) {
            Some(value) => self.child(i.to_string(), value).map(Some),
            None => Ok(None),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.as_map().is_some_and(|m| m.contains_key(key))
    }

    /// Map keys; does not check values.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.as_map().into_iter().flat_map(|m| m.keys().map(String::as_str))
    }

    /// Entry count of a map or list, 0 for scalars. Does not check values.
    pub fn len(&self) -> usize {
        match (self.as_map(), self.as_list()) {
            (Some(m), _) => m.len(),
            (_, Some(l)) => l.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map entries; each value is checked as it is produced.
    pub fn entries(
        &self,
    ) -> impl Iterator<Item = Result<(&'a str, UnknownCheckingProxy<'a>), UnknownValueError>> + '_ {
        self.as_map()
            .into_iter()
            .flat_map(|m| m.iter())
            .map(|(k, v)| self.child(k.clone(), v).map(|child| (k.as_str(), child)))
    }

    /// List elements; each element is checked as it is produced.
    pub fn elements(
        &self,
    ) -> impl Iterator<Item = Result<UnknownCheckingProxy<'a>, UnknownValueError>> + '_ {
        self.as_list()
            .into_iter()
            .flat_map(|l| l.iter().enumerate())
            .map(|(i, v)| self.child(i.to_string(), v))
    }

    pub fn as_map(&self) -> Option<&'a PropertyMap> {
        match self.node {
            Node::Root(map) => Some(map),
            Node::Value(value) => value.as_object(),
        }
    }

    pub fn as_list(&self) -> Option<&'a [PropertyValue]> {
        self.value().and_then(PropertyValue::as_array).map(Vec::as_slice)
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.value().and_then(PropertyValue::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value().and_then(PropertyValue::as_bool)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value().and_then(PropertyValue::as_f64)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.value().and_then(PropertyValue::as_i64)
    }

    pub fn as_asset(&self) -> Option<&'a Asset> {
        self.value().and_then(PropertyValue::as_asset)
    }

    pub fn as_archive(&self) -> Option<&'a Archive> {
        self.value().and_then(PropertyValue::as_archive)
    }

    pub fn is_null(&self) -> bool {
        self.value().is_some_and(PropertyValue::is_null)
    }

    /// Backing value of a non-root node, secrets already revealed.
    ///
    /// Raw access skips the unknown checks below this node.
    pub fn value(&self) -> Option<&'a PropertyValue> {
        match self.node {
            Node::Root(_) => None,
            Node::Value(value) => Some(value),
        }
    }

    fn child(
        &self,
        segment: String,
        raw: &'a PropertyValue,
    ) -> Result<UnknownCheckingProxy<'a>, UnknownValueError> {
        let mut path = self.path.clone();
        path.push(segment);
        let value = raw.reveal();
        if let Some(kind) = value.unknown_kind() {
            return Err(UnknownValueError { kind, path });
        }
        Ok(UnknownCheckingProxy { node: Node::Value(value), path })
    }
}

#[cfg(test)]
#[path = "unknown_tests.rs"]
mod tests;
