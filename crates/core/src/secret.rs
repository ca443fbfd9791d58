// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secret-preserving read/write proxy.
//!
//! Reads reveal secret markers so callers see plaintext. Writes re-wrap the
//! incoming value as secret iff the slot being overwritten currently holds a
//! secret, so secrecy sticks to the position in the tree rather than to the
//! value. Expects a tree decoded with
//! [`SecretMode::Preserve`](crate::codec::SecretMode).

use thiserror::Error;

use crate::value::{Archive, Asset, PropertyMap, PropertyValue, RawTree};

/// Invalid write through a [`SecretsProxy`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("cannot set key '{0}': value is not a map")]
    NotAMap(String),
    #[error("cannot set index {0}: value is not a list")]
    NotAList(usize),
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug)]
enum NodeMut<'a> {
    Root(&'a mut PropertyMap),
    Value(&'a mut PropertyValue),
}

/// Read/write proxy that keeps secrecy sticky to tree positions.
#[derive(Debug)]
pub struct SecretsProxy<'a> {
    node: NodeMut<'a>,
}

impl<'a> SecretsProxy<'a> {
    pub fn new(props: &'a mut PropertyMap) -> Self {
        Self { node: NodeMut::Root(props) }
    }

    /// Read view of a map entry, secrets revealed.
    pub fn get(&self, key: &str) -> Option<SecretsView<'_>> {
        self.as_map()?.get(key).map(SecretsView::over)
    }

    /// Read view of a list element, secrets revealed.
    pub fn index(&self, i: usize) -> Option<SecretsView<'_>> {
        self.as_list()?.get(i).map(SecretsView::over)
    }

    /// Write proxy for a nested map entry. Writes land inside the entry even
    /// when the entry itself is secret.
    pub fn get_mut(&mut self, key: &str) -> Option<SecretsProxy<'_>> {
        let value = self.as_map_mut()?.get_mut(key)?;
        Some(SecretsProxy { node: NodeMut::Value(value.reveal_mut()) })
    }

    /// Write proxy for a nested list element.
    pub fn index_mut(&mut self, i: usize) -> Option<SecretsProxy<'_>> {
        let value = self.as_list_mut()?.get_mut(i)?;
        Some(SecretsProxy { node: NodeMut::Value(value.reveal_mut()) })
    }

    /// Store `value` at `key`, re-secreting it if the previous value was secret.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<(), WriteError> {
        let key = key.into();
        let Some(map) = self.as_map_mut() else {
            return Err(WriteError::NotAMap(key));
        };
        let value = rewrap(map.get(&key), value.into());
        map.insert(key, value);
        Ok(())
    }

    /// Store `value` at list index `i`, re-secreting it if the previous
    /// element was secret.
    pub fn set_index(&mut self, i: usize, value: impl Into<PropertyValue>) -> Result<(), WriteError> {
        let list = self.as_list_mut().ok_or(WriteError::NotAList(i))?;
        let len = list.len();
        let slot = list.get_mut(i).ok_or(WriteError::IndexOutOfRange { index: i, len })?;
        *slot = rewrap(Some(&*slot), value.into());
        Ok(())
    }

    /// Remove a map entry, returning its plaintext.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        let removed = self.as_map_mut()?.shift_remove(key)?;
        Some(match removed {
            PropertyValue::Secret(inner) => *inner,
            other => other,
        })
    }

    /// Whether the raw value at `key` is secret.
    pub fn is_secret(&self, key: &str) -> bool {
        self.as_map().and_then(|m| m.get(key)).is_some_and(PropertyValue::is_secret)
    }

    /// Whether the raw list element at `i` is secret.
    pub fn is_secret_index(&self, i: usize) -> bool {
        self.as_list().and_then(|l| l.get(i)).is_some_and(PropertyValue::is_secret)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.as_map().into_iter().flat_map(|m| m.keys().map(String::as_str))
    }

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

    /// Read view of this node, secrets revealed.
    pub fn view(&self) -> SecretsView<'_> {
        match &self.node {
            NodeMut::Root(map) => SecretsView { node: ViewNode::Root(&**map) },
            NodeMut::Value(value) => SecretsView::over(&**value),
        }
    }

    /// Backing tree with secret markers intact, ready to encode.
    pub fn raw(&self) -> RawTree<'_> {
        match &self.node {
            NodeMut::Root(map) => RawTree::Map(&**map),
            NodeMut::Value(value) => RawTree::Value(&**value),
        }
    }

    fn as_map(&self) -> Option<&PropertyMap> {
        match &self.node {
            NodeMut::Root(map) => Some(&**map),
            NodeMut::Value(value) => value.as_object(),
        }
    }

    fn as_map_mut(&mut self) -> Option<&mut PropertyMap> {
        match &mut self.node {
            NodeMut::Root(map) => Some(&mut **map),
            NodeMut::Value(value) => value.as_object_mut(),
        }
    }

    fn as_list(&self) -> Option<&Vec<PropertyValue>> {
        match &self.node {
            NodeMut::Root(_) => None,
            NodeMut::Value(value) => value.as_array(),
        }
    }

    fn as_list_mut(&mut self) -> Option<&mut Vec<PropertyValue>> {
        match &mut self.node {
            NodeMut::Root(_) => None,
            NodeMut::Value(value) => value.as_array_mut(),
        }
    }
}

fn rewrap(prior: Option<&PropertyValue>, value: PropertyValue) -> PropertyValue {
    match prior {
        Some(prior) if prior.is_secret() && !value.is_secret() => PropertyValue::secret(value),
        _ => value,
    }
}

#[derive(Debug, Clone, Copy)]
enum ViewNode<'a> {
    Root(&'a PropertyMap),
    Value(&'a PropertyValue),
}

/// Read-only view that reveals secret markers at every level.
#[derive(Debug, Clone, Copy)]
pub struct SecretsView<'a> {
    node: ViewNode<'a>,
}

impl<'a> SecretsView<'a> {
    pub fn new(props: &'a PropertyMap) -> Self {
        Self { node: ViewNode::Root(props) }
    }

    fn over(raw: &'a PropertyValue) -> Self {
        Self { node: ViewNode::Value(raw.reveal()) }
    }

    /// Backing tree of this node. Markers below it are left in place.
    pub fn raw(&self) -> RawTree<'a> {
        match self.node {
            ViewNode::Root(map) => RawTree::Map(map),
            ViewNode::Value(value) => RawTree::Value(value),
        }
    }

    pub fn get(&self, key: &str) -> Option<SecretsView<'a>> {
        self.as_map()?.get(key).map(SecretsView::over)
    }

    pub fn index(&self, i: usize) -> Option<SecretsView<'a>> {
        self.as_list()?.get(i).map(SecretsView::over)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.as_map().into_iter().flat_map(|m| m.keys().map(String::as_str))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'a str, SecretsView<'a>)> + 'a {
        self.as_map()
            .into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), SecretsView::over(v))))
    }

    pub fn elements(&self) -> impl Iterator<Item = SecretsView<'a>> + 'a {
        self.as_list().into_iter().flat_map(|l| l.iter().map(SecretsView::over))
    }

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

    pub fn as_map(&self) -> Option<&'a PropertyMap> {
        match self.node {
            ViewNode::Root(map) => Some(map),
            ViewNode::Value(value) => value.as_object(),
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

    /// Backing value of a non-root node with its outer secret marker removed.
    pub fn value(&self) -> Option<&'a PropertyValue> {
        match self.node {
            ViewNode::Root(_) => None,
            ViewNode::Value(value) => Some(value),
        }
    }
}

#[cfg(test)]
#[path = "secret_tests.rs"]
mod tests;
