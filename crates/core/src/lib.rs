// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pp-core: property model, codec, proxies and resource graph for policy packs

pub mod macros;

pub mod codec;
pub mod enforcement;
pub mod graph;
pub mod resource;
pub mod secret;
pub mod sentinel;
pub mod unknown;
pub mod value;

mod finite;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;


pub use codec::{decode, decode_properties, encode, encode_properties, CodecError, SecretMode};
pub use enforcement::EnforcementLevel;
pub use graph::{assemble, GraphError, ResourceGraph, ResourceId, ResourceNode, ResourceRecord};
#[cfg(any(test, feature = "test-support"))]
pub use resource::ResourceInputBuilder;
pub use resource::{
    CustomTimeouts, ProviderInput, ProviderRecord, Resource, ResourceEntry, ResourceInput,
    ResourceOptions,
};
pub use secret::{SecretsProxy, SecretsView, WriteError};
pub use sentinel::{Signature, UnknownKind};
pub use unknown::{UnknownCheckingProxy, UnknownValueError};
pub use value::{Archive, ArchiveMember, Asset, PropertyMap, PropertyValue, RawTree, WireMap};
