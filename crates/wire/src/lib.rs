// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol between a policy pack and the engine host.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod convert;
mod policy;
mod request;
mod response;
mod wire;

pub use policy::{AnalyzerInfo, PolicyConfig, PolicyConfigSchema, PolicyInfo};
pub use request::{
    AnalyzeRequest, AnalyzerProviderResource, AnalyzerResource, AnalyzerResourceOptions,
    CustomTimeouts, PropertyDependencies, Request,
};
pub use response::{AnalyzeDiagnostic, Remediation, Response};
pub use wire::{decode, encode, read_message, write_message, ProtocolError, MAX_MESSAGE_SIZE};
pub use wire::{read_response, write_request, write_response};
