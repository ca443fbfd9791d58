// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pp-engine: policy packs and the analyzer that runs them.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod analyzer;
mod args;
mod config;
pub mod env;
mod pack;
mod policy;
mod report;
mod server;

pub use analyzer::{AnalyzeError, Analyzer};
pub use args::{
    CallContext, ProviderView, RemediationArgs, ResourceValidationArgs, ResourceView,
    StackResource, StackValidationArgs,
};
pub use config::ConfigState;
pub use env::RuntimeSettings;
pub use pack::{InitialConfig, PackError, PolicyPack, DEFAULT_PACK_VERSION, ENFORCEMENT_LEVEL_KEY};
pub use policy::{
    remediate_resource, validate_resource, validate_resource_of_type, validate_stack, Policy,
    PolicyError, ResourceRemediation, ResourceValidation, ResourceValidationPolicy,
    StackValidation, StackValidationPolicy,
};
pub use report::ReportViolation;
pub use server::serve;
