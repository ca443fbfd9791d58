// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

/// What happens when a policy is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementLevel {
    /// Report the violation and let the update continue.
    #[default]
    Advisory,
    /// Report the violation and block the update.
    Mandatory,
    /// Skip the policy entirely.
    Disabled,
    /// Run the policy's remediation and rewrite the resource's properties.
    Remediate,
}

crate::simple_display! {
    EnforcementLevel {
        Advisory => "advisory",
        Mandatory => "mandatory",
        Disabled => "disabled",
        Remediate => "remediate",
    }
}

impl EnforcementLevel {
    pub fn is_disabled(self) -> bool {
        self == EnforcementLevel::Disabled
    }

    /// Level reported for a policy that has no remediation step.
    pub fn for_validation(self) -> Self {
        match self {
            EnforcementLevel::Remediate => EnforcementLevel::Mandatory,
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "enforcement_tests.rs"]
mod tests;
