// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Violation reporting.

use parking_lot::Mutex;
use pp_core::EnforcementLevel;
use pp_wire::AnalyzeDiagnostic;

/// Identity of the policy a diagnostic is reported for.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PolicyStamp<'a> {
    pub policy_name: &'a str,
    pub description: &'a str,
    pub pack_name: &'a str,
    pub pack_version: &'a str,
}

impl PolicyStamp<'_> {
    pub(crate) fn diagnostic(
        &self,
        message: String,
        urn: String,
        enforcement_level: EnforcementLevel,
    ) -> AnalyzeDiagnostic {
        AnalyzeDiagnostic {
            policy_name: self.policy_name.to_string(),
            policy_pack_name: self.pack_name.to_string(),
            policy_pack_version: self.pack_version.to_string(),
            description: self.description.to_string(),
            message,
            enforcement_level,
            urn,
        }
    }

    /// Advisory diagnostic for a policy that read an unknown value.
    pub(crate) fn preview_skipped(&self, reason: &dyn std::fmt::Display) -> AnalyzeDiagnostic {
        self.diagnostic(
            format!("can't run policy '{}' during preview: {reason}", self.policy_name),
            String::new(),
            EnforcementLevel::Advisory,
        )
    }
}

/// Sink that validation callbacks report violations to.
///
/// Shared by all validations of one policy run; they may report concurrently.
pub struct ReportViolation<'a> {
    stamp: PolicyStamp<'a>,
    enforcement_level: EnforcementLevel,
    diagnostics: Mutex<Vec<AnalyzeDiagnostic>>,
}

impl<'a> ReportViolation<'a> {
    pub(crate) fn new(stamp: PolicyStamp<'a>, enforcement_level: EnforcementLevel) -> Self {
        Self { stamp, enforcement_level, diagnostics: Mutex::new(Vec::new()) }
    }

    /// Report a violation, optionally tied to a specific resource.
    ///
    /// The diagnostic message is the policy description followed by
    /// `message` on a new line when `message` is non-empty.
    pub fn report(&self, message: impl AsRef<str>, urn: Option<&str>) {
        let message = message.as_ref();
        let mut full = self.stamp.description.to_string();
        if !message.is_empty() {
            full.push('\n');
            full.push_str(message);
        }
        let diagnostic =
            self.stamp.diagnostic(full, urn.unwrap_or_default().to_string(), self.enforcement_level);
        self.diagnostics.lock().push(diagnostic);
    }

    pub(crate) fn into_diagnostics(self) -> Vec<AnalyzeDiagnostic> {
        self.diagnostics.into_inner()
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
