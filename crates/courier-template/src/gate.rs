/*
 * gate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The send-gate decision.
//!
//! A pure decision function with no side effects: the actual dispatch
//! (email/WhatsApp network call) is an external collaborator. Missing
//! variables take precedence over warnings.

use serde::Serialize;

use crate::validate::ValidationResult;

/// Eligibility of a rendered template for outbound dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SendDecision {
    /// Hard block: required variables are absent.
    Blocked,

    /// Dispatch is allowed but the operator should review the warnings
    /// and may override.
    SendWithWarnings,

    /// Clean: dispatch is allowed.
    Send,
}

impl SendDecision {
    /// Whether dispatch is permitted at all (with or without warnings).
    pub fn allows_send(&self) -> bool {
        !matches!(self, SendDecision::Blocked)
    }
}

/// Decide dispatch eligibility from a validation report.
pub fn decide_send(result: &ValidationResult) -> SendDecision {
    if !result.missing_variables.is_empty() || result.error_message.is_some() {
        SendDecision::Blocked
    } else if !result.warnings.is_empty() {
        SendDecision::SendWithWarnings
    } else {
        SendDecision::Send
    }
}
