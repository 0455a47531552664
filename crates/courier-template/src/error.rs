/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template operations.
//!
//! Data absence is never an error in this engine: unresolved fields fall
//! back to defaults and unresolved placeholders become visible bracket
//! markers. The variants here cover the catastrophic-input path only, and
//! the render entry point converts even these into a fail-safe return of
//! the original template (see [`crate::engine::TemplateEngine::render`]).

use thiserror::Error;

/// Maximum accepted template length in bytes.
pub const MAX_TEMPLATE_LEN: usize = 1 << 20;

/// Errors that can occur during template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A mapping context tag that is not one of the known contexts.
    #[error("Unknown mapping context: {tag}")]
    UnknownContext { tag: String },

    /// Template exceeds the accepted size limit.
    #[error("Template too large: {len} bytes (max {max})")]
    TemplateTooLarge { len: usize, max: usize },

    /// A custom variable key that cannot form a `{{key}}` placeholder.
    #[error("Invalid custom variable key: {key:?}")]
    InvalidCustomKey { key: String },
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
