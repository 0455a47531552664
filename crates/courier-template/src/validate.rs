/*
 * validate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Schema-level template validation.
//!
//! Validation answers a different question than rendering: not "do we have
//! a value for this placeholder right now" but "is this placeholder ever
//! legal in this context". A template can validate cleanly at the schema
//! level and still render with visible `[bracket]` markers when the data
//! objects did not populate a context-legal variable; those show up here as
//! warnings, not as missing variables.

use serde::Serialize;

use crate::context::RenderOptions;
use crate::engine::{TemplateEngine, token};
use crate::error::{MAX_TEMPLATE_LEN, TemplateError, TemplateResult};
use crate::render::referenced_tokens;
use crate::schema;

/// The structured validation report consumed by send-confirmation UIs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff every referenced placeholder resolved for this call:
    /// no schema mismatches and no unrealized data.
    pub is_valid: bool,

    /// True iff the send gate allows dispatch. Warnings alone do not
    /// block, so a result can be invalid-but-sendable.
    pub can_send: bool,

    /// Placeholders referenced by the template that the context does not
    /// support at all. These hard-block sending.
    pub missing_variables: Vec<String>,

    /// Advisory messages for context-legal placeholders that no supplied
    /// data realized; they will render as `[bracket]` markers.
    pub warnings: Vec<String>,

    /// The realized variable table, for UI display.
    pub available_variables: crate::engine::VariableTable,

    /// Set when validation itself failed, not when the template is
    /// defective.
    pub error_message: Option<String>,
}

impl TemplateEngine {
    /// Validate a template against a context and its supplied data.
    ///
    /// Never returns an error: an internal failure surfaces through
    /// [`ValidationResult::error_message`] with sending blocked.
    pub fn validate(&self, template: &str, options: &RenderOptions) -> ValidationResult {
        match self.try_validate(template, options) {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(%error, "validation failed");
                ValidationResult {
                    is_valid: false,
                    can_send: false,
                    error_message: Some(error.to_string()),
                    ..Default::default()
                }
            }
        }
    }

    fn try_validate(
        &self,
        template: &str,
        options: &RenderOptions,
    ) -> TemplateResult<ValidationResult> {
        if template.len() > MAX_TEMPLATE_LEN {
            return Err(TemplateError::TemplateTooLarge {
                len: template.len(),
                max: MAX_TEMPLATE_LEN,
            });
        }

        let table = self.variable_table(options)?;
        let context_schema = schema::context_schema(options.context());

        let mut missing_variables = Vec::new();
        let mut warnings = Vec::new();

        for name in referenced_tokens(template) {
            if table.contains_key(&token(&name)) {
                continue;
            }
            if context_schema.contains(name.as_str()) {
                warnings.push(format!(
                    "'{name}' is supported in the {} context but no data was supplied; \
                     it will render as [{name}]",
                    options.context()
                ));
            } else {
                missing_variables.push(name);
            }
        }

        let is_valid = missing_variables.is_empty() && warnings.is_empty();
        let can_send = missing_variables.is_empty();

        Ok(ValidationResult {
            is_valid,
            can_send,
            missing_variables,
            warnings,
            available_variables: table,
            error_message: None,
        })
    }
}
