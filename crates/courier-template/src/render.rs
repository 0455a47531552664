/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The template substitution pass.
//!
//! Every table entry is applied as a global literal replacement; leftover
//! `{{...}}` tokens are then rewritten to visible `[name]` markers so a
//! human reviewing the output can see exactly which placeholders failed to
//! resolve. The output never contains a double-brace token.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::context::RenderOptions;
use crate::engine::{TemplateEngine, VariableTable};
use crate::error::{MAX_TEMPLATE_LEN, TemplateError, TemplateResult};

/// Matches one well-formed placeholder token. No nesting: braces are not
/// allowed inside the name.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("valid token regex"));

/// Matches any leftover double-brace run, including malformed names with a
/// stray inner `{`. The cleanup pass uses this wider net so the output
/// never carries a residual `{{...}}` substring.
static LEFTOVER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("valid leftover regex"));

/// The result of one substitution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutcome {
    /// The fully substituted text. Unresolved placeholders appear as
    /// `[name]`, never as `{{name}}`.
    pub text: String,

    /// Number of table entries whose replacement actually changed the text.
    pub replaced_count: usize,

    /// Names of placeholders that had no table entry, in order of first
    /// appearance.
    pub unmapped: Vec<String>,
}

/// Extract the distinct placeholder names referenced by a template, in
/// order of first appearance.
pub fn referenced_tokens(template: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for captures in TOKEN_RE.captures_iter(template) {
        let name = captures[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

/// Apply a variable table to a template.
///
/// This is the data-level half of the engine; it does not consult the
/// context schema. See [`TemplateEngine::validate`] for the schema-level
/// check.
pub fn apply_table(template: &str, table: &VariableTable) -> RenderOutcome {
    let mut text = template.to_string();
    let mut replaced_count = 0;

    for (placeholder, value) in table {
        if text.contains(placeholder.as_str()) {
            text = text.replace(placeholder.as_str(), value);
            replaced_count += 1;
        }
    }

    let mut unmapped = Vec::new();
    let text = LEFTOVER_RE
        .replace_all(&text, |captures: &regex::Captures<'_>| {
            let name = captures[1].to_string();
            if !unmapped.contains(&name) {
                unmapped.push(name.clone());
            }
            format!("[{name}]")
        })
        .into_owned();

    RenderOutcome {
        text,
        replaced_count,
        unmapped,
    }
}

impl TemplateEngine {
    /// Render a template against the given options.
    ///
    /// Fail-safe: if table building fails (catastrophic input), the
    /// original template is returned unmodified rather than a partially
    /// substituted one, so a broken mapping never corrupts an outgoing
    /// message. The failure is logged, not propagated.
    pub fn render(&self, template: &str, options: &RenderOptions) -> RenderOutcome {
        match self.try_render(template, options) {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(%error, "render failed; returning original template");
                RenderOutcome {
                    text: template.to_string(),
                    replaced_count: 0,
                    unmapped: Vec::new(),
                }
            }
        }
    }

    /// Render, surfacing catastrophic input errors to the caller.
    pub fn try_render(
        &self,
        template: &str,
        options: &RenderOptions,
    ) -> TemplateResult<RenderOutcome> {
        if template.len() > MAX_TEMPLATE_LEN {
            return Err(TemplateError::TemplateTooLarge {
                len: template.len(),
                max: MAX_TEMPLATE_LEN,
            });
        }
        let table = self.variable_table(options)?;
        let outcome = apply_table(template, &table);
        tracing::debug!(
            replaced = outcome.replaced_count,
            unmapped = outcome.unmapped.len(),
            "template rendered"
        );
        Ok(outcome)
    }
}
