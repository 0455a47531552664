/*
 * engine.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The template engine and the context variable table builder.
//!
//! A [`TemplateEngine`] owns nothing but a clock. Every call builds its own
//! variable table and discards it; there is no cross-call cache or shared
//! state, so concurrent calls are independent apart from their clock reads.

use courier_data::DataValue;
use indexmap::IndexMap;

use crate::clock::{Clock, SystemClock};
use crate::context::RenderOptions;
use crate::dates;
use crate::error::{TemplateError, TemplateResult};
use crate::schema::{self, FieldSpec};

/// An ephemeral mapping from placeholder token (`{{course_name}}`) to its
/// resolved value. Later entries for the same key overwrite earlier ones;
/// iteration order is the build order.
pub type VariableTable = IndexMap<String, String>;

/// Wrap a bare name in placeholder braces.
pub(crate) fn token(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Resolve one field spec against a document.
///
/// Date-tagged fields are reformatted for display after resolution; a raw
/// value that cannot be parsed as a date degrades to the fallback.
fn resolve_field(doc: &DataValue, spec: &FieldSpec) -> String {
    let value = doc.resolve(spec.path, spec.fallback);
    if spec.date && value != spec.fallback {
        dates::reformat(&value).unwrap_or_else(|| spec.fallback.to_string())
    } else {
        value
    }
}

/// The template variable resolution engine.
///
/// # Example
///
/// ```
/// use courier_template::{MappingContext, RenderOptions, TemplateEngine};
///
/// let engine = TemplateEngine::new();
/// let options = RenderOptions::new(MappingContext::General)
///     .with_custom("event_name", "Open House");
///
/// let outcome = engine.render("Welcome to {{event_name}}!", &options);
/// assert_eq!(outcome.text, "Welcome to Open House!");
/// ```
pub struct TemplateEngine {
    clock: Box<dyn Clock>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        TemplateEngine::new()
    }
}

impl TemplateEngine {
    /// Create an engine on the system clock.
    pub fn new() -> Self {
        TemplateEngine {
            clock: Box::new(SystemClock),
        }
    }

    /// Create an engine on a caller-supplied clock (e.g. a fixed clock in
    /// tests).
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        TemplateEngine {
            clock: Box::new(clock),
        }
    }

    /// Build the full variable table for one call.
    ///
    /// Steps, in order (later entries overwrite earlier ones):
    ///
    /// 1. Wall-clock seeds and the static boilerplate line
    /// 2. Custom variables, verbatim
    /// 3. Student identity fields, then each conditional group whose signal
    ///    field resolves truthy on the student document
    /// 4. Explicit course document fields
    /// 5. Explicit institute document fields
    pub fn variable_table(&self, options: &RenderOptions) -> TemplateResult<VariableTable> {
        let mut table = VariableTable::new();

        let now = self.clock.now();
        table.insert(token("current_date"), dates::format_short(now.date()));
        table.insert(token("current_time"), now.format("%-I:%M %p").to_string());
        table.insert(token("year"), now.format("%Y").to_string());
        table.insert(token("month"), now.format("%B").to_string());
        table.insert(token("day"), now.format("%-d").to_string());
        table.insert(
            token("custom_message_text"),
            schema::CUSTOM_MESSAGE_TEXT.to_string(),
        );

        for (key, value) in &options.custom_variables {
            if key.is_empty() || key.contains(['{', '}']) || key.contains(char::is_whitespace) {
                return Err(TemplateError::InvalidCustomKey { key: key.clone() });
            }
            table.insert(token(key), value.clone());
        }

        if let Some(student) = &options.student {
            for spec in schema::IDENTITY_FIELDS {
                table.insert(token(spec.token), resolve_field(student, spec));
            }

            for group in schema::GATED_GROUPS {
                if let Some(required) = group.context {
                    if options.context() != required {
                        continue;
                    }
                }
                let signaled = student
                    .lookup(group.signal)
                    .is_some_and(|v| v.is_truthy());
                if !signaled {
                    tracing::debug!(group = group.name, signal = group.signal, "group skipped");
                    continue;
                }
                // Group members carry no fallback entries: a falsy member
                // stays out of the table and surfaces as an unmapped
                // [bracket] marker downstream.
                for spec in group.fields {
                    let Some(value) = student.lookup(spec.path) else {
                        continue;
                    };
                    if !value.is_truthy() {
                        continue;
                    }
                    let mut rendered = value.render();
                    if spec.date {
                        rendered = dates::reformat(&rendered)
                            .unwrap_or_else(|| spec.fallback.to_string());
                    }
                    table.insert(token(spec.token), rendered);
                }
            }
        }

        // Explicit documents overwrite student-derived entries: they are
        // the more authoritative source when both are supplied.
        if let Some(course) = &options.course {
            for spec in schema::COURSE_FIELDS {
                table.insert(token(spec.token), resolve_field(course, spec));
            }
        }

        if let Some(institute) = &options.institute {
            for spec in schema::INSTITUTE_FIELDS {
                table.insert(token(spec.token), resolve_field(institute, spec));
            }
        }

        tracing::debug!(
            context = %options.context(),
            entries = table.len(),
            "variable table built"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::context::MappingContext;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fixed_engine() -> TemplateEngine {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        TemplateEngine::with_clock(FixedClock::new(at))
    }

    fn student(value: serde_json::Value) -> DataValue {
        DataValue::from(value)
    }

    #[test]
    fn test_seed_variables() {
        let engine = fixed_engine();
        let table = engine
            .variable_table(&RenderOptions::new(MappingContext::General))
            .unwrap();

        assert_eq!(table["{{current_date}}"], "3/9/2024");
        assert_eq!(table["{{current_time}}"], "2:05 PM");
        assert_eq!(table["{{year}}"], "2024");
        assert_eq!(table["{{month}}"], "March");
        assert_eq!(table["{{day}}"], "9");
        assert_eq!(table["{{custom_message_text}}"], schema::CUSTOM_MESSAGE_TEXT);
    }

    #[test]
    fn test_custom_variables_merge_verbatim() {
        let engine = fixed_engine();
        let options = RenderOptions::new(MappingContext::Assessment)
            .with_custom("assessment_score", "87");
        let table = engine.variable_table(&options).unwrap();
        assert_eq!(table["{{assessment_score}}"], "87");
    }

    #[test]
    fn test_invalid_custom_key_is_rejected() {
        let engine = fixed_engine();
        // Keys become {{key}} tokens verbatim: empty, braced, and
        // whitespace-bearing keys are all rejected
        for key in ["", "{oops}", "bad key", "bad\tkey"] {
            let options = RenderOptions::new(MappingContext::General).with_custom(key, "x");
            let err = engine.variable_table(&options).unwrap_err();
            assert!(
                matches!(err, TemplateError::InvalidCustomKey { .. }),
                "{key:?}"
            );
        }
    }

    #[test]
    fn test_identity_fields_use_fallbacks() {
        let engine = fixed_engine();
        let options = RenderOptions::new(MappingContext::General)
            .with_student(student(json!({ "full_name": "Ann" })));
        let table = engine.variable_table(&options).unwrap();

        assert_eq!(table["{{name}}"], "Ann");
        assert_eq!(table["{{email}}"], "your email");
    }

    #[test]
    fn test_group_gated_on_signal_field() {
        let engine = fixed_engine();

        // Signal present: whole group enters the table
        let options = RenderOptions::new(MappingContext::General).with_student(student(json!({
            "full_name": "Ann",
            "course_name": "Algebra",
            "course_price": 499
        })));
        let table = engine.variable_table(&options).unwrap();
        assert_eq!(table["{{course_name}}"], "Algebra");
        assert_eq!(table["{{course_price}}"], "499");
        // Absent members get no fallback entry; they stay unmapped
        assert!(!table.contains_key("{{course_duration}}"));

        // Signal absent: none of the group enters, even though a member
        // field exists on the document
        let options = RenderOptions::new(MappingContext::General).with_student(student(json!({
            "full_name": "Ann",
            "course_price": 499
        })));
        let table = engine.variable_table(&options).unwrap();
        assert!(!table.contains_key("{{course_price}}"));
        assert!(!table.contains_key("{{course_name}}"));
    }

    #[test]
    fn test_attendance_group_requires_student_management_context() {
        let engine = fixed_engine();
        let snapshot = json!({ "full_name": "Ann", "attendance_status": "present" });

        let options = RenderOptions::new(MappingContext::StudentManagement)
            .with_student(student(snapshot.clone()));
        let table = engine.variable_table(&options).unwrap();
        assert_eq!(table["{{attendance_status}}"], "present");

        let options = RenderOptions::new(MappingContext::Course).with_student(student(snapshot));
        let table = engine.variable_table(&options).unwrap();
        assert!(!table.contains_key("{{attendance_status}}"));
    }

    #[test]
    fn test_explicit_course_overrides_student_embedded() {
        let engine = fixed_engine();
        let options = RenderOptions::new(MappingContext::Course)
            .with_student(student(json!({
                "full_name": "Ann",
                "course_name": "Old Algebra"
            })))
            .with_course(DataValue::from(json!({ "name": "Algebra II" })));
        let table = engine.variable_table(&options).unwrap();
        assert_eq!(table["{{course_name}}"], "Algebra II");
    }

    #[test]
    fn test_date_fields_are_reformatted() {
        let engine = fixed_engine();
        let options = RenderOptions::new(MappingContext::General).with_student(student(json!({
            "full_name": "Ann",
            "batch_start_date": "2024-01-01",
            "batch_end_date": "soon"
        })));
        let table = engine.variable_table(&options).unwrap();
        assert_eq!(table["{{batch_start_date}}"], "1/1/2024");
        // Unparseable date degrades to the fallback, never an error
        assert_eq!(table["{{batch_end_date}}"], "N/A");
    }
}
