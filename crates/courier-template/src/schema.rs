/*
 * schema.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Declarative variable-group schema.
//!
//! Two distinct things live here:
//!
//! 1. The **mapping tables** used while building a variable table: which
//!    placeholder maps to which document path, with what fallback, and which
//!    signal field gates each conditional group. Groups are gated on one
//!    signal field so that a half-populated group is never shown: if the
//!    signal is absent, none of the group's placeholders enter the table.
//! 2. The **context schema**: the static set of placeholder names each
//!    mapping context supports at all, independent of supplied data. The
//!    validator uses this to tell a template/context mismatch apart from a
//!    legitimately-missing value.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::context::MappingContext;

/// Static boilerplate injected as `{{custom_message_text}}`.
pub const CUSTOM_MESSAGE_TEXT: &str =
    "This is an automated message from your institute. Please do not reply.";

/// Placeholder names seeded into every table from the wall clock.
pub const SEED_TOKENS: &[&str] = &[
    "current_date",
    "current_time",
    "year",
    "month",
    "day",
    "custom_message_text",
];

/// One placeholder mapping: token name, document path, fallback text.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub token: &'static str,
    pub path: &'static str,
    pub fallback: &'static str,
    /// Date-tagged fields are reformatted for display; an unparseable
    /// value becomes the fallback.
    pub date: bool,
}

const fn field(token: &'static str, path: &'static str, fallback: &'static str) -> FieldSpec {
    FieldSpec {
        token,
        path,
        fallback,
        date: false,
    }
}

const fn date_field(token: &'static str, path: &'static str, fallback: &'static str) -> FieldSpec {
    FieldSpec {
        token,
        path,
        fallback,
        date: true,
    }
}

/// A conditionally-included group of student-derived placeholders.
#[derive(Debug, Clone, Copy)]
pub struct FieldGroup {
    pub name: &'static str,
    /// The group enters the table only when this field resolves to a
    /// truthy value on the student document.
    pub signal: &'static str,
    /// Some groups are additionally restricted to one context.
    pub context: Option<MappingContext>,
    pub fields: &'static [FieldSpec],
}

/// Core identity fields, populated whenever a student document is present.
pub const IDENTITY_FIELDS: &[FieldSpec] = &[
    field("name", "full_name", "Student"),
    field("email", "email", "your email"),
    field("mobile_number", "mobile_number", "your mobile number"),
    field("student_id", "user_id", "your student ID"),
    field("username", "username", "your username"),
    date_field("registration_date", "created_at", "your registration date"),
];

/// Conditionally-included student groups, in build order.
pub const GATED_GROUPS: &[FieldGroup] = &[
    FieldGroup {
        name: "course",
        signal: "course_name",
        context: None,
        fields: &[
            field("course_name", "course_name", "your course"),
            field("course_description", "course_description", "N/A"),
            field("course_duration", "course_duration", "N/A"),
            field("course_price", "course_price", "N/A"),
        ],
    },
    FieldGroup {
        name: "batch",
        signal: "batch_start_date",
        context: None,
        fields: &[
            field("batch_name", "batch_name", "your batch"),
            date_field("batch_start_date", "batch_start_date", "N/A"),
            date_field("batch_end_date", "batch_end_date", "N/A"),
        ],
    },
    FieldGroup {
        name: "institute",
        signal: "institute_name",
        context: None,
        fields: &[
            field("institute_name", "institute_name", "your institute"),
            field("institute_address", "institute_address", "N/A"),
            field("institute_phone", "institute_phone", "N/A"),
            field("institute_email", "institute_email", "N/A"),
            field("institute_website", "institute_website", "N/A"),
        ],
    },
    FieldGroup {
        name: "live-class",
        signal: "next_live_class_date",
        context: None,
        fields: &[
            date_field("next_live_class_date", "next_live_class_date", "N/A"),
            field("next_live_class_time", "next_live_class_time", "N/A"),
            field("live_class_link", "live_class_link", "N/A"),
        ],
    },
    FieldGroup {
        name: "referral",
        signal: "referral_code",
        context: None,
        fields: &[
            field("referral_code", "referral_code", "N/A"),
            field("referral_count", "referral_count", "N/A"),
            field("referral_reward", "referral_reward", "N/A"),
        ],
    },
    FieldGroup {
        name: "attendance",
        signal: "attendance_status",
        context: Some(MappingContext::StudentManagement),
        fields: &[
            field("attendance_status", "attendance_status", "N/A"),
            field("attendance_percentage", "attendance_percentage", "N/A"),
            date_field("last_class_attended", "last_class_attended", "N/A"),
        ],
    },
];

/// Mappings applied from an explicit course document. These overwrite any
/// student-derived course entries: the first-class object is the more
/// authoritative source.
pub const COURSE_FIELDS: &[FieldSpec] = &[
    field("course_name", "name", "your course"),
    field("course_description", "description", "N/A"),
    field("course_duration", "duration", "N/A"),
    field("course_price", "price", "N/A"),
];

/// Mappings applied from an explicit institute document.
pub const INSTITUTE_FIELDS: &[FieldSpec] = &[
    field("institute_name", "name", "your institute"),
    field("institute_address", "address", "N/A"),
    field("institute_phone", "phone", "N/A"),
    field("institute_email", "email", "N/A"),
    field("institute_website", "website", "N/A"),
];

/// Extra placeholders legal only in the assessment context, typically
/// supplied through custom variables.
pub const ASSESSMENT_TOKENS: &[&str] = &["assessment_name", "assessment_score", "assessment_date"];

fn group_tokens(name: &str) -> impl Iterator<Item = &'static str> + '_ {
    GATED_GROUPS
        .iter()
        .filter(move |g| g.name == name)
        .flat_map(|g| g.fields.iter().map(|f| f.token))
}

/// The static per-context schema: every placeholder name the context
/// supports, independent of whether data was supplied for it.
static CONTEXT_SCHEMAS: Lazy<HashMap<MappingContext, HashSet<&'static str>>> = Lazy::new(|| {
    let base = || {
        SEED_TOKENS
            .iter()
            .copied()
            .chain(IDENTITY_FIELDS.iter().map(|f| f.token))
            .collect::<HashSet<_>>()
    };

    let mut schemas = HashMap::new();

    let mut student_management = base();
    for group in GATED_GROUPS {
        student_management.extend(group.fields.iter().map(|f| f.token));
    }
    schemas.insert(MappingContext::StudentManagement, student_management);

    let mut course = base();
    for name in ["course", "batch", "institute", "live-class"] {
        course.extend(group_tokens(name));
    }
    schemas.insert(MappingContext::Course, course);

    let mut assessment = base();
    for name in ["course", "institute"] {
        assessment.extend(group_tokens(name));
    }
    assessment.extend(ASSESSMENT_TOKENS.iter().copied());
    schemas.insert(MappingContext::Assessment, assessment);

    let mut announcement = base();
    announcement.extend(group_tokens("institute"));
    schemas.insert(MappingContext::Announcement, announcement.clone());
    schemas.insert(MappingContext::General, announcement);

    schemas
});

/// Look up the schema for a context.
pub fn context_schema(context: MappingContext) -> &'static HashSet<&'static str> {
    &CONTEXT_SCHEMAS[&context]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_context_has_seed_and_identity_tokens() {
        for ctx in [
            MappingContext::StudentManagement,
            MappingContext::Course,
            MappingContext::General,
            MappingContext::Assessment,
            MappingContext::Announcement,
        ] {
            let schema = context_schema(ctx);
            assert!(schema.contains("current_date"), "{ctx}");
            assert!(schema.contains("name"), "{ctx}");
        }
    }

    #[test]
    fn test_attendance_only_in_student_management() {
        assert!(context_schema(MappingContext::StudentManagement).contains("attendance_status"));
        for ctx in [
            MappingContext::Course,
            MappingContext::General,
            MappingContext::Assessment,
            MappingContext::Announcement,
        ] {
            assert!(!context_schema(ctx).contains("attendance_status"), "{ctx}");
        }
    }

    #[test]
    fn test_assessment_tokens_only_in_assessment() {
        assert!(context_schema(MappingContext::Assessment).contains("assessment_score"));
        assert!(!context_schema(MappingContext::Course).contains("assessment_score"));
    }

    #[test]
    fn test_course_object_covers_student_course_group() {
        // Every token the course group can leave unmapped must be
        // supplyable through an explicit course document.
        let from_course: HashSet<_> = COURSE_FIELDS.iter().map(|f| f.token).collect();
        for token in group_tokens("course") {
            assert!(from_course.contains(token), "{token}");
        }
    }
}
