/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Mapping contexts and per-call render options.

use std::fmt;
use std::str::FromStr;

use courier_data::DataValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::TemplateError;

/// The named mode a template is rendered or validated under.
///
/// The context determines which variable groups are legal (the context
/// schema, see [`crate::schema`]) and which conditional groups are eligible
/// during table building. Supplied by the caller per call; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MappingContext {
    StudentManagement,
    Course,
    General,
    Assessment,
    Announcement,
}

impl MappingContext {
    /// The kebab-case tag used at the wire/UI boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingContext::StudentManagement => "student-management",
            MappingContext::Course => "course",
            MappingContext::General => "general",
            MappingContext::Assessment => "assessment",
            MappingContext::Announcement => "announcement",
        }
    }
}

impl fmt::Display for MappingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappingContext {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student-management" => Ok(MappingContext::StudentManagement),
            "course" => Ok(MappingContext::Course),
            "general" => Ok(MappingContext::General),
            "assessment" => Ok(MappingContext::Assessment),
            "announcement" => Ok(MappingContext::Announcement),
            _ => Err(TemplateError::UnknownContext { tag: s.to_string() }),
        }
    }
}

/// Per-call inputs to table building, rendering, and validation.
///
/// The optional entity snapshots are borrowed for the duration of a single
/// call; the engine never mutates or retains them. Custom variables are
/// merged into the table verbatim, each key becoming a `{{key}}` token.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub context: Option<MappingContext>,
    pub student: Option<DataValue>,
    pub course: Option<DataValue>,
    pub institute: Option<DataValue>,
    pub custom_variables: IndexMap<String, String>,
}

impl RenderOptions {
    /// Create options for the given context with no data domains.
    pub fn new(context: MappingContext) -> Self {
        RenderOptions {
            context: Some(context),
            ..Default::default()
        }
    }

    /// The effective context; callers that never set one get `General`.
    pub fn context(&self) -> MappingContext {
        self.context.unwrap_or(MappingContext::General)
    }

    pub fn with_student(mut self, student: DataValue) -> Self {
        self.student = Some(student);
        self
    }

    pub fn with_course(mut self, course: DataValue) -> Self {
        self.course = Some(course);
        self
    }

    pub fn with_institute(mut self, institute: DataValue) -> Self {
        self.institute = Some(institute);
        self
    }

    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_variables.insert(key.into(), value.into());
        self
    }
}
