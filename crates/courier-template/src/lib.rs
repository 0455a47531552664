/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template variable resolution and validation engine for Courier.
//!
//! Given a text template containing `{{placeholder}}` tokens and a mapping
//! context describing which data domains are available (student, course,
//! institute, custom key/value pairs), this crate produces a fully
//! substituted string and a structured validation report describing which
//! placeholders resolved, which became visible `[bracket]` markers, and
//! whether the result is safe to dispatch.
//!
//! The engine is synchronous and pure apart from one wall-clock read per
//! call (behind the [`Clock`] trait). Nothing is cached, persisted, or
//! shared across calls. It has no wire protocol of its own; bulk sending,
//! confirmation dialogs, and data fetching are external collaborators.
//!
//! # Example
//!
//! ```
//! use courier_data::DataValue;
//! use courier_template::{MappingContext, RenderOptions, TemplateEngine, decide_send};
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new();
//! let options = RenderOptions::new(MappingContext::StudentManagement)
//!     .with_student(DataValue::from(json!({
//!         "full_name": "Ann",
//!         "course_name": "Algebra"
//!     })));
//!
//! let outcome = engine.render("Hi {{name}}, welcome to {{course_name}}!", &options);
//! assert_eq!(outcome.text, "Hi Ann, welcome to Algebra!");
//!
//! let report = engine.validate("Hi {{name}}, welcome to {{course_name}}!", &options);
//! assert!(decide_send(&report).allows_send());
//! ```

pub mod clock;
pub mod context;
pub mod dates;
pub mod engine;
pub mod error;
pub mod gate;
pub mod render;
pub mod schema;
pub mod validate;

// Re-export main types at crate root
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{MappingContext, RenderOptions};
pub use engine::{TemplateEngine, VariableTable};
pub use error::{TemplateError, TemplateResult};
pub use gate::{SendDecision, decide_send};
pub use render::{RenderOutcome, apply_table, referenced_tokens};
pub use validate::ValidationResult;
