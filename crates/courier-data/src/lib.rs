/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Loosely-typed document values for Courier.
//!
//! The entities that feed template rendering (student, course, institute
//! snapshots) arrive as arbitrary key/value records fetched from a remote
//! backend. Fields are looked up by string path, not by a fixed schema, so
//! this crate models them as a generic ordered document value rather than
//! fixed structs. A thin typed façade, if one is ever needed, belongs at the
//! boundary where real entities are known — not here.
//!
//! # Example
//!
//! ```
//! use courier_data::DataValue;
//! use serde_json::json;
//!
//! let student = DataValue::from(json!({
//!     "full_name": "Ann",
//!     "course": { "name": "Algebra" }
//! }));
//!
//! assert_eq!(student.resolve("full_name", "Student"), "Ann");
//! assert_eq!(student.resolve("course.name", "your course"), "Algebra");
//! assert_eq!(student.resolve("course.price", "N/A"), "N/A");
//! ```

pub mod value;

pub use value::DataValue;
