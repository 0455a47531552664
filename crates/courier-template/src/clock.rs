/*
 * clock.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Clock abstraction for the wall-clock seed variables.
//!
//! `current_date`, `current_time`, `year`, `month`, and `day` are derived
//! from local wall-clock time, read once per table build. Two calls at
//! different instants may legitimately render different outputs; the trait
//! exists so tests can pin the instant.

use chrono::{Local, NaiveDateTime};

/// Source of the local wall-clock time for seed variables.
pub trait Clock: Send + Sync {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The production clock: reads the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a fixed instant, for deterministic rendering and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        FixedClock { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }
}
