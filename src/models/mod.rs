// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod event;
pub mod form;
pub mod stats;
pub mod workout;

pub use event::{AppEvent, FormTicket};
pub use form::{all_positive_finite, coerce_number, FormFields, SecondaryField, WorkoutDraft};
pub use stats::SessionStats;
pub use workout::{
    describe, Coordinates, DayField, IdGenerator, Workout, WorkoutFactory, WorkoutId, WorkoutKind,
    WorkoutType,
};
