// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - controller, event loop and export.

pub mod export;
pub mod runtime;
pub mod workout_log;

pub use export::{to_feature_collection, to_geojson_string, Snapshot};
pub use runtime::{load_script, DeferredQueue, EventLoop, ScriptStep};
pub use workout_log::{FormState, PendingEntry, SubmitOutcome, WorkoutLog};
