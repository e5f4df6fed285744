// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use workout_tracker::config::Config;
use workout_tracker::models::{AppEvent, Coordinates, FormFields};
use workout_tracker::services::WorkoutLog;
use workout_tracker::views::headless::HeadlessUi;

/// Where the test map starts.
#[allow(dead_code)]
pub const HOME: Coordinates = Coordinates {
    latitude: 37.39,
    longitude: -122.08,
};

/// Create a controller on headless surfaces with the map already loaded.
#[allow(dead_code)]
pub fn loaded_log() -> (WorkoutLog, HeadlessUi) {
    let ui = HeadlessUi::new();
    let mut log = WorkoutLog::new(Config::default(), ui.surfaces());
    log.handle(AppEvent::GeolocationResolved { position: HOME });
    (log, ui)
}

#[allow(dead_code)]
pub fn running_fields(distance: &str, duration: &str, elevation: &str) -> FormFields {
    FormFields {
        workout_type: "running".to_string(),
        distance: distance.to_string(),
        duration: duration.to_string(),
        elevation: elevation.to_string(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn cycling_fields(distance: &str, duration: &str, cadence: &str) -> FormFields {
    FormFields {
        workout_type: "cycling".to_string(),
        distance: distance.to_string(),
        duration: duration.to_string(),
        cadence: cadence.to_string(),
        ..Default::default()
    }
}

/// Click the map at `location`, then submit `fields` for that opening.
#[allow(dead_code)]
pub fn log_at(log: &mut WorkoutLog, location: Coordinates, fields: FormFields) {
    log.handle(AppEvent::MapClicked { location });
    log.handle(AppEvent::FormSubmitted {
        ticket: None,
        fields,
    });
}
