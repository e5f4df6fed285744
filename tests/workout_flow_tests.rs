// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end controller flows on headless surfaces: map load, form
//! submission, rendering and markers.

mod common;

use common::{cycling_fields, loaded_log, log_at, running_fields, HOME};
use std::time::Duration;
use workout_tracker::config::{Config, DEFAULT_TILE_URL_TEMPLATE};
use workout_tracker::error::AppError;
use workout_tracker::models::{AppEvent, Coordinates, FormTicket, WorkoutType};
use workout_tracker::services::{FormState, WorkoutLog};
use workout_tracker::views::headless::{FormDisplay, HeadlessUi};

#[test]
fn test_geolocation_loads_map() {
    let (log, ui) = loaded_log();
    let state = ui.state();

    assert!(log.map_loaded());
    assert_eq!(state.map.center, Some(HOME));
    assert_eq!(state.map.zoom, Some(13));
    assert!(state.map.click_events_enabled);
    assert_eq!(
        state.map.tile_layer.as_ref().map(|t| t.url_template.as_str()),
        Some(DEFAULT_TILE_URL_TEMPLATE)
    );
    assert!(state.alerts.is_empty());
}

#[test]
fn test_geolocation_failure_alerts_and_leaves_map_unloaded() {
    let ui = HeadlessUi::new();
    let mut log = WorkoutLog::new(Config::default(), ui.surfaces());
    log.handle(AppEvent::GeolocationFailed);
    log.handle(AppEvent::MapClicked {
        location: Coordinates::new(1.0, 1.0),
    });

    let state = ui.state();
    assert_eq!(state.alerts, vec![AppError::GEOLOCATION_MESSAGE.to_string()]);
    assert!(!log.map_loaded());
    assert!(state.map.center.is_none());
    assert!(!state.form.visible);
    assert!(log.pending().is_none());
}

#[test]
fn test_map_click_reveals_form() {
    let (mut log, ui) = loaded_log();
    let spot = Coordinates::new(37.4, -122.1);
    log.handle(AppEvent::MapClicked { location: spot });

    assert_eq!(log.form_state(), FormState::Visible);
    assert_eq!(log.pending().map(|p| p.location), Some(spot));
    let state = ui.state();
    assert!(state.form.visible);
    assert!(state.form.distance_focused);
}

#[test]
fn test_running_submission_pace() {
    let (mut log, ui) = loaded_log();
    let spot = Coordinates::new(23.0, 10.0);
    log_at(&mut log, spot, running_fields("20", "10", "30"));

    assert_eq!(log.workouts().len(), 1);
    let run = &log.workouts()[0];
    assert_eq!(run.workout_type(), WorkoutType::Running);
    assert_eq!(run.pace(), Some(0.5));
    assert_eq!(run.coordinates(), spot);

    let state = ui.state();
    assert_eq!(state.list.len(), 1);
    assert_eq!(&state.list[0].id, run.id());
    assert!(state.list[0].html.contains("0.5"));
}

#[test]
fn test_cycling_submission_speed() {
    let (mut log, _ui) = loaded_log();
    log_at(
        &mut log,
        Coordinates::new(25.0, 24.0),
        cycling_fields("50", "40", "60"),
    );

    let ride = &log.workouts()[0];
    assert_eq!(ride.workout_type(), WorkoutType::Cycling);
    assert_eq!(ride.speed(), Some(75.0));
}

#[test]
fn test_marker_contract() {
    let (mut log, ui) = loaded_log();
    let spot = Coordinates::new(25.0, 24.0);
    log_at(&mut log, spot, cycling_fields("50", "40", "60"));

    let state = ui.state();
    assert_eq!(state.map.markers.len(), 1);
    let marker = &state.map.markers[0];
    assert_eq!(marker.at, spot);
    assert_eq!(marker.content, log.workouts()[0].description());
    assert!(marker.popup_open);

    let popup = marker.popup.as_ref().expect("popup bound");
    assert_eq!(popup.class_name, "cycling-popup");
    assert!(!popup.auto_close);
    assert!(!popup.close_on_click);
}

#[test]
fn test_successful_submit_hides_form_and_schedules_restore() {
    let (mut log, ui) = loaded_log();
    log_at(
        &mut log,
        Coordinates::new(1.0, 1.0),
        running_fields("5", "25", "10"),
    );

    assert_eq!(log.form_state(), FormState::Hidden);
    assert!(log.pending().is_none());

    let state = ui.state();
    assert!(!state.form.visible);
    assert_eq!(state.form.display, FormDisplay::None);
    assert_eq!(state.form.times_cleared, 1);
    assert_eq!(state.scheduled.len(), 1);
    assert_eq!(
        state.scheduled[0].delay_ms,
        Duration::from_secs(1).as_millis() as u64
    );
    assert_eq!(state.scheduled[0].event, AppEvent::FormLayoutRestored);
}

#[test]
fn test_layout_restore_keeps_form_hidden() {
    let (mut log, ui) = loaded_log();
    log_at(
        &mut log,
        Coordinates::new(1.0, 1.0),
        running_fields("5", "25", "10"),
    );
    log.handle(AppEvent::FormLayoutRestored);

    let state = ui.state();
    assert_eq!(state.form.display, FormDisplay::Grid);
    assert!(!state.form.visible);
    assert_eq!(log.form_state(), FormState::Hidden);
}

#[test]
fn test_invalid_submission_alerts_and_keeps_form_open() {
    let (mut log, ui) = loaded_log();
    log.handle(AppEvent::MapClicked {
        location: Coordinates::new(1.0, 1.0),
    });

    for fields in [
        running_fields("0", "25", "10"),
        running_fields("5", "-25", "10"),
        running_fields("5", "25", ""),
        cycling_fields("5", "25", "abc"),
    ] {
        log.handle(AppEvent::FormSubmitted {
            ticket: None,
            fields,
        });
    }

    assert!(log.workouts().is_empty());
    assert_eq!(log.form_state(), FormState::Visible);
    assert!(log.pending().is_some());

    let state = ui.state();
    assert_eq!(state.alerts.len(), 4);
    assert!(state
        .alerts
        .iter()
        .all(|a| a == AppError::INVALID_INPUT_MESSAGE));
    assert!(state.list.is_empty());
    assert!(state.map.markers.is_empty());
    assert!(state.form.visible);
}

#[test]
fn test_unknown_type_alerts() {
    let (mut log, ui) = loaded_log();
    let mut fields = running_fields("5", "25", "10");
    fields.workout_type = "swimming".to_string();
    log_at(&mut log, Coordinates::new(1.0, 1.0), fields);

    assert!(log.workouts().is_empty());
    assert_eq!(ui.state().alerts, vec!["Unknown workout type: swimming"]);
}

#[test]
fn test_submit_without_map_click_is_noop() {
    let (mut log, ui) = loaded_log();
    log.handle(AppEvent::FormSubmitted {
        ticket: None,
        fields: running_fields("5", "25", "10"),
    });

    assert!(log.workouts().is_empty());
    assert!(ui.state().alerts.is_empty());
}

#[test]
fn test_n_submissions_stay_in_sync() {
    let (mut log, ui) = loaded_log();
    let n = 7;
    for i in 0..n {
        let spot = Coordinates::new(37.0 + i as f64 * 0.01, -122.0);
        if i % 2 == 0 {
            log_at(&mut log, spot, running_fields("5", "25", "10"));
        } else {
            log_at(&mut log, spot, cycling_fields("20", "45", "80"));
        }
    }

    let state = ui.state();
    assert_eq!(log.workouts().len(), n);
    assert_eq!(state.list.len(), n);
    assert_eq!(state.map.markers.len(), n);

    for (i, workout) in log.workouts().iter().enumerate() {
        assert_eq!(workout.coordinates().latitude, 37.0 + i as f64 * 0.01);
        assert_eq!(&state.list[i].id, workout.id());
        assert_eq!(state.map.markers[i].at, workout.coordinates());
    }
}

#[test]
fn test_older_form_logs_at_its_own_location() {
    let (mut log, ui) = loaded_log();
    let first = Coordinates::new(1.0, 1.0);
    let second = Coordinates::new(2.0, 2.0);

    log.handle(AppEvent::MapClicked { location: first });
    log.handle(AppEvent::MapClicked { location: second });

    log.handle(AppEvent::FormSubmitted {
        ticket: Some(FormTicket(1)),
        fields: running_fields("5", "25", "10"),
    });
    assert_eq!(log.workouts().len(), 1);
    assert_eq!(log.workouts()[0].coordinates(), first);
    assert_eq!(ui.state().map.markers[0].at, first);
    assert!(ui.state().alerts.is_empty());
    // The form opened for the second click is still on screen
    assert_eq!(log.form_state(), FormState::Visible);
    assert!(ui.state().form.visible);

    log.handle(AppEvent::FormSubmitted {
        ticket: Some(FormTicket(2)),
        fields: cycling_fields("20", "45", "80"),
    });
    assert_eq!(log.workouts().len(), 2);
    assert_eq!(log.workouts()[1].coordinates(), second);
    assert_eq!(log.form_state(), FormState::Hidden);
    assert!(log.open_forms().is_empty());
}

#[test]
fn test_ticketless_submit_uses_form_on_screen() {
    let (mut log, _ui) = loaded_log();
    let first = Coordinates::new(1.0, 1.0);
    let second = Coordinates::new(2.0, 2.0);

    log.handle(AppEvent::MapClicked { location: first });
    log.handle(AppEvent::MapClicked { location: second });
    log_submit(&mut log, running_fields("5", "25", "10"));

    assert_eq!(log.workouts()[0].coordinates(), second);

    // The first opening stays addressable by its ticket, but not implicitly
    log_submit(&mut log, running_fields("5", "25", "10"));
    assert_eq!(log.workouts().len(), 1);
    assert_eq!(log.open_forms().len(), 1);
    assert_eq!(log.open_forms()[0].location, first);
}

fn log_submit(log: &mut WorkoutLog, fields: workout_tracker::models::FormFields) {
    log.handle(AppEvent::FormSubmitted {
        ticket: None,
        fields,
    });
}

#[test]
fn test_type_toggle_shows_exactly_one_secondary_field() {
    use workout_tracker::models::SecondaryField;

    let (mut log, ui) = loaded_log();
    for (value, expected) in [
        ("cycling", SecondaryField::Cadence),
        ("running", SecondaryField::Elevation),
        ("running", SecondaryField::Elevation),
        ("cycling", SecondaryField::Cadence),
        ("cycling", SecondaryField::Cadence),
    ] {
        log.handle(AppEvent::WorkoutTypeChanged {
            value: value.to_string(),
        });
        assert_eq!(ui.state().form.secondary_field, expected);
    }
}
