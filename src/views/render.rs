// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! List-entry markup and marker popup options for a workout.

use crate::config::Config;
use crate::models::{Workout, WorkoutKind, WorkoutType};
use crate::views::PopupOptions;
use std::fmt::Write;

/// Render the `<li>` list entry for a workout.
///
/// The entry carries `data-id` so list clicks can be mapped back to the
/// workout.
pub fn render_workout_item(workout: &Workout) -> String {
    let workout_type = workout.workout_type();
    let mut html = format!(
        "<li class=\"workout workout--{}\" data-id=\"{}\">\n  <h2 class=\"workout__title\">{} {}</h2>\n",
        workout_type.as_str(),
        workout.id(),
        workout_type.label(),
        workout.description(),
    );

    let distance_icon = match workout_type {
        WorkoutType::Running => "🏃‍♂️",
        WorkoutType::Cycling => "🚴‍♀️",
    };
    push_detail(
        &mut html,
        distance_icon,
        &format_number(workout.distance_km()),
        "km",
    );
    push_detail(
        &mut html,
        "⏱",
        &format_number(workout.duration_min()),
        "min",
    );

    match *workout.kind() {
        WorkoutKind::Running {
            elevation_gain,
            pace,
        } => {
            push_detail(&mut html, "⚡️", &format!("{:.1}", pace), "min/km");
            push_detail(&mut html, "⛰", &format_number(elevation_gain), "m");
        }
        WorkoutKind::Cycling { cadence, speed } => {
            push_detail(&mut html, "⚡️", &format!("{:.1}", speed), "km/h");
            push_detail(&mut html, "🦶🏼", &format_number(cadence), "rpm");
        }
    }

    html.push_str("</li>\n");
    html
}

fn push_detail(html: &mut String, icon: &str, value: &str, unit: &str) {
    // Writing to a String cannot fail
    let _ = write!(
        html,
        "  <div class=\"workout__details\">\n    <span class=\"workout__icon\">{}</span>\n    <span class=\"workout__value\">{}</span>\n    <span class=\"workout__unit\">{}</span>\n  </div>\n",
        icon, value, unit
    );
}

/// Shortest representation of a number (`10`, `2.5`).
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Popup options for a marker of the given workout type.
pub fn popup_options(workout_type: WorkoutType, config: &Config) -> PopupOptions {
    PopupOptions {
        max_width: config.popup_max_width,
        min_width: config.popup_min_width,
        auto_close: false,
        close_on_click: false,
        class_name: workout_type.popup_class(),
    }
}
