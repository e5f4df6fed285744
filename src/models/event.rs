// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Events delivered to the workout log controller.

use crate::models::{Coordinates, FormFields, WorkoutId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one opening of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormTicket(pub u64);

impl fmt::Display for FormTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A UI or runtime event.
///
/// Serialized with a `"type"` tag, e.g.
/// `{"type": "map_clicked", "location": {"latitude": 1.0, "longitude": 2.0}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// The one-shot position request succeeded.
    GeolocationResolved { position: Coordinates },
    /// The position request was denied or is unavailable.
    GeolocationFailed,
    /// The user clicked the map.
    MapClicked { location: Coordinates },
    /// The entry form was submitted. `ticket` names the form opening the
    /// values belong to; without one the current opening is assumed.
    FormSubmitted {
        #[serde(default)]
        ticket: Option<FormTicket>,
        fields: FormFields,
    },
    /// The workout type selector changed.
    WorkoutTypeChanged { value: String },
    /// The rendered list was clicked. `item_id` is the `data-id` of the
    /// enclosing list item, if the click landed inside one.
    WorkoutListClicked {
        #[serde(default)]
        item_id: Option<WorkoutId>,
    },
    /// The hidden form may get its layout back.
    FormLayoutRestored,
}

impl AppEvent {
    /// Short name for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::GeolocationResolved { .. } => "geolocation_resolved",
            AppEvent::GeolocationFailed => "geolocation_failed",
            AppEvent::MapClicked { .. } => "map_clicked",
            AppEvent::FormSubmitted { .. } => "form_submitted",
            AppEvent::WorkoutTypeChanged { .. } => "workout_type_changed",
            AppEvent::WorkoutListClicked { .. } => "workout_list_clicked",
            AppEvent::FormLayoutRestored => "form_layout_restored",
        }
    }
}
