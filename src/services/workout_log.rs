// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout log controller.
//!
//! Owns the session's workouts and keeps three views in step with them:
//! the in-memory list, the rendered list entries, and the map markers.
//! Every handler runs to completion; failures become alerts or log lines
//! and never propagate past the handler.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    AppEvent, Coordinates, FormFields, FormTicket, Workout, WorkoutDraft, WorkoutFactory,
    WorkoutId, WorkoutType,
};
use crate::views::render::{popup_options, render_workout_item};
use crate::views::{PanOptions, Surfaces, TileLayer};
use std::collections::BTreeMap;

/// Visibility of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Hidden,
    Visible,
}

/// The map location captured by a click, bound to the form opening it
/// produced. Each opening keeps its own location until it is submitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingEntry {
    pub ticket: FormTicket,
    pub location: Coordinates,
}

/// Outcome of a form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(WorkoutId),
    Rejected,
    Ignored,
}

pub struct WorkoutLog {
    surfaces: Surfaces,
    config: Config,
    factory: WorkoutFactory,
    workouts: Vec<Workout>,
    map_loaded: bool,
    /// Location of every form opening not yet submitted, by ticket
    open_forms: BTreeMap<FormTicket, Coordinates>,
    /// The opening currently on screen
    shown: Option<FormTicket>,
    last_ticket: u64,
    form_state: FormState,
    selected_type: WorkoutType,
}

impl WorkoutLog {
    pub fn new(config: Config, surfaces: Surfaces) -> Self {
        Self {
            surfaces,
            factory: WorkoutFactory::new(config.description_day_field),
            config,
            workouts: Vec::new(),
            map_loaded: false,
            open_forms: BTreeMap::new(),
            shown: None,
            last_ticket: 0,
            form_state: FormState::Hidden,
            selected_type: WorkoutType::Running,
        }
    }

    /// Workouts in creation order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn form_state(&self) -> FormState {
        self.form_state
    }

    /// The opening currently on screen, if any.
    pub fn pending(&self) -> Option<PendingEntry> {
        self.shown.and_then(|ticket| self.entry(ticket))
    }

    /// Every opening still waiting for a submission, oldest first.
    pub fn open_forms(&self) -> Vec<PendingEntry> {
        self.open_forms
            .iter()
            .map(|(&ticket, &location)| PendingEntry { ticket, location })
            .collect()
    }

    fn entry(&self, ticket: FormTicket) -> Option<PendingEntry> {
        self.open_forms
            .get(&ticket)
            .map(|&location| PendingEntry { ticket, location })
    }

    pub fn map_loaded(&self) -> bool {
        self.map_loaded
    }

    pub fn selected_type(&self) -> WorkoutType {
        self.selected_type
    }

    /// Ask for the current position; the map loads once it arrives.
    pub fn start(&mut self) {
        tracing::debug!("Requesting current position");
        self.surfaces.geolocation.request_position();
    }

    /// Dispatch one event to its handler.
    pub fn handle(&mut self, event: AppEvent) {
        tracing::trace!(event = event.name(), "Handling event");
        match event {
            AppEvent::GeolocationResolved { position } => self.on_geolocation_resolved(position),
            AppEvent::GeolocationFailed => self.on_geolocation_failed(),
            AppEvent::MapClicked { location } => self.on_map_clicked(location),
            AppEvent::FormSubmitted { ticket, fields } => {
                self.on_form_submitted(ticket, &fields);
            }
            AppEvent::WorkoutTypeChanged { value } => self.on_workout_type_changed(&value),
            AppEvent::WorkoutListClicked { item_id } => {
                self.on_workout_list_clicked(item_id.as_ref())
            }
            AppEvent::FormLayoutRestored => self.on_form_layout_restored(),
        }
    }

    pub fn on_geolocation_resolved(&mut self, position: Coordinates) {
        if self.map_loaded {
            tracing::debug!("Map already loaded, ignoring repeated position");
            return;
        }

        tracing::info!(
            latitude = position.latitude,
            longitude = position.longitude,
            zoom = self.config.map_zoom_level,
            "Loading map"
        );

        let map = &mut self.surfaces.map;
        map.create_view(position, self.config.map_zoom_level);
        map.add_tile_layer(&TileLayer {
            url_template: self.config.tile_url_template.clone(),
            attribution: self.config.tile_attribution.clone(),
        });
        map.enable_click_events();
        self.map_loaded = true;
    }

    pub fn on_geolocation_failed(&mut self) {
        let err = AppError::GeolocationUnavailable;
        tracing::warn!(error = %err, "Continuing without a map");
        self.surfaces.notifier.alert(&err.user_message());
    }

    pub fn on_map_clicked(&mut self, location: Coordinates) {
        if !self.map_loaded {
            tracing::debug!("Map click before map load, ignoring");
            return;
        }

        self.last_ticket += 1;
        let ticket = FormTicket(self.last_ticket);
        self.open_forms.insert(ticket, location);
        if let Some(previous) = self.shown.replace(ticket) {
            tracing::debug!(previous = %previous, %ticket, "Form re-anchored to new location");
        }

        self.surfaces.form.show(ticket);
        self.surfaces.form.focus_distance();
        self.form_state = FormState::Visible;
    }

    /// Validate the form and log a workout at the location its opening was
    /// made for. Without a ticket the opening on screen is assumed.
    pub fn on_form_submitted(
        &mut self,
        ticket: Option<FormTicket>,
        fields: &FormFields,
    ) -> SubmitOutcome {
        let Some(pending) = ticket.or(self.shown).and_then(|t| self.entry(t)) else {
            tracing::debug!(ticket = ?ticket, "Form submitted without an open location, ignoring");
            return SubmitOutcome::Ignored;
        };

        match self.create_workout(pending, fields) {
            Ok(id) => SubmitOutcome::Created(id),
            Err(err) => {
                tracing::info!(error = %err, "Rejected form submission");
                self.surfaces.notifier.alert(&err.user_message());
                SubmitOutcome::Rejected
            }
        }
    }

    fn create_workout(&mut self, pending: PendingEntry, fields: &FormFields) -> Result<WorkoutId> {
        let draft = WorkoutDraft::from_fields(fields)?;
        let workout = self.factory.create_from_draft(pending.location, &draft);
        let id = workout.id().clone();

        tracing::info!(
            workout_id = %id,
            ticket = %pending.ticket,
            workout_type = %workout.workout_type(),
            distance_km = workout.distance_km(),
            duration_min = workout.duration_min(),
            "Workout logged"
        );

        self.render_list_entry(&workout);
        self.render_marker(&workout);
        self.workouts.push(workout);
        self.open_forms.remove(&pending.ticket);

        // An older opening leaves the form on screen alone.
        if self.shown == Some(pending.ticket) {
            self.hide_form();
        }

        Ok(id)
    }

    fn render_list_entry(&mut self, workout: &Workout) {
        let html = render_workout_item(workout);
        self.surfaces.list.append_html(workout.id(), &html);
    }

    fn render_marker(&mut self, workout: &Workout) {
        let map = &mut self.surfaces.map;
        let marker = map.add_marker(workout.coordinates());
        map.bind_popup(
            marker,
            &popup_options(workout.workout_type(), &self.config),
        );
        map.set_popup_content(marker, workout.description());
        map.open_popup(marker);
    }

    fn hide_form(&mut self) {
        let form = &mut self.surfaces.form;
        form.clear_inputs();
        form.hide();
        self.surfaces
            .scheduler
            .schedule(self.config.form_restore_delay, AppEvent::FormLayoutRestored);
        self.shown = None;
        self.form_state = FormState::Hidden;
    }

    pub fn on_workout_type_changed(&mut self, value: &str) {
        match value.parse::<WorkoutType>() {
            Ok(workout_type) => {
                self.selected_type = workout_type;
                self.surfaces
                    .form
                    .set_secondary_field(workout_type.secondary_field());
            }
            Err(err) => tracing::debug!(error = %err, "Ignoring type change"),
        }
    }

    /// Re-center the map on the clicked workout.
    pub fn on_workout_list_clicked(&mut self, item_id: Option<&WorkoutId>) {
        let Some(item_id) = item_id else {
            return;
        };

        let Some(workout) = self.workouts.iter().find(|w| w.id() == item_id) else {
            tracing::debug!(workout_id = %item_id, "No workout for list item");
            return;
        };

        self.surfaces.map.set_view(
            workout.coordinates(),
            self.config.map_zoom_level,
            &PanOptions {
                animate: true,
                duration_secs: self.config.pan_duration_secs,
            },
        );
    }

    pub fn on_form_layout_restored(&mut self) {
        self.surfaces.form.restore_layout();
    }
}
