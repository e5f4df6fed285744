// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Headless surfaces that record what the controller asked them to do.
//!
//! Used by the command-line driver and by tests. Every clone of a
//! [`HeadlessUi`] shares the same recorded state.

use crate::models::{AppEvent, Coordinates, FormTicket, SecondaryField, WorkoutId};
use crate::views::{
    EntryForm, Geolocation, MapView, MarkerHandle, Notifier, PanOptions, PopupOptions, Scheduler,
    Surfaces, TileLayer, WorkoutList,
};
use serde::Serialize;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Recorded state of the map widget.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordedMap {
    pub center: Option<Coordinates>,
    pub zoom: Option<u8>,
    pub tile_layer: Option<TileLayer>,
    pub click_events_enabled: bool,
    pub view_changes: Vec<RecordedViewChange>,
    pub markers: Vec<RecordedMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedViewChange {
    pub center: Coordinates,
    pub zoom: u8,
    pub options: PanOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedMarker {
    pub at: Coordinates,
    pub popup: Option<PopupOptions>,
    pub content: String,
    pub popup_open: bool,
}

/// CSS `display` of the form element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormDisplay {
    #[default]
    Grid,
    None,
}

/// Recorded state of the entry form.
#[derive(Debug, Clone, Serialize)]
pub struct RecordedForm {
    /// False while the form carries the `hidden` class
    pub visible: bool,
    pub display: FormDisplay,
    pub ticket: Option<FormTicket>,
    pub distance_focused: bool,
    pub secondary_field: SecondaryField,
    pub times_cleared: u32,
}

impl Default for RecordedForm {
    fn default() -> Self {
        Self {
            visible: false,
            display: FormDisplay::Grid,
            ticket: None,
            distance_focused: false,
            secondary_field: SecondaryField::Elevation,
            times_cleared: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub id: WorkoutId,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedSchedule {
    pub delay_ms: u64,
    pub event: AppEvent,
}

/// Everything the headless surfaces have recorded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UiState {
    pub map: RecordedMap,
    pub form: RecordedForm,
    pub list: Vec<ListEntry>,
    pub alerts: Vec<String>,
    pub position_requests: u32,
    pub scheduled: Vec<RecordedSchedule>,
}

/// Shared handle to a set of recording surfaces.
#[derive(Debug, Clone, Default)]
pub struct HeadlessUi {
    state: Rc<RefCell<UiState>>,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surfaces that record everything, including geolocation requests and
    /// scheduled events (which are never delivered).
    pub fn surfaces(&self) -> Surfaces {
        self.surfaces_with(Box::new(self.clone()), Box::new(self.clone()))
    }

    /// Recording map, form, list and alerts, with the given geolocation and
    /// scheduler.
    pub fn surfaces_with(
        &self,
        geolocation: Box<dyn Geolocation>,
        scheduler: Box<dyn Scheduler>,
    ) -> Surfaces {
        Surfaces {
            map: Box::new(self.clone()),
            form: Box::new(self.clone()),
            list: Box::new(self.clone()),
            notifier: Box::new(self.clone()),
            geolocation,
            scheduler,
        }
    }

    pub fn state(&self) -> Ref<'_, UiState> {
        self.state.borrow()
    }

    /// Owned copy of the recorded state.
    pub fn snapshot(&self) -> UiState {
        self.state.borrow().clone()
    }

    fn marker_mut<F: FnOnce(&mut RecordedMarker)>(&self, marker: MarkerHandle, f: F) {
        match self.state.borrow_mut().map.markers.get_mut(marker.0) {
            Some(recorded) => f(recorded),
            None => tracing::warn!(marker = marker.0, "Unknown marker handle"),
        }
    }
}

impl MapView for HeadlessUi {
    fn create_view(&mut self, center: Coordinates, zoom: u8) {
        let mut state = self.state.borrow_mut();
        state.map.center = Some(center);
        state.map.zoom = Some(zoom);
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.state.borrow_mut().map.tile_layer = Some(layer.clone());
    }

    fn enable_click_events(&mut self) {
        self.state.borrow_mut().map.click_events_enabled = true;
    }

    fn set_view(&mut self, center: Coordinates, zoom: u8, options: &PanOptions) {
        let mut state = self.state.borrow_mut();
        state.map.center = Some(center);
        state.map.zoom = Some(zoom);
        state.map.view_changes.push(RecordedViewChange {
            center,
            zoom,
            options: *options,
        });
    }

    fn add_marker(&mut self, at: Coordinates) -> MarkerHandle {
        let mut state = self.state.borrow_mut();
        state.map.markers.push(RecordedMarker {
            at,
            popup: None,
            content: String::new(),
            popup_open: false,
        });
        MarkerHandle(state.map.markers.len() - 1)
    }

    fn bind_popup(&mut self, marker: MarkerHandle, options: &PopupOptions) {
        self.marker_mut(marker, |m| m.popup = Some(options.clone()));
    }

    fn set_popup_content(&mut self, marker: MarkerHandle, content: &str) {
        self.marker_mut(marker, |m| m.content = content.to_string());
    }

    fn open_popup(&mut self, marker: MarkerHandle) {
        self.marker_mut(marker, |m| m.popup_open = true);
    }
}

impl EntryForm for HeadlessUi {
    fn show(&mut self, ticket: FormTicket) {
        let mut state = self.state.borrow_mut();
        state.form.visible = true;
        state.form.ticket = Some(ticket);
    }

    fn focus_distance(&mut self) {
        self.state.borrow_mut().form.distance_focused = true;
    }

    fn set_secondary_field(&mut self, field: SecondaryField) {
        self.state.borrow_mut().form.secondary_field = field;
    }

    fn clear_inputs(&mut self) {
        let mut state = self.state.borrow_mut();
        state.form.times_cleared += 1;
        state.form.distance_focused = false;
    }

    fn hide(&mut self) {
        let mut state = self.state.borrow_mut();
        state.form.visible = false;
        state.form.display = FormDisplay::None;
        state.form.ticket = None;
    }

    fn restore_layout(&mut self) {
        self.state.borrow_mut().form.display = FormDisplay::Grid;
    }
}

impl WorkoutList for HeadlessUi {
    fn append_html(&mut self, id: &WorkoutId, html: &str) {
        self.state.borrow_mut().list.push(ListEntry {
            id: id.clone(),
            html: html.to_string(),
        });
    }
}

impl Notifier for HeadlessUi {
    fn alert(&mut self, message: &str) {
        tracing::info!(message, "Alert");
        self.state.borrow_mut().alerts.push(message.to_string());
    }
}

impl Geolocation for HeadlessUi {
    fn request_position(&mut self) {
        self.state.borrow_mut().position_requests += 1;
    }
}

impl Scheduler for HeadlessUi {
    fn schedule(&mut self, delay: Duration, event: AppEvent) {
        self.state.borrow_mut().scheduled.push(RecordedSchedule {
            delay_ms: delay.as_millis() as u64,
            event,
        });
    }
}
