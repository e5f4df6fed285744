// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! UI surfaces the controller drives.
//!
//! The map widget, entry form, rendered list, alerts, geolocation and
//! timers are reached only through these traits, so the controller runs
//! the same against a browser binding or the headless recorders in
//! [`headless`].

pub mod headless;
pub mod render;

use crate::models::{AppEvent, Coordinates, FormTicket, SecondaryField, WorkoutId};
use serde::Serialize;
use std::time::Duration;

/// Base tile layer of the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

/// Options for re-centering the map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanOptions {
    pub animate: bool,
    pub duration_secs: f64,
}

/// Popup options for a workout marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

/// Handle of a marker placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MarkerHandle(pub usize);

/// The map widget.
pub trait MapView {
    fn create_view(&mut self, center: Coordinates, zoom: u8);
    fn add_tile_layer(&mut self, layer: &TileLayer);
    /// Start delivering `AppEvent::MapClicked` for clicks on the map.
    fn enable_click_events(&mut self);
    fn set_view(&mut self, center: Coordinates, zoom: u8, options: &PanOptions);
    fn add_marker(&mut self, at: Coordinates) -> MarkerHandle;
    fn bind_popup(&mut self, marker: MarkerHandle, options: &PopupOptions);
    fn set_popup_content(&mut self, marker: MarkerHandle, content: &str);
    fn open_popup(&mut self, marker: MarkerHandle);
}

/// The workout entry form.
pub trait EntryForm {
    /// Reveal the form for a new entry.
    fn show(&mut self, ticket: FormTicket);
    fn focus_distance(&mut self);
    /// Show `field`'s row and hide the other secondary row.
    fn set_secondary_field(&mut self, field: SecondaryField);
    /// Empty and blur every numeric input.
    fn clear_inputs(&mut self);
    /// Hide the form immediately, dropping its layout.
    fn hide(&mut self);
    /// Give the hidden form its layout back so the next reveal animates.
    fn restore_layout(&mut self);
}

/// The rendered workout list. Append-only.
pub trait WorkoutList {
    fn append_html(&mut self, id: &WorkoutId, html: &str);
}

/// Blocking user-facing alerts.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// One-shot position lookup. The outcome arrives later as
/// `AppEvent::GeolocationResolved` or `AppEvent::GeolocationFailed`.
pub trait Geolocation {
    fn request_position(&mut self);
}

/// Delivers an event back to the controller after a delay.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, event: AppEvent);
}

/// Every surface the controller needs, injected at construction.
pub struct Surfaces {
    pub map: Box<dyn MapView>,
    pub form: Box<dyn EntryForm>,
    pub list: Box<dyn WorkoutList>,
    pub notifier: Box<dyn Notifier>,
    pub geolocation: Box<dyn Geolocation>,
    pub scheduler: Box<dyn Scheduler>,
}
