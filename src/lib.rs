// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker: log runs and rides by clicking where they happened.
//!
//! The crate holds the workout model, the controller that keeps the
//! workout list, its rendered entries and the map markers in step, and the
//! trait surfaces (map, form, list, alerts, geolocation, timers) the
//! controller drives. Headless surfaces and a tokio event loop let whole
//! sessions run without a browser.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod views;

use config::Config;
use services::{EventLoop, WorkoutLog};
use views::headless::HeadlessUi;

/// A controller wired to headless surfaces and an event loop.
pub struct HeadlessSession {
    pub log: WorkoutLog,
    pub ui: HeadlessUi,
    pub event_loop: EventLoop,
}

impl HeadlessSession {
    pub fn new(config: Config) -> Self {
        let ui = HeadlessUi::new();
        let event_loop = EventLoop::new();
        let surfaces = ui.surfaces_with(
            Box::new(event_loop.geolocation(&config)),
            Box::new(event_loop.scheduler()),
        );

        Self {
            log: WorkoutLog::new(config, surfaces),
            ui,
            event_loop,
        }
    }
}
