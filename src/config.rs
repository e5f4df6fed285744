// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs.

use crate::models::{Coordinates, DayField};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// OpenStreetMap raster tiles.
pub const DEFAULT_TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the OpenStreetMap tile usage policy.
pub const DEFAULT_TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Map ---
    /// Zoom level used for the initial view and for re-centering
    pub map_zoom_level: u8,
    /// Tile layer URL template (`{s}`, `{z}`, `{x}`, `{y}` placeholders)
    pub tile_url_template: String,
    /// Tile layer attribution HTML
    pub tile_attribution: String,
    /// Duration of the animated pan when re-centering on a workout
    pub pan_duration_secs: f64,

    // --- Popups ---
    pub popup_max_width: u32,
    pub popup_min_width: u32,

    // --- Form ---
    /// Delay before the hidden form gets its grid layout back
    pub form_restore_delay: Duration,

    // --- Descriptions ---
    /// Which date field follows the month name in workout descriptions
    pub description_day_field: DayField,

    // --- Headless geolocation ---
    /// Position reported by the headless geolocation surface (None = denied)
    pub home_position: Option<Coordinates>,
    /// Delay before the headless geolocation result is delivered
    pub geolocation_latency: Duration,

    // --- Logging ---
    /// Emit JSON log lines (otherwise compact human-readable output)
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map_zoom_level: 13,
            tile_url_template: DEFAULT_TILE_URL_TEMPLATE.to_string(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
            pan_duration_secs: 1.0,
            popup_max_width: 300,
            popup_min_width: 100,
            form_restore_delay: Duration::from_millis(1000),
            description_day_field: DayField::DayOfMonth,
            home_position: None,
            geolocation_latency: Duration::ZERO,
            log_json: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let home_position = match (
            optional_var::<f64>("HOME_LATITUDE")?,
            optional_var::<f64>("HOME_LONGITUDE")?,
        ) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    name: "HOME_LATITUDE/HOME_LONGITUDE",
                    reason: "both must be set together".to_string(),
                })
            }
        };

        let description_day_field = match env::var("DESCRIPTION_DAY_FIELD") {
            Ok(value) => value.parse().map_err(|reason| ConfigError::Invalid {
                name: "DESCRIPTION_DAY_FIELD",
                reason,
            })?,
            Err(_) => defaults.description_day_field,
        };

        Ok(Self {
            map_zoom_level: optional_var("MAP_ZOOM_LEVEL")?.unwrap_or(defaults.map_zoom_level),
            tile_url_template: env::var("TILE_URL_TEMPLATE")
                .unwrap_or(defaults.tile_url_template),
            tile_attribution: env::var("TILE_ATTRIBUTION").unwrap_or(defaults.tile_attribution),
            pan_duration_secs: optional_var("PAN_DURATION_SECS")?
                .unwrap_or(defaults.pan_duration_secs),
            popup_max_width: optional_var("POPUP_MAX_WIDTH")?.unwrap_or(defaults.popup_max_width),
            popup_min_width: optional_var("POPUP_MIN_WIDTH")?.unwrap_or(defaults.popup_min_width),
            form_restore_delay: optional_var("FORM_RESTORE_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.form_restore_delay),
            description_day_field,
            home_position,
            geolocation_latency: optional_var("GEOLOCATION_LATENCY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.geolocation_latency),
            log_json: env::var("LOG_FORMAT")
                .map(|v| !v.trim().eq_ignore_ascii_case("pretty"))
                .unwrap_or(defaults.log_json),
        })
    }
}

/// Read and parse an optional environment variable.
fn optional_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name,
                reason: format!("could not parse {:?}", raw),
            }),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
