// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout record model: shared base fields plus a per-type payload.

use crate::error::AppError;
use crate::models::form::{DraftDetail, SecondaryField, WorkoutDraft};
use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Ids keep the last 10 decimal digits of the creation time in milliseconds.
const ID_MODULUS: i64 = 10_000_000_000;

/// A (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinates> for geo::Point<f64> {
    fn from(c: Coordinates) -> Self {
        geo::Point::new(c.longitude, c.latitude)
    }
}

impl From<geo::Point<f64>> for Coordinates {
    fn from(p: geo::Point<f64>) -> Self {
        Coordinates::new(p.y(), p.x())
    }
}

/// Opaque workout identifier, unique within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        WorkoutId(s.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates time-derived ids that never repeat within one generator.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive an id from `now_millis`, bumping past the previous id when the
    /// clock has not advanced (or went backwards).
    pub fn next_id(&mut self, now_millis: i64) -> WorkoutId {
        let candidate = now_millis.rem_euclid(ID_MODULUS);
        // `last` keeps counting past the modulus so bumped ids stay unique;
        // only the rendered id wraps.
        let value = match self.last {
            Some(last) if candidate <= last => last + 1,
            _ => candidate,
        };
        self.last = Some(value);
        WorkoutId(format!("{:010}", value.rem_euclid(ID_MODULUS)))
    }
}

/// Which date field follows the month name in a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayField {
    /// Calendar day of the month (1-31).
    #[default]
    DayOfMonth,
    /// Weekday index counted from Sunday (0-6), as older builds displayed.
    Weekday,
}

impl FromStr for DayField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day_of_month" | "day" => Ok(DayField::DayOfMonth),
            "weekday" => Ok(DayField::Weekday),
            other => Err(format!(
                "expected \"day_of_month\" or \"weekday\", got {:?}",
                other
            )),
        }
    }
}

/// Format the display description `"on <Month> <day>"` for a date.
pub fn describe<Tz: TimeZone>(date: &DateTime<Tz>, day_field: DayField) -> String {
    let day = match day_field {
        DayField::DayOfMonth => date.day(),
        DayField::Weekday => date.weekday().num_days_from_sunday(),
    };
    format!("on {} {}", MONTHS[date.month0() as usize], day)
}

/// Workout discriminator tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    /// Capitalized name used in list titles.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    /// CSS class for the map popup.
    pub fn popup_class(&self) -> String {
        format!("{}-popup", self.as_str())
    }

    /// The form field that carries this type's extra metric.
    pub fn secondary_field(&self) -> SecondaryField {
        match self {
            WorkoutType::Running => SecondaryField::Elevation,
            WorkoutType::Cycling => SecondaryField::Cadence,
        }
    }
}

impl FromStr for WorkoutType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            _ => Err(AppError::UnknownWorkoutType(s.to_string())),
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-type payload with the derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WorkoutKind {
    Running {
        /// Elevation gain in meters
        elevation_gain: f64,
        /// Minutes per kilometer
        pace: f64,
    },
    Cycling {
        /// Pedal revolutions per minute
        cadence: f64,
        /// Kilometers per hour
        speed: f64,
    },
}

/// One logged workout. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Workout {
    id: WorkoutId,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    duration_min: f64,
    distance_km: f64,
    description: String,
    #[serde(flatten)]
    kind: WorkoutKind,
}

impl Workout {
    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self.kind {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    /// Minutes per kilometer, for running workouts.
    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Some(pace),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    /// Kilometers per hour, for cycling workouts.
    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { speed, .. } => Some(speed),
            WorkoutKind::Running { .. } => None,
        }
    }
}

/// Builds workouts, assigning ids, timestamps and descriptions.
///
/// Inputs are not validated here; callers check them with
/// [`crate::models::form::all_positive_finite`] first.
#[derive(Debug, Default)]
pub struct WorkoutFactory {
    ids: IdGenerator,
    day_field: DayField,
}

impl WorkoutFactory {
    pub fn new(day_field: DayField) -> Self {
        Self {
            ids: IdGenerator::new(),
            day_field,
        }
    }

    pub fn create_running(
        &mut self,
        coordinates: Coordinates,
        duration_min: f64,
        distance_km: f64,
        elevation_gain: f64,
    ) -> Workout {
        self.create_running_at(
            Utc::now(),
            coordinates,
            duration_min,
            distance_km,
            elevation_gain,
        )
    }

    pub fn create_cycling(
        &mut self,
        coordinates: Coordinates,
        duration_min: f64,
        distance_km: f64,
        cadence: f64,
    ) -> Workout {
        self.create_cycling_at(Utc::now(), coordinates, duration_min, distance_km, cadence)
    }

    pub fn create_running_at(
        &mut self,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        duration_min: f64,
        distance_km: f64,
        elevation_gain: f64,
    ) -> Workout {
        let kind = WorkoutKind::Running {
            elevation_gain,
            pace: duration_min / distance_km,
        };
        self.build(created_at, coordinates, duration_min, distance_km, kind)
    }

    pub fn create_cycling_at(
        &mut self,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        duration_min: f64,
        distance_km: f64,
        cadence: f64,
    ) -> Workout {
        let kind = WorkoutKind::Cycling {
            cadence,
            speed: distance_km / (duration_min / 60.0),
        };
        self.build(created_at, coordinates, duration_min, distance_km, kind)
    }

    /// Create the workout described by a validated form draft.
    pub fn create_from_draft(&mut self, coordinates: Coordinates, draft: &WorkoutDraft) -> Workout {
        match draft.detail {
            DraftDetail::Running { elevation_gain } => self.create_running(
                coordinates,
                draft.duration_min,
                draft.distance_km,
                elevation_gain,
            ),
            DraftDetail::Cycling { cadence } => {
                self.create_cycling(coordinates, draft.duration_min, draft.distance_km, cadence)
            }
        }
    }

    fn build(
        &mut self,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        duration_min: f64,
        distance_km: f64,
        kind: WorkoutKind,
    ) -> Workout {
        let id = self.ids.next_id(created_at.timestamp_millis());
        let description = describe(&created_at.with_timezone(&Local), self.day_field);

        Workout {
            id,
            created_at,
            coordinates,
            duration_min,
            distance_km,
            description,
            kind,
        }
    }
}
