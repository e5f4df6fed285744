// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GeoJSON export and state snapshots of a session.

use crate::error::Result;
use crate::models::{SessionStats, Workout, WorkoutKind};
use crate::services::WorkoutLog;
use crate::views::headless::{HeadlessUi, UiState};
use chrono::SecondsFormat;
use geo::{BoundingRect, MultiPoint, Point};
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject};
use serde::Serialize;
use serde_json::json;

/// One Point feature per workout, in creation order.
pub fn to_feature_collection(workouts: &[Workout]) -> FeatureCollection {
    let points: MultiPoint<f64> = workouts
        .iter()
        .map(|w| Point::from(w.coordinates()))
        .collect();

    let bbox = points
        .bounding_rect()
        .map(|rect| vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]);

    FeatureCollection {
        bbox,
        features: workouts.iter().map(to_feature).collect(),
        foreign_members: None,
    }
}

/// Serialized GeoJSON for a set of workouts.
pub fn to_geojson_string(workouts: &[Workout]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_feature_collection(
        workouts,
    ))?)
}

fn to_feature(workout: &Workout) -> Feature {
    let point = Point::from(workout.coordinates());

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), json!(workout.id().as_str()));
    properties.insert("type".to_string(), json!(workout.workout_type().as_str()));
    properties.insert("description".to_string(), json!(workout.description()));
    properties.insert(
        "created_at".to_string(),
        json!(workout
            .created_at()
            .to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    properties.insert("distance_km".to_string(), json!(workout.distance_km()));
    properties.insert("duration_min".to_string(), json!(workout.duration_min()));

    match *workout.kind() {
        WorkoutKind::Running {
            elevation_gain,
            pace,
        } => {
            properties.insert("pace".to_string(), json!(pace));
            properties.insert("elevation_gain".to_string(), json!(elevation_gain));
        }
        WorkoutKind::Cycling { cadence, speed } => {
            properties.insert("speed".to_string(), json!(speed));
            properties.insert("cadence".to_string(), json!(cadence));
        }
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(&point))),
        id: Some(Id::String(workout.id().to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Serializable picture of a session: the log plus what the surfaces show.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub workouts: Vec<Workout>,
    pub stats: SessionStats,
    pub ui: UiState,
}

impl Snapshot {
    pub fn new(log: &WorkoutLog, ui: &HeadlessUi) -> Self {
        Self {
            workouts: log.workouts().to_vec(),
            stats: SessionStats::from_workouts(log.workouts()),
            ui: ui.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, WorkoutFactory};

    #[test]
    fn test_feature_collection() {
        let mut factory = WorkoutFactory::default();
        let workouts = vec![
            factory.create_running(Coordinates::new(37.0, -122.0), 10.0, 20.0, 30.0),
            factory.create_cycling(Coordinates::new(38.0, -121.0), 40.0, 50.0, 60.0),
        ];

        let collection = to_feature_collection(&workouts);

        assert_eq!(collection.features.len(), 2);
        assert_eq!(collection.bbox, Some(vec![-122.0, 37.0, -121.0, 38.0]));

        let first = &collection.features[0];
        assert_eq!(
            first.property("id").and_then(|v| v.as_str()),
            Some(workouts[0].id().as_str())
        );
        assert_eq!(first.property("pace").and_then(|v| v.as_f64()), Some(0.5));
        match first.geometry.as_ref().map(|g| &g.value) {
            Some(geojson::Value::Point(coords)) => assert_eq!(coords.as_slice(), &[-122.0, 37.0]),
            other => panic!("expected point geometry, got {:?}", other),
        }

        let second = &collection.features[1];
        assert_eq!(second.property("speed").and_then(|v| v.as_f64()), Some(75.0));
        assert!(second.property("pace").is_none());
    }

    #[test]
    fn test_empty_collection_has_no_bbox() {
        let collection = to_feature_collection(&[]);
        assert!(collection.features.is_empty());
        assert!(collection.bbox.is_none());
    }
}
