// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session summary computed from the workout log.

use crate::models::{Workout, WorkoutType};
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals over every workout logged in this session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    /// Number of workouts logged
    pub total_workouts: u32,
    /// Total distance (km)
    pub total_distance_km: f64,
    /// Total duration (minutes)
    pub total_duration_min: f64,
    /// Workout count per type
    pub workouts_by_type: BTreeMap<WorkoutType, u32>,
    /// Distance per type (km)
    pub distance_by_type: BTreeMap<WorkoutType, f64>,
}

impl SessionStats {
    pub fn from_workouts(workouts: &[Workout]) -> Self {
        let mut stats = Self::default();
        for workout in workouts {
            stats.add(workout);
        }
        stats
    }

    fn add(&mut self, workout: &Workout) {
        let workout_type = workout.workout_type();

        self.total_workouts += 1;
        self.total_distance_km += workout.distance_km();
        self.total_duration_min += workout.duration_min();

        *self.workouts_by_type.entry(workout_type).or_insert(0) += 1;
        *self.distance_by_type.entry(workout_type).or_insert(0.0) += workout.distance_km();
    }
}
