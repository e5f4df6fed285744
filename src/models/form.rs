// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entry form values, numeric coercion and validation.

use crate::error::{AppError, Result};
use crate::models::WorkoutType;
use serde::{Deserialize, Serialize};

/// Raw values of the entry form fields, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    #[serde(rename = "type")]
    pub workout_type: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// The type-specific input row of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryField {
    Elevation,
    Cadence,
}

/// Validated form contents, ready to become a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutDraft {
    pub duration_min: f64,
    pub distance_km: f64,
    pub detail: DraftDetail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftDetail {
    Running { elevation_gain: f64 },
    Cycling { cadence: f64 },
}

impl WorkoutDraft {
    /// Parse and validate the form. Only the secondary field belonging to
    /// the selected type is read.
    pub fn from_fields(fields: &FormFields) -> Result<Self> {
        let workout_type: WorkoutType = fields.workout_type.parse()?;
        let duration_min = coerce_number(&fields.duration);
        let distance_km = coerce_number(&fields.distance);

        let (extra, detail) = match workout_type {
            WorkoutType::Running => {
                let elevation_gain = coerce_number(&fields.elevation);
                (elevation_gain, DraftDetail::Running { elevation_gain })
            }
            WorkoutType::Cycling => {
                let cadence = coerce_number(&fields.cadence);
                (cadence, DraftDetail::Cycling { cadence })
            }
        };

        if !all_positive_finite(&[duration_min, distance_km, extra]) {
            return Err(AppError::InvalidInput);
        }

        Ok(Self {
            duration_min,
            distance_km,
            detail,
        })
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self.detail {
            DraftDetail::Running { .. } => WorkoutType::Running,
            DraftDetail::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// True when every value is finite and strictly positive.
pub fn all_positive_finite(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0 && v.is_finite())
}

/// Convert a form string to a number the way a browser does for `+value`.
///
/// Blank input is `0`; anything that is not a decimal literal, an unsigned
/// `0x`/`0o`/`0b` literal, or `Infinity` is `NaN`.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some((radix, digits)) = radix_literal(trimmed) {
        return parse_radix(digits, radix);
    }

    // Rust also accepts "inf" and "nan"; browsers do not.
    let decimal_literal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal_literal {
        return f64::NAN;
    }

    trimmed.parse().unwrap_or(f64::NAN)
}

/// Split an unsigned `0x`/`0o`/`0b` literal into its radix and digits.
fn radix_literal(s: &str) -> Option<(u32, &str)> {
    let prefix = s.get(..2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, &s[2..]))
}

/// Digits in `radix`, accumulated as a float so wide literals stay finite.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        })
        .unwrap_or(f64::NAN)
}
