//! Geo primitives for distance facets: reference points, radius parsing and
//! great-circle distance.

use crate::error::{FacetError, Result};
use crate::query::predicate::Predicate;
use crate::types::FacetDefinition;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }

    pub fn distance_meters(&self, other: &Coordinates) -> f64 {
        haversine(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Great-circle distance in meters between two lat/lng points.
pub fn haversine(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1 = lat1 * PI / 180.0;
    let lat2 = lat2 * PI / 180.0;
    let dlat = lat2 - lat1;
    let dlng = (lng2 - lng1) * PI / 180.0;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_METERS * c
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
    Meters,
    Feet,
}

impl DistanceUnit {
    /// Accepts short and long unit names, case-insensitively.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Ok(Self::Kilometers)
            }
            "mi" | "mile" | "miles" => Ok(Self::Miles),
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Self::Meters),
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            _ => Err(FacetError::UnknownUnit(s.to_string())),
        }
    }

    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            Self::Kilometers => value * 1_000.0,
            Self::Miles => value * 1_609.344,
            Self::Meters => value,
            Self::Feet => value * 0.3048,
        }
    }
}

/// A search radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub magnitude: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    pub fn new(magnitude: f64, unit: DistanceUnit) -> Self {
        Distance { magnitude, unit }
    }

    /// Parse a raw filter value with the facet's configured unit.
    ///
    /// A missing or blank unit means kilometers. Returns `None` for an
    /// unknown unit, an unparsable magnitude, or one that is negative or not
    /// finite.
    pub fn parse(raw: &str, unit: Option<&str>) -> Option<Self> {
        let unit = match unit.map(str::trim).filter(|u| !u.is_empty()) {
            None => DistanceUnit::default(),
            Some(u) => match DistanceUnit::parse(u) {
                Ok(unit) => unit,
                Err(e) => {
                    tracing::debug!("[FACET] distance radius dropped: {}", e);
                    return None;
                }
            },
        };
        let magnitude: f64 = raw.trim().parse().ok()?;
        if !magnitude.is_finite() || magnitude < 0.0 {
            return None;
        }
        Some(Distance { magnitude, unit })
    }

    pub fn meters(&self) -> f64 {
        self.unit.to_meters(self.magnitude)
    }
}

/// Geo filter for a distance facet: documents whose `location_field` lies
/// within the parsed radius of `reference_point`.
///
/// Returns `None`, adding no filter, when either the radius or the
/// reference point is missing.
pub fn distance_filter(
    definition: &FacetDefinition,
    raw_value: &str,
    reference_point: Option<&Coordinates>,
    location_field: &str,
) -> Option<Predicate> {
    let radius = Distance::parse(raw_value, definition.distance_unit.as_deref());
    match (reference_point, radius) {
        (Some(center), Some(radius)) => {
            Some(Predicate::within_distance(location_field, *center, radius))
        }
        (center, radius) => {
            tracing::debug!(
                "[FACET] distance facet '{}' skipped: reference_point={}, radius={}",
                definition.name,
                center.is_some(),
                radius.is_some()
            );
            None
        }
    }
}
