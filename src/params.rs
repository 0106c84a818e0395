//! Active facet parameters taken from a request's query string.

use crate::error::{FacetError, Result};
use crate::query::geo::Coordinates;
use crate::types::RawFilter;
use indexmap::IndexMap;

/// Name → raw value map of the parameters on a request.
///
/// Lookups ignore ASCII case. Repeating a name appends the new value with a
/// `,`, so `?color=red&color=blue` reads back as `"red,blue"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilters {
    /// Lowercased name → (name as first seen, joined value).
    entries: IndexMap<String, (String, String)>,
}

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.get_mut(&key.to_ascii_lowercase()) {
            Some((_, existing)) => {
                existing.push(',');
                existing.push_str(&value);
            }
            None => {
                self.entries.insert(key.to_ascii_lowercase(), (key, value));
            }
        }
    }

    /// Parse an `application/x-www-form-urlencoded` query string; a leading
    /// `?` is ignored.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        url::form_urlencoded::parse(query.as_bytes())
            .filter(|(k, _)| !k.is_empty())
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn raw_filters(&self) -> Vec<RawFilter> {
        self.entries
            .values()
            .map(|(k, v)| RawFilter::new(k.clone(), v.clone()))
            .collect()
    }

    /// Reference point carried in a parameter as `lat|lng` (or `lat,lng`).
    ///
    /// `Ok(None)` when the parameter is absent or blank.
    pub fn reference_point(&self, key: &str) -> Result<Option<Coordinates>> {
        match self.get(key).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_coordinates(raw).map(Some),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ActiveFilters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = ActiveFilters::new();
        for (k, v) in iter {
            filters.insert(k, v);
        }
        filters
    }
}

fn parse_coordinates(raw: &str) -> Result<Coordinates> {
    let invalid = || FacetError::InvalidCoordinates(raw.to_string());
    let (lat, lng) = raw
        .split_once('|')
        .or_else(|| raw.split_once(','))
        .ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(invalid());
    }
    Ok(Coordinates::new(lat, lng))
}
