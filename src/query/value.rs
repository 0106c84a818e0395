//! Raw filter tokens to typed bounds.
//!
//! Parsing never fails. A token that does not parse for its facet type is
//! replaced with a sentinel the caller picks, so a filter always compiles.

use crate::query::date_format::format_date;
use crate::types::FacetType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;

/// A typed bound value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    /// Compared ordinally (byte-wise).
    Text(String),
}

impl Scalar {
    /// Ordering between two scalars of compatible kinds. Integers and floats
    /// compare numerically; text compares only with text. `None` for NaN or
    /// mixed text/number.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Integer(a), Scalar::Integer(b)) => Some(a.cmp(b)),
            (Scalar::Float(a), Scalar::Float(b)) => a.partial_cmp(b),
            (Scalar::Integer(a), Scalar::Float(b)) => (*a as f64).partial_cmp(b),
            (Scalar::Float(a), Scalar::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Scalar::Text(a), Scalar::Text(b)) => Some(a.as_str().cmp(b.as_str())),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
        }
    }
}

/// Which sentinel replaces an unparsable numeric token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Min,
    Max,
    Zero,
}

/// One side of a range.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBound {
    /// Nothing was supplied on this side.
    Open,
    Parsed(Scalar),
    /// Something was supplied but did not parse; holds the substitute.
    Sentinel(Scalar),
}

impl ParsedBound {
    /// Parse one `|`-separated side of a range. An empty part is `Open`.
    pub fn from_part(
        part: &str,
        facet_type: FacetType,
        date_format: Option<&str>,
        fallback: Fallback,
    ) -> Self {
        if part.is_empty() {
            ParsedBound::Open
        } else {
            parse_bound(part, facet_type, date_format, fallback)
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ParsedBound::Open)
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, ParsedBound::Sentinel(_))
    }

    pub fn value(&self) -> Option<&Scalar> {
        match self {
            ParsedBound::Open => None,
            ParsedBound::Parsed(v) | ParsedBound::Sentinel(v) => Some(v),
        }
    }

    pub fn into_value(self) -> Option<Scalar> {
        match self {
            ParsedBound::Open => None,
            ParsedBound::Parsed(v) | ParsedBound::Sentinel(v) => Some(v),
        }
    }
}

/// Parse a raw token for a facet type.
///
/// The parser is directionless: `fallback` decides which sentinel an
/// unparsable integer or float becomes. Dates are rendered with
/// `date_format`; without a (non-empty) format they stay raw text, and an
/// unparsable date becomes the empty string. Text and distance tokens pass
/// through unchanged.
pub fn parse_bound(
    raw: &str,
    facet_type: FacetType,
    date_format: Option<&str>,
    fallback: Fallback,
) -> ParsedBound {
    match facet_type {
        FacetType::Integer => match parse_integer(raw) {
            Some(v) => ParsedBound::Parsed(Scalar::Integer(v)),
            None => ParsedBound::Sentinel(Scalar::Integer(match fallback {
                Fallback::Min => i64::MIN,
                Fallback::Max => i64::MAX,
                Fallback::Zero => 0,
            })),
        },
        FacetType::Float => match parse_float(raw) {
            Some(v) => ParsedBound::Parsed(Scalar::Float(v)),
            None => ParsedBound::Sentinel(Scalar::Float(match fallback {
                Fallback::Min => f64::MIN,
                Fallback::Max => f64::MAX,
                Fallback::Zero => 0.0,
            })),
        },
        FacetType::Date => match date_format.filter(|f| !f.is_empty()) {
            Some(format) => match parse_iso_date(raw) {
                Some(dt) => ParsedBound::Parsed(Scalar::Text(format_date(&dt, format))),
                None => ParsedBound::Sentinel(Scalar::Text(String::new())),
            },
            None => ParsedBound::Parsed(Scalar::Text(raw.to_string())),
        },
        FacetType::Text | FacetType::Distance => ParsedBound::Parsed(Scalar::Text(raw.to_string())),
    }
}

/// Base-10 integer with optional sign and surrounding whitespace.
pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Locale-invariant float: `.` decimal point, optional sign and exponent,
/// `,` thousands separators, `(x)` for negatives, `Infinity` / `NaN`.
pub fn parse_float(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let (negate, s) = match s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner) => (true, inner.trim()),
        None => (false, s),
    };
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    let v: f64 = match cleaned.as_str() {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        "NaN" => f64::NAN,
        other => other.parse().ok()?,
    };
    Some(if negate { -v } else { v })
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M%S",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// ISO-8601-ish date to a UTC instant.
///
/// Accepts RFC 3339 with any offset, extended and compact date-times with an
/// optional trailing `Z`, and bare dates (midnight). Inputs without an offset
/// are taken as UTC.
pub fn parse_iso_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = s.strip_suffix('Z').unwrap_or(s);
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(naive, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|ndt| Utc.from_utc_datetime(&ndt));
        }
    }
    None
}
