use crate::query::geo::{Coordinates, Distance};
use crate::query::value::Scalar;
use crate::types::FieldAccessor;
use std::cmp::Ordering;

/// A composable, immutable filter tree over document fields.
///
/// `And(vec![])` accepts every document and `Or(vec![])` accepts none.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact string equality on the field's text view.
    Equals { field: String, value: String },
    /// Inclusive range; a `None` bound is open.
    Range {
        field: String,
        lower: Option<Scalar>,
        upper: Option<Scalar>,
    },
    WithinDistance {
        field: String,
        center: Coordinates,
        radius: Distance,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn between(field: impl Into<String>, lower: Scalar, upper: Scalar) -> Self {
        Predicate::Range {
            field: field.into(),
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    pub fn at_least(field: impl Into<String>, lower: Scalar) -> Self {
        Predicate::Range {
            field: field.into(),
            lower: Some(lower),
            upper: None,
        }
    }

    pub fn at_most(field: impl Into<String>, upper: Scalar) -> Self {
        Predicate::Range {
            field: field.into(),
            lower: None,
            upper: Some(upper),
        }
    }

    pub fn within_distance(
        field: impl Into<String>,
        center: Coordinates,
        radius: Distance,
    ) -> Self {
        Predicate::WithinDistance {
            field: field.into(),
            center,
            radius,
        }
    }

    pub fn always() -> Self {
        Predicate::And(Vec::new())
    }

    pub fn never() -> Self {
        Predicate::Or(Vec::new())
    }

    /// Disjunction that collapses to the lone branch when there is only one.
    pub fn any_of(mut branches: Vec<Predicate>) -> Self {
        if branches.len() == 1 {
            branches.remove(0)
        } else {
            Predicate::Or(branches)
        }
    }

    /// Conjunction that collapses to the lone branch when there is only one.
    pub fn all_of(mut branches: Vec<Predicate>) -> Self {
        if branches.len() == 1 {
            branches.remove(0)
        } else {
            Predicate::And(branches)
        }
    }

    pub fn evaluate<D: FieldAccessor + ?Sized>(&self, doc: &D) -> bool {
        match self {
            Predicate::Equals { field, value } => {
                doc.text_values(field).iter().any(|v| v == value)
            }
            Predicate::Range {
                field,
                lower,
                upper,
            } => range_matches(doc, field, lower.as_ref(), upper.as_ref()),
            Predicate::WithinDistance {
                field,
                center,
                radius,
            } => {
                let limit = radius.meters();
                doc.locations(field)
                    .iter()
                    .any(|loc| center.distance_meters(loc) <= limit)
            }
            Predicate::And(parts) => parts.iter().all(|p| p.evaluate(doc)),
            Predicate::Or(parts) => parts.iter().any(|p| p.evaluate(doc)),
        }
    }

    /// Number of leaf clauses.
    pub fn clause_count(&self) -> usize {
        match self {
            Predicate::And(parts) | Predicate::Or(parts) => {
                parts.iter().map(Predicate::clause_count).sum()
            }
            _ => 1,
        }
    }
}

fn range_matches<D: FieldAccessor + ?Sized>(
    doc: &D,
    field: &str,
    lower: Option<&Scalar>,
    upper: Option<&Scalar>,
) -> bool {
    let within = |v: &Scalar| {
        let above = lower.map_or(true, |lo| {
            matches!(v.compare(lo), Some(Ordering::Greater | Ordering::Equal))
        });
        let below = upper.map_or(true, |hi| {
            matches!(v.compare(hi), Some(Ordering::Less | Ordering::Equal))
        });
        above && below
    };

    match lower.or(upper) {
        Some(Scalar::Integer(_)) => doc
            .integer_values(field)
            .into_iter()
            .any(|v| within(&Scalar::Integer(v))),
        Some(Scalar::Float(_)) => doc
            .float_values(field)
            .into_iter()
            .any(|v| within(&Scalar::Float(v))),
        Some(Scalar::Text(_)) | None => doc
            .text_values(field)
            .into_iter()
            .any(|v| within(&Scalar::Text(v))),
    }
}

impl std::fmt::Display for Predicate {
    /// Lucene-like rendering, stable for a given tree.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Equals { field, value } => {
                write!(f, "{}:{}", field, Scalar::Text(value.clone()))
            }
            Predicate::Range {
                field,
                lower,
                upper,
            } => {
                let lo = lower.as_ref().map_or("*".to_string(), |v| v.to_string());
                let hi = upper.as_ref().map_or("*".to_string(), |v| v.to_string());
                write!(f, "{}:[{} TO {}]", field, lo, hi)
            }
            Predicate::WithinDistance {
                field,
                center,
                radius,
            } => write!(
                f,
                "_geo({},{},{},{})",
                field,
                center.latitude,
                center.longitude,
                radius.meters()
            ),
            Predicate::And(parts) if parts.is_empty() => f.write_str("*:*"),
            Predicate::Or(parts) if parts.is_empty() => f.write_str("-*:*"),
            Predicate::And(parts) | Predicate::Or(parts) if parts.len() == 1 => {
                write!(f, "{}", parts[0])
            }
            Predicate::And(parts) => write_joined(f, parts, " AND "),
            Predicate::Or(parts) => write_joined(f, parts, " OR "),
        }
    }
}

fn write_joined(
    f: &mut std::fmt::Formatter<'_>,
    parts: &[Predicate],
    sep: &str,
) -> std::fmt::Result {
    let rendered: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
    write!(f, "({})", rendered.join(sep))
}
