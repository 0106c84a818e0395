use crate::config::DateFormatLookup;
use crate::query::predicate::Predicate;
use crate::query::value::{parse_bound, Fallback, ParsedBound};
use crate::types::{FacetDefinition, FacetType};

/// Token standing for the empty string in a multi-value filter.
pub const EMPTY_TOKEN: &str = "_empty_";

/// Split a raw filter value into its comma-separated tokens: trimmed, empty
/// tokens dropped, [`EMPTY_TOKEN`] mapped to `""`.
pub fn split_tokens(raw_value: &str) -> impl Iterator<Item = &str> {
    raw_value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| if s == EMPTY_TOKEN { "" } else { s })
}

/// Compiles raw facet filter values into predicates.
///
/// The global date-format fallback is read from the lookup once, when the
/// compiler is built, and reused for every facet it compiles.
pub struct PredicateCompiler<'a> {
    date_formats: &'a dyn DateFormatLookup,
    default_date_format: Option<String>,
}

impl<'a> PredicateCompiler<'a> {
    pub fn new(date_formats: &'a dyn DateFormatLookup) -> Self {
        PredicateCompiler {
            default_date_format: date_formats.default_date_format(),
            date_formats,
        }
    }

    /// Date pattern for `field`: the facet's own format, then the per-field
    /// lookup, then the global fallback. Empty patterns count as absent.
    pub fn date_format_for(&self, definition: &FacetDefinition, field: &str) -> Option<String> {
        definition
            .date_format
            .clone()
            .or_else(|| self.date_formats.date_format(field))
            .or_else(|| self.default_date_format.clone())
            .filter(|f| !f.is_empty())
    }

    /// Compile every comma-separated token of `raw_value` and OR the results.
    ///
    /// A value with no tokens left compiles to [`Predicate::never`].
    pub fn compile(&self, field: &str, raw_value: &str, definition: &FacetDefinition) -> Predicate {
        let branches: Vec<Predicate> = split_tokens(raw_value)
            .map(|token| self.compile_token(field, token, definition))
            .collect();
        if branches.is_empty() {
            tracing::debug!(
                "[FACET] '{}' has no filter tokens in {:?}; matching nothing",
                definition.name,
                raw_value
            );
        }
        Predicate::any_of(branches)
    }

    /// Compile a single token: an exact match, or a `lower|upper` range.
    pub fn compile_token(&self, field: &str, token: &str, definition: &FacetDefinition) -> Predicate {
        if !token.contains('|') {
            return self.exact(field, token, definition);
        }

        let mut parts = token.split('|');
        let lower = parts.next().unwrap_or_default();
        let upper = parts.next().unwrap_or_default();
        if lower.is_empty() && upper.is_empty() {
            return Predicate::equals(field, token);
        }

        let facet_type = definition.facet_type;
        let date_format = match facet_type {
            FacetType::Date => self.date_format_for(definition, field),
            _ => None,
        };
        let lower = ParsedBound::from_part(lower, facet_type, date_format.as_deref(), Fallback::Min);
        let upper = ParsedBound::from_part(upper, facet_type, date_format.as_deref(), Fallback::Max);
        if lower.is_sentinel() || upper.is_sentinel() {
            tracing::debug!(
                "[FACET] '{}' range {:?} has unparsable bounds; using sentinels",
                definition.name,
                token
            );
        }

        Predicate::Range {
            field: field.to_string(),
            lower: lower.into_value(),
            upper: upper.into_value(),
        }
    }

    fn exact(&self, field: &str, token: &str, definition: &FacetDefinition) -> Predicate {
        let fallback = match definition.facet_type {
            FacetType::Float => Fallback::Zero,
            FacetType::Integer => Fallback::Min,
            _ => return Predicate::equals(field, token),
        };
        match parse_bound(token, definition.facet_type, None, fallback) {
            ParsedBound::Parsed(v) => Predicate::between(field, v.clone(), v),
            ParsedBound::Sentinel(v) => {
                tracing::debug!(
                    "[FACET] '{}' value {:?} is not a number; matching {}",
                    definition.name,
                    token,
                    v
                );
                Predicate::between(field, v.clone(), v)
            }
            ParsedBound::Open => Predicate::equals(field, token),
        }
    }
}
