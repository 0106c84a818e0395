//! Facets bound to several fields at once (`field_key = "lat,lon"`).
//!
//! The raw value carries one sub-value per field, joined with `/`. Sub-keys
//! and sub-values pair up by position; whatever the longer list has beyond
//! the shorter one is dropped.

use crate::query::predicate::Predicate;
use crate::types::FacetDefinition;

/// Positional (sub-key, sub-value) pairs, both sides trimmed.
pub fn pair_keys_with_values<'a>(
    definition: &'a FacetDefinition,
    raw_value: &'a str,
) -> Vec<(&'a str, &'a str)> {
    let keys = definition.field_keys();
    let values: Vec<&str> = raw_value.split('/').map(str::trim).collect();
    if keys.len() != values.len() {
        tracing::debug!(
            "[FACET] multi-key {:?} has {} key(s) but {} value(s); extra entries dropped",
            definition.field_key,
            keys.len(),
            values.len()
        );
    }
    keys.into_iter().zip(values).collect()
}

/// Build one predicate per (sub-key, sub-value) pair with `single`.
///
/// The caller ANDs every returned predicate into its query; pairs for which
/// `single` yields nothing contribute nothing.
pub fn compile_multi_key<F>(
    definition: &FacetDefinition,
    raw_value: &str,
    mut single: F,
) -> Vec<Predicate>
where
    F: FnMut(&str, &str) -> Option<Predicate>,
{
    pair_keys_with_values(definition, raw_value)
        .into_iter()
        .filter_map(|(key, value)| single(key, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FacetType;

    fn multi(field_key: &str) -> FacetDefinition {
        FacetDefinition::new("m", field_key, FacetType::Text)
    }

    #[test]
    fn pairs_by_position() {
        let def = multi("lat, lon");
        assert_eq!(
            pair_keys_with_values(&def, "10 / 20"),
            vec![("lat", "10"), ("lon", "20")]
        );
    }

    #[test]
    fn fewer_values_truncates() {
        let def = multi("lat,lon");
        assert_eq!(pair_keys_with_values(&def, "10"), vec![("lat", "10")]);
    }

    #[test]
    fn fewer_keys_truncates() {
        let def = multi("a,b");
        assert_eq!(
            pair_keys_with_values(&def, "1/2/3"),
            vec![("a", "1"), ("b", "2")]
        );
    }

    #[test]
    fn empty_value_pairs_first_key() {
        let def = multi("a,b");
        assert_eq!(pair_keys_with_values(&def, ""), vec![("a", "")]);
    }

    #[test]
    fn empty_sub_key_keeps_its_position() {
        let def = multi("a,");
        assert_eq!(pair_keys_with_values(&def, "1/2"), vec![("a", "1"), ("", "2")]);
    }

    #[test]
    fn compile_calls_single_per_pair() {
        let def = FacetDefinition::new("geo", "lat,lon", FacetType::Text);
        let preds = compile_multi_key(&def, "10/20", |k, v| Some(Predicate::equals(k, v)));
        assert_eq!(
            preds,
            vec![Predicate::equals("lat", "10"), Predicate::equals("lon", "20")]
        );
    }

    #[test]
    fn compile_skips_none() {
        let def = FacetDefinition::new("geo", "lat,lon", FacetType::Text);
        let preds = compile_multi_key(&def, "10/20", |k, v| {
            (k == "lon").then(|| Predicate::equals(k, v))
        });
        assert_eq!(preds, vec![Predicate::equals("lon", "20")]);
    }
}
