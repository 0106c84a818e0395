use crate::catalog::FacetCatalog;
use crate::config::{DateFormatLookup, FacetConfig, DEFAULT_LOCATION_FIELD};
use crate::params::ActiveFilters;
use crate::query::compiler::PredicateCompiler;
use crate::query::geo::{distance_filter, Coordinates};
use crate::query::multi_key::compile_multi_key;
use crate::query::predicate::Predicate;
use crate::types::{FacetDefinition, FacetType, FieldAccessor};

/// A query as an ordered list of narrowing predicates. A document matches
/// when it satisfies all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    filters: Vec<Predicate>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// AND another predicate into the query.
    pub fn narrow(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    pub fn filters(&self) -> &[Predicate] {
        &self.filters
    }

    pub fn predicate(&self) -> Predicate {
        Predicate::all_of(self.filters.clone())
    }

    pub fn matches<D: FieldAccessor + ?Sized>(&self, doc: &D) -> bool {
        self.filters.iter().all(|p| p.evaluate(doc))
    }

    pub fn filter<'d, D: FieldAccessor>(&self, docs: &'d [D]) -> Vec<&'d D> {
        docs.iter().filter(|d| self.matches(*d)).collect()
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.predicate())
    }
}

/// Applies a request's active facet filters to a query.
pub struct QueryComposer<'a> {
    catalog: &'a dyn FacetCatalog,
    date_formats: &'a dyn DateFormatLookup,
    location_field: String,
}

impl<'a> QueryComposer<'a> {
    pub fn new(catalog: &'a dyn FacetCatalog, date_formats: &'a dyn DateFormatLookup) -> Self {
        QueryComposer {
            catalog,
            date_formats,
            location_field: DEFAULT_LOCATION_FIELD.to_string(),
        }
    }

    /// Composer using `config` for date formats and the location field.
    pub fn from_config(catalog: &'a dyn FacetCatalog, config: &'a FacetConfig) -> Self {
        QueryComposer {
            catalog,
            date_formats: config,
            location_field: config.location_field.clone(),
        }
    }

    pub fn with_location_field(mut self, field: impl Into<String>) -> Self {
        self.location_field = field.into();
        self
    }

    /// Narrow `base` by every active facet configured for `site`.
    ///
    /// Facets are applied in catalog order. Multi-key facets AND one
    /// predicate per (sub-key, sub-value) pair, without a reference point;
    /// all other facets AND a single predicate.
    pub fn apply_facet_filters(
        &self,
        base: SearchQuery,
        active: &ActiveFilters,
        reference_point: Option<Coordinates>,
        site: &str,
    ) -> SearchQuery {
        let keys: Vec<&str> = active.keys().collect();
        let definitions = self.catalog.active_facet_definitions(&keys, site);
        let compiler = PredicateCompiler::new(self.date_formats);

        let mut query = base;
        let mut applied = 0;
        for definition in &definitions {
            let Some(value) = active.get(&definition.name) else {
                continue;
            };

            if definition.is_multi_key() {
                let predicates = compile_multi_key(definition, value, |key, sub_value| {
                    self.single_key(&compiler, definition, key, sub_value, None)
                });
                for predicate in predicates {
                    applied += 1;
                    query = query.narrow(predicate);
                }
            } else if let Some(predicate) = self.single_key(
                &compiler,
                definition,
                &definition.field_key,
                value,
                reference_point.as_ref(),
            ) {
                applied += 1;
                query = query.narrow(predicate);
            }
        }

        tracing::debug!(
            "[FACET] site={} narrowed by {} predicate(s) ({} clause(s)) from {} matched of {} active parameter(s): {}",
            site,
            applied,
            query.predicate().clause_count(),
            definitions.len(),
            active.len(),
            query
        );
        query
    }

    fn single_key(
        &self,
        compiler: &PredicateCompiler<'_>,
        definition: &FacetDefinition,
        field: &str,
        value: &str,
        reference_point: Option<&Coordinates>,
    ) -> Option<Predicate> {
        if definition.facet_type == FacetType::Distance {
            return distance_filter(definition, value, reference_point, &self.location_field);
        }
        Some(compiler.compile(field, value, definition))
    }
}
