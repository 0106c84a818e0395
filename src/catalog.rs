//! Facet catalogs: where the composer gets facet definitions from.

use crate::error::Result;
use crate::types::FacetDefinition;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub trait FacetCatalog: Send + Sync {
    /// Definitions for `site` whose name is among `requested_keys`.
    ///
    /// Implementations must return them in a stable order so that composed
    /// query plans are reproducible.
    fn active_facet_definitions(&self, requested_keys: &[&str], site: &str) -> Vec<FacetDefinition>;
}

/// A catalog held in memory, keyed by site, in registration order.
///
/// Serializes as `{ "<site>": [<FacetDefinition>, ...], ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryFacetCatalog {
    sites: IndexMap<String, Vec<FacetDefinition>>,
}

impl InMemoryFacetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, site: impl Into<String>, definition: FacetDefinition) {
        self.sites.entry(site.into()).or_default().push(definition);
    }

    pub fn with_facet(mut self, site: impl Into<String>, definition: FacetDefinition) -> Self {
        self.register(site, definition);
        self
    }

    pub fn facets(&self, site: &str) -> &[FacetDefinition] {
        self.sites.get(site).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn sites(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded facet catalog from {}: {} site(s)",
            path.as_ref().display(),
            catalog.sites.len()
        );
        Ok(catalog)
    }
}

impl FacetCatalog for InMemoryFacetCatalog {
    fn active_facet_definitions(&self, requested_keys: &[&str], site: &str) -> Vec<FacetDefinition> {
        self.facets(site)
            .iter()
            .filter(|def| {
                requested_keys
                    .iter()
                    .any(|key| key.eq_ignore_ascii_case(&def.name))
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FacetError;
    use crate::types::FacetType;

    fn catalog() -> InMemoryFacetCatalog {
        InMemoryFacetCatalog::new()
            .with_facet("shop", FacetDefinition::new("price", "price", FacetType::Float))
            .with_facet("shop", FacetDefinition::new("color", "color", FacetType::Text))
            .with_facet("shop", FacetDefinition::new("stock", "stock", FacetType::Integer))
            .with_facet("blog", FacetDefinition::new("tag", "tags", FacetType::Text))
    }

    #[test]
    fn returns_requested_in_registration_order() {
        let c = catalog();
        let defs = c.active_facet_definitions(&["stock", "price"], "shop");
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["price", "stock"]);
    }

    #[test]
    fn key_match_ignores_ascii_case() {
        let c = catalog();
        let defs = c.active_facet_definitions(&["COLOR"], "shop");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "color");
    }

    #[test]
    fn sites_are_isolated() {
        let c = catalog();
        assert!(c.active_facet_definitions(&["tag"], "shop").is_empty());
        assert_eq!(c.active_facet_definitions(&["tag"], "blog").len(), 1);
    }

    #[test]
    fn unknown_site_is_empty() {
        let c = catalog();
        assert!(c.active_facet_definitions(&["price"], "nowhere").is_empty());
        assert!(c.facets("nowhere").is_empty());
    }

    #[test]
    fn json_roundtrip_keeps_order() {
        let json = r#"{
            "shop": [
                {"name": "price", "fieldKey": "price", "facetType": "float"},
                {"name": "near", "fieldKey": "", "facetType": "distance", "distanceUnit": "mi"}
            ]
        }"#;
        let c = InMemoryFacetCatalog::from_json_str(json).unwrap();
        assert_eq!(c.sites().collect::<Vec<_>>(), vec!["shop"]);
        let facets = c.facets("shop");
        assert_eq!(facets[1].facet_type, FacetType::Distance);
        assert_eq!(facets[1].distance_unit.as_deref(), Some("mi"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{"s": [{"name": "a", "fieldKey": "a"}]}"#).unwrap();
        let c = InMemoryFacetCatalog::load(&path).unwrap();
        assert_eq!(c.facets("s").len(), 1);
    }

    #[test]
    fn bad_json_is_error() {
        let err = InMemoryFacetCatalog::from_json_str("[1,2]").unwrap_err();
        assert!(matches!(err, FacetError::Json(_)));
    }
}
