#![allow(dead_code)]

use facet_filters::{Document, FacetDefinition, FacetType, InMemoryFacetCatalog};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const SITE: &str = "shop";

pub fn catalog() -> InMemoryFacetCatalog {
    InMemoryFacetCatalog::new()
        .with_facet(SITE, FacetDefinition::new("price", "price", FacetType::Float))
        .with_facet(SITE, FacetDefinition::new("stock", "stock", FacetType::Integer))
        .with_facet(SITE, FacetDefinition::new("color", "color", FacetType::Text))
        .with_facet(SITE, FacetDefinition::new("released", "released", FacetType::Date))
        .with_facet(SITE, FacetDefinition::new("grid", "row,col", FacetType::Integer))
        .with_facet(
            SITE,
            FacetDefinition::new("near", "", FacetType::Distance).with_distance_unit("km"),
        )
}

pub fn products() -> Vec<Document> {
    let raw = serde_json::json!([
        {"objectID": "amsterdam-red", "price": 9.5, "stock": 3, "color": "red",
         "released": "2023-02-01T00:00:00Z", "row": 1, "col": 2,
         "location": {"lat": 52.3676, "lng": 4.9041}},
        {"objectID": "utrecht-blue", "price": 25.0, "stock": 0, "color": "blue",
         "released": "2023-11-15T00:00:00Z", "row": 1, "col": 3,
         "location": {"lat": 52.0907, "lng": 5.1214}},
        {"objectID": "paris-blank", "price": 120.0, "stock": 40, "color": "",
         "released": "2022-06-30T00:00:00Z", "row": 2, "col": 2,
         "location": {"lat": 48.8566, "lng": 2.3522}},
        {"objectID": "berlin-green", "price": 60.25, "stock": 12, "color": "green",
         "released": "2024-01-10T00:00:00Z", "row": 3, "col": 1,
         "location": {"lat": 52.52, "lng": 13.405}}
    ]);
    raw.as_array()
        .unwrap()
        .iter()
        .map(|v| Document::from_json(v).unwrap())
        .collect()
}

pub fn ids(docs: &[&Document]) -> Vec<String> {
    docs.iter().map(|d| d.id.clone()).collect()
}
