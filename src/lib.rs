//! Compiles facet filter parameters into typed search predicates.
//!
//! A request's facet parameters (`price=10|20`, `color=red,blue`,
//! `near=25`) are looked up against a [`FacetCatalog`], compiled per facet
//! type into a [`Predicate`] tree, and ANDed into a [`SearchQuery`]:
//!
//! ```
//! use facet_filters::{
//!     ActiveFilters, FacetConfig, FacetDefinition, FacetType, InMemoryFacetCatalog,
//!     QueryComposer, SearchQuery,
//! };
//!
//! let catalog = InMemoryFacetCatalog::new()
//!     .with_facet("shop", FacetDefinition::new("price", "price", FacetType::Float));
//! let config = FacetConfig::default();
//! let composer = QueryComposer::from_config(&catalog, &config);
//!
//! let active = ActiveFilters::from_query_string("price=10|20");
//! let query = composer.apply_facet_filters(SearchQuery::new(), &active, None, "shop");
//! assert_eq!(query.to_string(), "price:[10 TO 20]");
//! ```
//!
//! Compilation never fails: malformed numbers become sentinels, malformed
//! dates become empty strings, and distance facets without a reference
//! point are skipped.

pub mod catalog;
pub mod config;
pub mod error;
pub mod params;
pub mod query;
pub mod types;

pub use catalog::{FacetCatalog, InMemoryFacetCatalog};
pub use config::{DateFormatLookup, FacetConfig};
pub use error::{FacetError, Result};
pub use params::ActiveFilters;
pub use query::{
    Coordinates, Distance, DistanceUnit, ParsedBound, Predicate, PredicateCompiler,
    QueryComposer, Scalar, SearchQuery,
};
pub use types::{Document, FacetDefinition, FacetType, FieldAccessor, FieldValue, RawFilter};
