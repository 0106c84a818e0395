//! Facet compilation benchmarks.
//!
//! Measures:
//! - Single-token compilation per facet type
//! - Full composition of a realistic query string

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use facet_filters::{
    ActiveFilters, Coordinates, FacetConfig, FacetDefinition, FacetType, InMemoryFacetCatalog,
    PredicateCompiler, QueryComposer, SearchQuery,
};

fn catalog() -> InMemoryFacetCatalog {
    InMemoryFacetCatalog::new()
        .with_facet("s", FacetDefinition::new("price", "price", FacetType::Float))
        .with_facet("s", FacetDefinition::new("stock", "stock", FacetType::Integer))
        .with_facet("s", FacetDefinition::new("color", "color", FacetType::Text))
        .with_facet("s", FacetDefinition::new("released", "released", FacetType::Date))
        .with_facet("s", FacetDefinition::new("grid", "row,col", FacetType::Integer))
        .with_facet("s", FacetDefinition::new("near", "", FacetType::Distance))
}

fn bench_compile(c: &mut Criterion) {
    let config = FacetConfig::default();
    let compiler = PredicateCompiler::new(&config);
    let float = FacetDefinition::new("price", "price", FacetType::Float);
    let date = FacetDefinition::new("released", "released", FacetType::Date);
    let text = FacetDefinition::new("color", "color", FacetType::Text);

    let mut group = c.benchmark_group("compile");
    group.bench_function("float_range", |b| {
        b.iter(|| compiler.compile("price", black_box("10.5|99.99"), &float))
    });
    group.bench_function("date_range", |b| {
        b.iter(|| compiler.compile("released", black_box("2023-01-01|2023-12-31"), &date))
    });
    group.bench_function("text_multi_value", |b| {
        b.iter(|| compiler.compile("color", black_box("red,green,blue,_empty_"), &text))
    });
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let catalog = catalog();
    let config = FacetConfig::default();
    let composer = QueryComposer::from_config(&catalog, &config);
    let active = ActiveFilters::from_query_string(
        "price=10|100&stock=1|&color=red,blue&released=2023-01-01|2023-12-31&grid=1/2&near=25",
    );
    let center = Some(Coordinates::new(52.37, 4.89));

    c.bench_function("compose_six_facets", |b| {
        b.iter(|| composer.apply_facet_filters(SearchQuery::new(), black_box(&active), center, "s"))
    });
}

criterion_group!(benches, bench_compile, bench_compose);
criterion_main!(benches);
