pub mod compiler;
pub mod composer;
pub mod date_format;
pub mod geo;
pub mod multi_key;
pub mod predicate;
pub mod value;

pub use compiler::PredicateCompiler;
pub use composer::{QueryComposer, SearchQuery};
pub use geo::{Coordinates, Distance, DistanceUnit};
pub use predicate::Predicate;
pub use value::{ParsedBound, Scalar};
