pub mod dataset;
pub mod error;
pub mod geo;
pub mod store;
pub mod workbook;

pub use dataset::Dataset;
pub use error::LoadError;
pub use geo::GeoReference;
