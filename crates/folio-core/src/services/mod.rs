pub mod catalog_service;

pub use catalog_service::{CatalogReport, CatalogService, CollectionListing, ErrorPolicy};
