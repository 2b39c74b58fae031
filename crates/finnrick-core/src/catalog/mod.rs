pub mod client;
pub mod resolve;

pub use client::{CatalogSource, HttpCatalog};
pub use resolve::{CatalogId, known_products, resolve};
