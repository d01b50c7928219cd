#![doc = include_str!("../README.md")]

mod macros;

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod selectors;
pub mod services;
pub mod tools;
pub mod types;

pub use config::Settings;
pub use error::{Error, ErrorClass, Result};
pub use services::catalog::{CatalogClient, CatalogSource, CrawledProduct, SearchOptions};
pub use tools::extract::{extract_product, ExtractOptions, ExtractionResult};
pub use types::*;
