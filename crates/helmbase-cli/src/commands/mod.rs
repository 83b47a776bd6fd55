//! CLI commands

pub mod catalog;
pub mod preview;

use helmbase_core::ChartCatalog;
use std::path::Path;

use crate::error::Result;

/// Load the catalog from `path`, or from the default location
fn load_catalog(path: Option<&Path>) -> Result<ChartCatalog> {
    let catalog = match path {
        Some(path) => ChartCatalog::load_from(path)?,
        None => ChartCatalog::load()?,
    };
    Ok(catalog)
}
