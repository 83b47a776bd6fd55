//! Helmbase Core - Core types for strongly typed Helm chart components
//!
//! This crate provides the foundational types used throughout helmbase:
//! - `ReleaseConfiguration`: Typed description of a Helm release
//! - `RepositoryOptions`: Where and how to fetch the chart
//! - `Values`: Weakly typed chart values map
//! - `init_defaults`: Default-merging of chart name, repository and values
//! - `ChartCatalog`: Chart variants declared in a configuration file

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod release;
pub mod values;

pub use catalog::{ChartCatalog, ChartEntry};
pub use defaults::{FIELD_HELM_OPTIONS_INPUT, init_defaults};
pub use error::{CoreError, Result};
pub use release::{AssetOrArchive, ReleaseConfiguration, ReleaseStatus, RepositoryOptions};
pub use values::{Values, parse_set_values};
