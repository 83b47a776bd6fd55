//! Helmbase Provider - Strongly typed Helm chart components
//!
//! This crate provides:
//! - **Chart components**: The `Chart` and `ChartArgs` traits implemented once per chart variant
//! - **Construction**: `construct` registers the component, defaults its configuration and
//!   creates the child Helm release
//! - **Release arguments**: Field-by-field conversion into the release resource's argument shape
//! - **Engine seam**: The `ResourceEngine` trait plus an in-memory `MockEngine`
//! - **Catalog charts**: Chart variants declared in a `ChartCatalog` file

pub mod args;
pub mod chart;
pub mod construct;
pub mod engine;
pub mod error;
pub mod release;

pub use args::{ReleaseArgs, RepositoryOptsArgs, to_release_args};
pub use chart::{CatalogArgs, CatalogChart, Chart, ChartArgs};
pub use construct::{
    ConstructRequest, ConstructResult, FIELD_HELM_STATUS_OUTPUT, construct, construct_from_catalog,
};
pub use engine::{
    MockEngine, OperationCounts, PropertyMap, Registration, RegistrationKind, RegisteredResource,
    ResourceEngine, ResourceOptions, Urn,
};
pub use error::{EngineError, ProviderError, Result};
pub use release::{RELEASE_TYPE, Release};
