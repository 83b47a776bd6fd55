//! Chart component traits and the catalog-driven chart variant

use helmbase_core::{ChartEntry, ReleaseConfiguration, ReleaseStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::engine::PropertyMap;

/// A strongly typed Helm chart component
///
/// Implemented once per chart variant. The component owns exactly one child
/// Helm release; everything else about its lifecycle is handled by
/// [`construct`](crate::construct::construct).
pub trait Chart: Send {
    /// Fully qualified type token of the component
    fn type_token(&self) -> &str;

    /// Receive the status of the child release once it is registered
    fn set_outputs(&mut self, status: Option<ReleaseStatus>);

    /// Chart installed when the caller does not name one
    fn default_chart_name(&self) -> &str;

    /// Repository used when the caller does not name one
    fn default_repo_url(&self) -> &str;
}

/// Typed arguments of a chart component
///
/// The serde field names are the keys the fields take in the chart values.
/// The release configuration itself travels under `helmOptions`.
pub trait ChartArgs: Serialize + DeserializeOwned + Send {
    /// Slot holding the release configuration
    fn release_mut(&mut self) -> &mut Option<ReleaseConfiguration>;
}

/// Chart variant declared in a chart catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogChart {
    entry: ChartEntry,
    status: Option<ReleaseStatus>,
}

impl CatalogChart {
    pub fn new(entry: ChartEntry) -> Self {
        Self {
            entry,
            status: None,
        }
    }

    pub fn entry(&self) -> &ChartEntry {
        &self.entry
    }

    /// Status of the child release, once known
    pub fn status(&self) -> Option<&ReleaseStatus> {
        self.status.as_ref()
    }
}

impl Chart for CatalogChart {
    fn type_token(&self) -> &str {
        &self.entry.type_token
    }

    fn set_outputs(&mut self, status: Option<ReleaseStatus>) {
        self.status = status;
    }

    fn default_chart_name(&self) -> &str {
        &self.entry.chart
    }

    fn default_repo_url(&self) -> &str {
        &self.entry.repo
    }
}

/// Arguments of a catalog chart: release options plus free-form values
///
/// Catalog charts have no typed fields of their own, so every input other
/// than `helmOptions` is a chart value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogArgs {
    #[serde(
        rename = "helmOptions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub helm_options: Option<ReleaseConfiguration>,

    #[serde(flatten)]
    pub values: PropertyMap,
}

impl ChartArgs for CatalogArgs {
    fn release_mut(&mut self) -> &mut Option<ReleaseConfiguration> {
        &mut self.helm_options
    }
}
