//! Typed Helm release configuration

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::values::Values;

/// Typed description of how to deploy a Helm chart
///
/// Every optional field distinguishes "unset" (`None`) from "set", including
/// set-to-zero values such as `Some(false)`. Default-merging relies on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseConfiguration {
    /// If set, installation process purges chart on fail. `skipAwait` will be disabled automatically if atomic is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atomic: Option<bool>,

    /// Chart name to be installed. A path may be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,

    /// Allow deletion of new resources created in this upgrade when upgrade fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup_on_fail: Option<bool>,

    /// Create the namespace if it does not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_namespace: Option<bool>,

    /// Run helm dependency update before installing the chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_update: Option<bool>,

    /// Add a custom description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Use chart development versions, too. Ignored when `version` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devel: Option<bool>,

    /// Prevent CRD hooks from running, but run other hooks.
    #[serde(rename = "disableCRDHooks", skip_serializing_if = "Option::is_none")]
    pub disable_crd_hooks: Option<bool>,

    /// Skip validating rendered templates against the Kubernetes OpenAPI schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_openapi_validation: Option<bool>,

    /// Prevent hooks from running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_webhooks: Option<bool>,

    /// Force resource update through delete/recreate if needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_update: Option<bool>,

    /// Location of public keys used for verification. Used only if `verify` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyring: Option<String>,

    /// Run helm lint when planning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lint: Option<bool>,

    /// The rendered manifests as JSON. Not yet supported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Map<String, JsonValue>>,

    /// Limit the maximum number of revisions saved per release. Use 0 for no limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_history: Option<i32>,

    /// Release name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Namespace to install the release into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Postrender command to run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postrender: Option<String>,

    /// Perform pods restart during upgrade/rollback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recreate_pods: Option<bool>,

    /// If set, render subchart notes along with the parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_subchart_notes: Option<bool>,

    /// Re-use the given name, even if that name is already used. This is unsafe in production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace: Option<bool>,

    /// Specification defining the Helm chart repository to use.
    pub repository_opts: RepositoryOptions,

    /// When upgrading, reset the values to the ones built into the chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_values: Option<bool>,

    /// Names of resources created by the release grouped by "kind/version".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_names: Option<BTreeMap<String, Vec<String>>>,

    /// When upgrading, reuse the last release's values and merge in any overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reuse_values: Option<bool>,

    /// Skip waiting for all resources to become ready before marking the release successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_await: Option<bool>,

    /// If set, no CRDs will be installed. By default, CRDs are installed if not already present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_crds: Option<bool>,

    /// Status of the deployed release. Output only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReleaseStatus>,

    /// Time in seconds to wait for any individual kubernetes operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i32>,

    /// List of assets (raw yaml files). Content is read and merged with values. Not yet supported.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value_yaml_files: Vec<AssetOrArchive>,

    /// Custom values set for the release.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Values>,

    /// Verify the package before installing it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,

    /// Specify the exact chart version to install. If this is not specified, the latest version is installed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Wait until all Jobs have completed before marking the release successful. Ignored with `skipAwait`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_jobs: Option<bool>,
}

impl ReleaseConfiguration {
    /// Chart name, or an empty string when unset
    pub fn chart_name(&self) -> &str {
        self.chart.as_deref().unwrap_or_default()
    }
}

/// Where to fetch the chart from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryOptions {
    /// The Repository's CA File
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<String>,

    /// The repository's cert file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_file: Option<String>,

    /// The repository's cert key file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,

    /// Password for HTTP basic authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Repository where to locate the requested chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Username for HTTP basic authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Status of a deployed release, as reported by the release resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseStatus {
    /// The version number of the application being deployed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    /// The name of the chart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,

    /// Name is the name of the release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Namespace is the kubernetes namespace of the release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Version is an int32 which represents the version of the release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<i32>,

    /// Status of the release.
    pub status: String,

    /// A SemVer 2 conformant version string of the chart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A file-like input: a single asset or an archive of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AssetOrArchive {
    /// Asset read from a local file
    FileAsset { path: PathBuf },

    /// Asset given inline
    StringAsset { text: String },

    /// Asset fetched from a URI
    RemoteAsset { uri: String },

    /// Archive read from a local file or directory
    FileArchive { path: PathBuf },

    /// Archive fetched from a URI
    RemoteArchive { uri: String },

    /// Archive assembled from named members
    AssetArchive {
        assets: BTreeMap<String, AssetOrArchive>,
    },
}
