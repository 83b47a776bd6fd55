//! Argument shape of the Helm release resource
//!
//! `ReleaseArgs` is what the release resource accepts. It mirrors
//! `ReleaseConfiguration` field by field but is owned by the release side:
//! the output-only `status` is not part of it and `chart` is required.

use helmbase_core::{AssetOrArchive, ReleaseConfiguration, RepositoryOptions, Values};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

use crate::engine::PropertyMap;
use crate::error::{ProviderError, Result};

/// Inputs of the Helm release resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atomic: Option<bool>,
    pub chart: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup_on_fail: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_namespace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devel: Option<bool>,
    #[serde(rename = "disableCRDHooks", skip_serializing_if = "Option::is_none")]
    pub disable_crd_hooks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_openapi_validation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_webhooks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyring: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lint: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Map<String, JsonValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_history: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postrender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recreate_pods: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_subchart_notes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace: Option<bool>,
    pub repository_opts: RepositoryOptsArgs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_values: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_names: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reuse_values: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_await: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_crds: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value_yaml_files: Vec<AssetOrArchive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Values>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_jobs: Option<bool>,
}

/// Repository options as the release resource accepts them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryOptsArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ReleaseArgs {
    /// Encode as the property bag sent to the engine
    pub fn to_property_map(&self) -> Result<PropertyMap> {
        serde_json::to_value(self)
            .and_then(serde_json::from_value)
            .map_err(ProviderError::Encode)
    }
}

/// Convert a defaulted configuration into release arguments
///
/// Unset fields stay unset and set fields pass through unchanged. The
/// function is pure: the same configuration always yields equal arguments.
///
/// Callers run [`init_defaults`](helmbase_core::init_defaults) first. The
/// release requires a chart, and an unset chart comes out as an empty name.
///
/// `valueYamlFiles` is not converted and always comes out empty. The release
/// resource does not yet accept the asset values carried here, so any
/// supplied files are dropped with a warning.
pub fn to_release_args(config: &ReleaseConfiguration) -> ReleaseArgs {
    ReleaseArgs {
        atomic: config.atomic,
        chart: config.chart_name().to_string(),
        cleanup_on_fail: config.cleanup_on_fail,
        create_namespace: config.create_namespace,
        dependency_update: config.dependency_update,
        description: config.description.clone(),
        devel: config.devel,
        disable_crd_hooks: config.disable_crd_hooks,
        disable_openapi_validation: config.disable_openapi_validation,
        disable_webhooks: config.disable_webhooks,
        force_update: config.force_update,
        keyring: config.keyring.clone(),
        lint: config.lint,
        manifest: config.manifest.clone(),
        max_history: config.max_history,
        name: config.name.clone(),
        namespace: config.namespace.clone(),
        postrender: config.postrender.clone(),
        recreate_pods: config.recreate_pods,
        render_subchart_notes: config.render_subchart_notes,
        replace: config.replace,
        repository_opts: to_repository_opts_args(&config.repository_opts),
        reset_values: config.reset_values,
        resource_names: config.resource_names.clone(),
        reuse_values: config.reuse_values,
        skip_await: config.skip_await,
        skip_crds: config.skip_crds,
        timeout: config.timeout,
        value_yaml_files: to_asset_or_archive_args(&config.value_yaml_files),
        values: config.values.clone(),
        verify: config.verify,
        version: config.version.clone(),
        wait_for_jobs: config.wait_for_jobs,
    }
}

fn to_repository_opts_args(opts: &RepositoryOptions) -> RepositoryOptsArgs {
    RepositoryOptsArgs {
        ca_file: opts.ca_file.clone(),
        cert_file: opts.cert_file.clone(),
        key_file: opts.key_file.clone(),
        password: opts.password.clone(),
        repo: opts.repo.clone(),
        username: opts.username.clone(),
    }
}

// TODO: forward the assets once the release resource accepts asset inputs in valueYamlFiles.
fn to_asset_or_archive_args(assets: &[AssetOrArchive]) -> Vec<AssetOrArchive> {
    if !assets.is_empty() {
        tracing::warn!(
            dropped = assets.len(),
            "valueYamlFiles are not forwarded to the Helm release"
        );
    }
    Vec::new()
}
