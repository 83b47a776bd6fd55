//! The Helm release child resource

use helmbase_core::ReleaseStatus;

use crate::args::ReleaseArgs;
use crate::engine::{PropertyMap, ResourceEngine, ResourceOptions, Urn};
use crate::error::{ProviderError, Result};

/// Type token of the Helm release resource
pub const RELEASE_TYPE: &str = "kubernetes:helm.sh/v3:Release";

/// A registered Helm release
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub urn: Urn,

    /// Status reported by the release, `None` while it is not known yet
    pub status: Option<ReleaseStatus>,

    /// All outputs reported by the release
    pub outputs: PropertyMap,
}

impl Release {
    /// Register a new release with the engine
    pub async fn create(
        engine: &dyn ResourceEngine,
        name: &str,
        args: &ReleaseArgs,
        options: &ResourceOptions,
    ) -> Result<Self> {
        let inputs = args.to_property_map()?;
        let registered = engine
            .register_resource(RELEASE_TYPE, name, inputs, options)
            .await?;

        let status = match registered.outputs.get("status") {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => {
                Some(serde_json::from_value(value.clone()).map_err(ProviderError::Outputs)?)
            }
        };
        tracing::debug!(urn = %registered.urn, known_status = status.is_some(), "registered Helm release");

        Ok(Self {
            urn: registered.urn,
            status,
            outputs: registered.outputs,
        })
    }
}
