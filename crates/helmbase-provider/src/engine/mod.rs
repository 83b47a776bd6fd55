//! Resource engine seam
//!
//! The orchestration engine owns the resource graph, dependency resolution
//! and the RPC transport. Chart components only need three calls from it:
//! register a component, register a custom resource, and record a
//! component's outputs.

mod mock;

pub use mock::{MockEngine, OperationCounts, Registration, RegistrationKind};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::EngineError;

/// Weakly typed property bag exchanged with the engine
pub type PropertyMap = Map<String, JsonValue>;

/// Result type for engine calls
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Unique resource name assigned by the engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Urn(String);

impl Urn {
    pub fn new(urn: impl Into<String>) -> Self {
        Self(urn.into())
    }

    /// Build a URN the way the engine does:
    /// `urn:pulumi:<stack>::<project>::<parent type>$<type>::<name>`
    pub fn compose(
        stack: &str,
        project: &str,
        parent_type: Option<&str>,
        type_token: &str,
        name: &str,
    ) -> Self {
        let qualified = match parent_type {
            Some(parent) => format!("{}${}", parent, type_token),
            None => type_token.to_string(),
        };
        Self(format!("urn:pulumi:{}::{}::{}::{}", stack, project, qualified, name))
    }

    /// Resource name segment
    pub fn name(&self) -> Option<&str> {
        self.0.split("::").nth(3)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Urn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options attached to a resource registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceOptions {
    /// Owning resource
    pub parent: Option<Urn>,

    /// Explicit provider reference
    pub provider: Option<String>,

    /// Refuse deletion of the resource
    pub protect: bool,

    /// Previous names of the resource
    pub aliases: Vec<String>,

    /// Resources that must be created first
    pub depends_on: Vec<Urn>,
}

impl ResourceOptions {
    /// Options with only a parent set
    pub fn parented(parent: Urn) -> Self {
        Self {
            parent: Some(parent),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: Urn) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn protected(mut self) -> Self {
        self.protect = true;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn depends_on(mut self, urn: Urn) -> Self {
        self.depends_on.push(urn);
        self
    }
}

/// A custom resource after registration
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredResource {
    pub urn: Urn,

    /// Output properties reported by the resource
    pub outputs: PropertyMap,
}

/// Registration API of the orchestration engine
///
/// Implementations must be Send + Sync so that hosts can drive several
/// constructions at once.
#[async_trait]
pub trait ResourceEngine: Send + Sync {
    /// Register a component resource (no inputs of its own)
    async fn register_component(
        &self,
        type_token: &str,
        name: &str,
        options: &ResourceOptions,
    ) -> EngineResult<Urn>;

    /// Register a custom resource and return its outputs
    async fn register_resource(
        &self,
        type_token: &str,
        name: &str,
        inputs: PropertyMap,
        options: &ResourceOptions,
    ) -> EngineResult<RegisteredResource>;

    /// Record the outputs of a previously registered component
    async fn register_outputs(&self, urn: &Urn, outputs: PropertyMap) -> EngineResult<()>;
}
