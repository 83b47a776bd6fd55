//! In-memory resource engine
//!
//! Records every registration in order without talking to a real engine.
//! Used by the unit tests and by `helmbase preview`.

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{EngineResult, PropertyMap, RegisteredResource, ResourceEngine, ResourceOptions, Urn};
use crate::error::EngineError;
use crate::release::RELEASE_TYPE;

/// Kind of engine call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationKind {
    Component,
    Resource,
    Outputs,
}

/// One recorded engine call
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub kind: RegistrationKind,
    pub type_token: String,
    pub name: String,
    pub urn: Urn,
    pub parent: Option<Urn>,

    /// Inputs for resources, outputs for output registrations
    pub properties: PropertyMap,
}

/// Counts of operations performed for testing assertions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationCounts {
    pub components: usize,
    pub resources: usize,
    pub outputs: usize,
}

impl OperationCounts {
    pub fn total(&self) -> usize {
        self.components + self.resources + self.outputs
    }
}

#[derive(Debug, Default)]
struct State {
    log: Vec<Registration>,
    /// urn -> type token
    known: HashMap<Urn, String>,
    counts: OperationCounts,
    failures: HashMap<RegistrationKind, String>,
}

/// In-memory engine for tests and offline previews
#[derive(Clone)]
pub struct MockEngine {
    stack: String,
    project: String,
    state: Arc<Mutex<State>>,
}

impl MockEngine {
    /// Create an engine for the `dev` stack of project `helmbase`
    pub fn new() -> Self {
        Self::for_stack("dev", "helmbase")
    }

    pub fn for_stack(stack: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            stack: stack.into(),
            project: project.into(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Make every subsequent call of `kind` fail with `message`
    pub fn fail_on(&self, kind: RegistrationKind, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(?kind, %message, "mock engine will reject registrations");
        self.lock().failures.insert(kind, message);
    }

    /// Get operation counts for assertions
    pub fn operation_counts(&self) -> OperationCounts {
        self.lock().counts.clone()
    }

    /// All recorded calls, oldest first
    pub fn registrations(&self) -> Vec<Registration> {
        self.lock().log.clone()
    }

    /// Recorded call for a resource name and kind
    pub fn find(&self, kind: RegistrationKind, name: &str) -> Option<Registration> {
        self.lock()
            .log
            .iter()
            .find(|r| r.kind == kind && r.name == name)
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn admit(
        &self,
        state: &mut State,
        kind: RegistrationKind,
        type_token: &str,
        name: &str,
        options: &ResourceOptions,
    ) -> EngineResult<Urn> {
        if let Some(message) = state.failures.get(&kind) {
            return Err(EngineError::Rejected {
                type_token: type_token.to_string(),
                name: name.to_string(),
                message: message.clone(),
            });
        }

        let parent_type = match &options.parent {
            Some(parent) => Some(state.known.get(parent).cloned().ok_or_else(|| {
                EngineError::ParentNotFound {
                    urn: parent.to_string(),
                }
            })?),
            None => None,
        };

        let urn = Urn::compose(
            &self.stack,
            &self.project,
            parent_type.as_deref(),
            type_token,
            name,
        );
        if state.known.contains_key(&urn) {
            return Err(EngineError::DuplicateUrn {
                urn: urn.to_string(),
            });
        }
        state.known.insert(urn.clone(), type_token.to_string());
        Ok(urn)
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Outputs a deployed release would report for the given inputs
fn release_outputs(name: &str, inputs: &PropertyMap) -> PropertyMap {
    let mut outputs = inputs.clone();
    let input = |key: &str| inputs.get(key).cloned().unwrap_or(JsonValue::Null);

    let mut status = json!({
        "name": inputs.get("name").cloned().unwrap_or_else(|| json!(name)),
        "namespace": inputs.get("namespace").cloned().unwrap_or_else(|| json!("default")),
        "chart": input("chart"),
        "revision": 1,
        "status": "deployed",
    });
    if let (Some(version), Some(fields)) = (inputs.get("version"), status.as_object_mut()) {
        fields.insert("version".to_string(), version.clone());
    }
    outputs.insert("status".to_string(), status);
    outputs
}

#[async_trait]
impl ResourceEngine for MockEngine {
    async fn register_component(
        &self,
        type_token: &str,
        name: &str,
        options: &ResourceOptions,
    ) -> EngineResult<Urn> {
        let mut state = self.lock();
        state.counts.components += 1;

        let urn = self.admit(&mut state, RegistrationKind::Component, type_token, name, options)?;
        state.log.push(Registration {
            kind: RegistrationKind::Component,
            type_token: type_token.to_string(),
            name: name.to_string(),
            urn: urn.clone(),
            parent: options.parent.clone(),
            properties: PropertyMap::new(),
        });
        Ok(urn)
    }

    async fn register_resource(
        &self,
        type_token: &str,
        name: &str,
        inputs: PropertyMap,
        options: &ResourceOptions,
    ) -> EngineResult<RegisteredResource> {
        let mut state = self.lock();
        state.counts.resources += 1;

        let urn = self.admit(&mut state, RegistrationKind::Resource, type_token, name, options)?;
        let outputs = if type_token == RELEASE_TYPE {
            release_outputs(name, &inputs)
        } else {
            inputs.clone()
        };
        state.log.push(Registration {
            kind: RegistrationKind::Resource,
            type_token: type_token.to_string(),
            name: name.to_string(),
            urn: urn.clone(),
            parent: options.parent.clone(),
            properties: inputs,
        });
        Ok(RegisteredResource { urn, outputs })
    }

    async fn register_outputs(&self, urn: &Urn, outputs: PropertyMap) -> EngineResult<()> {
        let mut state = self.lock();
        state.counts.outputs += 1;

        let type_token = state
            .known
            .get(urn)
            .cloned()
            .ok_or_else(|| EngineError::UnknownResource {
                urn: urn.to_string(),
            })?;
        if let Some(message) = state.failures.get(&RegistrationKind::Outputs) {
            return Err(EngineError::Rejected {
                type_token,
                name: urn.name().unwrap_or_default().to_string(),
                message: message.clone(),
            });
        }

        state.log.push(Registration {
            kind: RegistrationKind::Outputs,
            type_token,
            name: urn.name().unwrap_or_default().to_string(),
            urn: urn.clone(),
            parent: None,
            properties: outputs,
        });
        Ok(())
    }
}
