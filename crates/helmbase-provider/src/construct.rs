//! Construction of chart components
//!
//! A construct call registers the component, fills in the chart defaults,
//! creates the child Helm release and records the release status as the
//! component's output. Failures are returned as they happen; retries belong
//! to the engine.

use helmbase_core::{ChartCatalog, init_defaults};
use serde_json::Value as JsonValue;

use crate::args::to_release_args;
use crate::chart::{CatalogArgs, CatalogChart, Chart, ChartArgs};
use crate::engine::{PropertyMap, ResourceEngine, ResourceOptions, Urn};
use crate::error::{ProviderError, Result};
use crate::release::Release;

/// Component output carrying the release status
pub const FIELD_HELM_STATUS_OUTPUT: &str = "status";

/// A request to construct a chart component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructRequest {
    /// Requested type token
    pub type_token: String,

    /// Component name
    pub name: String,

    /// Opaque inputs, decoded into the chart's arguments
    pub inputs: PropertyMap,

    pub options: ResourceOptions,
}

impl ConstructRequest {
    pub fn new(type_token: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_token: type_token.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_inputs(mut self, inputs: PropertyMap) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_options(mut self, options: ResourceOptions) -> Self {
        self.options = options;
        self
    }
}

/// A constructed chart component
#[derive(Debug, Clone)]
pub struct ConstructResult<C> {
    /// URN of the component
    pub urn: Urn,

    /// Outputs registered for the component
    pub state: PropertyMap,

    /// The chart, with its outputs set
    pub chart: C,

    /// The child release
    pub release: Release,
}

/// Construct a chart component and its Helm release
///
/// Exactly two resources are registered, the component first and then the
/// release parented to it, followed by the component outputs. A type token
/// mismatch or undecodable inputs fail before anything is registered.
pub async fn construct<C, A>(
    engine: &dyn ResourceEngine,
    mut chart: C,
    request: ConstructRequest,
) -> Result<ConstructResult<C>>
where
    C: Chart,
    A: ChartArgs,
{
    let ConstructRequest {
        type_token,
        name,
        inputs,
        options,
    } = request;

    if type_token != chart.type_token() {
        return Err(ProviderError::TypeMismatch {
            requested: type_token,
            expected: chart.type_token().to_string(),
        });
    }

    let mut args: A =
        serde_json::from_value(JsonValue::Object(inputs)).map_err(ProviderError::SettingArgs)?;

    let urn = engine.register_component(&type_token, &name, &options).await?;
    tracing::debug!(%urn, "registered chart component");

    // The configuration is taken out of the arguments so that the remaining
    // typed fields can be written over its values.
    let mut config = args.release_mut().take().unwrap_or_default();
    init_defaults(
        &mut config,
        chart.default_chart_name(),
        chart.default_repo_url(),
        &args,
    );
    let release_args = to_release_args(&config);
    tracing::debug!(
        chart = %release_args.chart,
        repo = release_args.repository_opts.repo.as_deref().unwrap_or_default(),
        values = config.values.as_ref().map_or(0, |v| v.len()),
        "defaulted release configuration"
    );

    let release = Release::create(
        engine,
        &format!("{}-helm", name),
        &release_args,
        &ResourceOptions::parented(urn.clone()),
    )
    .await?;
    chart.set_outputs(release.status.clone());

    let mut state = PropertyMap::new();
    state.insert(
        FIELD_HELM_STATUS_OUTPUT.to_string(),
        serde_json::to_value(&release.status).map_err(ProviderError::Encode)?,
    );
    engine.register_outputs(&urn, state.clone()).await?;

    Ok(ConstructResult {
        urn,
        state,
        chart,
        release,
    })
}

/// Construct the catalog chart declared for the requested type token
pub async fn construct_from_catalog(
    engine: &dyn ResourceEngine,
    catalog: &ChartCatalog,
    request: ConstructRequest,
) -> Result<ConstructResult<CatalogChart>> {
    let entry = catalog.require(&request.type_token)?.clone();
    construct::<_, CatalogArgs>(engine, CatalogChart::new(entry), request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MockEngine, RegistrationKind};
    use crate::release::RELEASE_TYPE;
    use helmbase_core::{ChartEntry, CoreError, ReleaseConfiguration, ReleaseStatus};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    const NGINX_TYPE: &str = "example:index:Nginx";

    fn nginx_chart() -> CatalogChart {
        CatalogChart::new(ChartEntry::new(
            NGINX_TYPE,
            "nginx",
            "https://charts.example.com",
        ))
    }

    fn inputs(value: JsonValue) -> PropertyMap {
        value.as_object().cloned().unwrap_or_default()
    }

    /// A hand-written chart variant with typed arguments
    struct IngressController {
        status: Option<ReleaseStatus>,
    }

    impl Chart for IngressController {
        fn type_token(&self) -> &str {
            "kubernetes-ingress-nginx:index:IngressController"
        }

        fn set_outputs(&mut self, status: Option<ReleaseStatus>) {
            self.status = status;
        }

        fn default_chart_name(&self) -> &str {
            "ingress-nginx"
        }

        fn default_repo_url(&self) -> &str {
            "https://kubernetes.github.io/ingress-nginx"
        }
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase", default)]
    struct IngressControllerArgs {
        #[serde(skip_serializing_if = "Option::is_none")]
        helm_options: Option<ReleaseConfiguration>,
        controller: Option<Controller>,
        fullname_override: Option<String>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Controller {
        replica_count: u32,
        ingress_class: String,
    }

    impl ChartArgs for IngressControllerArgs {
        fn release_mut(&mut self) -> &mut Option<ReleaseConfiguration> {
            &mut self.helm_options
        }
    }

    #[tokio::test]
    async fn test_empty_inputs_use_chart_defaults() {
        let engine = MockEngine::new();
        let request = ConstructRequest::new(NGINX_TYPE, "web");

        let result = construct::<_, CatalogArgs>(&engine, nginx_chart(), request)
            .await
            .unwrap();

        let release = engine.find(RegistrationKind::Resource, "web-helm").unwrap();
        assert_eq!(release.type_token, RELEASE_TYPE);
        assert_eq!(release.parent, Some(result.urn.clone()));
        assert_eq!(
            release.properties,
            inputs(json!({
                "chart": "nginx",
                "repositoryOpts": { "repo": "https://charts.example.com" },
                "values": {}
            }))
        );

        assert_eq!(result.chart.status().unwrap().status, "deployed");
        assert_eq!(result.state[FIELD_HELM_STATUS_OUTPUT]["chart"], "nginx");
    }

    #[tokio::test]
    async fn test_registrations_happen_parent_first() {
        let engine = MockEngine::new();
        construct::<_, CatalogArgs>(&engine, nginx_chart(), ConstructRequest::new(NGINX_TYPE, "web"))
            .await
            .unwrap();

        let log = engine.registrations();
        let kinds: Vec<_> = log.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RegistrationKind::Component,
                RegistrationKind::Resource,
                RegistrationKind::Outputs
            ]
        );
        assert_eq!(log[0].type_token, NGINX_TYPE);
        assert_eq!(log[0].name, "web");
        assert_eq!(log[2].urn, log[0].urn);
        assert!(log[2].properties.contains_key(FIELD_HELM_STATUS_OUTPUT));
    }

    #[tokio::test]
    async fn test_type_mismatch_registers_nothing() {
        let engine = MockEngine::new();
        let request = ConstructRequest::new("example:index:Redis", "web");

        let err = construct::<_, CatalogArgs>(&engine, nginx_chart(), request)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "unknown resource type example:index:Redis; expected example:index:Nginx"
        );
        assert_eq!(engine.operation_counts().total(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_inputs_register_nothing() {
        let engine = MockEngine::new();
        let request = ConstructRequest::new(NGINX_TYPE, "web")
            .with_inputs(inputs(json!({ "helmOptions": "not a record" })));

        let err = construct::<_, CatalogArgs>(&engine, nginx_chart(), request)
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::SettingArgs(_)));
        assert!(err.to_string().starts_with("setting args: "));
        assert_eq!(engine.operation_counts().total(), 0);
    }

    #[tokio::test]
    async fn test_engine_failures_propagate_verbatim() {
        for (kind, expected_counts) in [
            (RegistrationKind::Component, (1, 0, 0)),
            (RegistrationKind::Resource, (1, 1, 0)),
            (RegistrationKind::Outputs, (1, 1, 1)),
        ] {
            let engine = MockEngine::new();
            engine.fail_on(kind, "engine said no");

            let err = construct::<_, CatalogArgs>(
                &engine,
                nginx_chart(),
                ConstructRequest::new(NGINX_TYPE, "web"),
            )
            .await
            .unwrap_err();

            assert!(matches!(err, ProviderError::Engine(_)));
            assert!(err.to_string().starts_with("registration of "));
            assert!(err.to_string().ends_with("rejected: engine said no"));

            let counts = engine.operation_counts();
            assert_eq!(
                (counts.components, counts.resources, counts.outputs),
                expected_counts,
                "failure injected on {:?}",
                kind
            );
        }
    }

    #[tokio::test]
    async fn test_typed_args_override_helm_option_values() {
        let engine = MockEngine::new();
        let request = ConstructRequest::new("kubernetes-ingress-nginx:index:IngressController", "edge")
            .with_inputs(inputs(json!({
                "helmOptions": {
                    "namespace": "ingress",
                    "version": "4.10.0",
                    "values": {
                        "controller": { "replicaCount": 1 },
                        "podLabels": { "team": "edge" },
                        "helmOptions": { "chart": "loop" }
                    }
                },
                "controller": { "replicaCount": 3, "ingressClass": "public" }
            })));

        let result = construct::<_, IngressControllerArgs>(
            &engine,
            IngressController { status: None },
            request,
        )
        .await
        .unwrap();

        let release = engine.find(RegistrationKind::Resource, "edge-helm").unwrap();
        let properties = &release.properties;
        assert_eq!(properties["chart"], "ingress-nginx");
        assert_eq!(properties["namespace"], "ingress");
        assert_eq!(properties["version"], "4.10.0");
        assert_eq!(
            properties["repositoryOpts"]["repo"],
            "https://kubernetes.github.io/ingress-nginx"
        );
        assert_eq!(
            properties["values"],
            json!({
                "controller": { "replicaCount": 3, "ingressClass": "public" },
                "podLabels": { "team": "edge" }
            })
        );

        let status = result.chart.status.unwrap();
        assert_eq!(status.namespace.as_deref(), Some("ingress"));
        assert_eq!(status.version.as_deref(), Some("4.10.0"));
    }

    #[tokio::test]
    async fn test_explicit_chart_and_repo_win_over_defaults() {
        let engine = MockEngine::new();
        let request = ConstructRequest::new(NGINX_TYPE, "web").with_inputs(inputs(json!({
            "helmOptions": {
                "chart": "nginx-unprivileged",
                "repositoryOpts": { "repo": "oci://registry.local/charts", "username": "robot" }
            },
            "replicaCount": 2
        })));

        construct::<_, CatalogArgs>(&engine, nginx_chart(), request)
            .await
            .unwrap();

        let release = engine.find(RegistrationKind::Resource, "web-helm").unwrap();
        assert_eq!(release.properties["chart"], "nginx-unprivileged");
        assert_eq!(
            release.properties["repositoryOpts"],
            json!({ "repo": "oci://registry.local/charts", "username": "robot" })
        );
        assert_eq!(release.properties["values"], json!({ "replicaCount": 2 }));
    }

    #[tokio::test]
    async fn test_construct_from_catalog() {
        let mut catalog = ChartCatalog::default();
        catalog
            .add(ChartEntry::new(NGINX_TYPE, "nginx", "https://charts.example.com"))
            .unwrap();
        let engine = MockEngine::new();

        let result = construct_from_catalog(&engine, &catalog, ConstructRequest::new(NGINX_TYPE, "web"))
            .await
            .unwrap();
        assert_eq!(result.chart.entry().chart, "nginx");
        assert_eq!(result.release.urn.name(), Some("web-helm"));

        let err = construct_from_catalog(
            &engine,
            &catalog,
            ConstructRequest::new("example:index:Redis", "cache"),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Core(CoreError::ChartNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_components_are_independent() {
        let engine = MockEngine::new();
        let (a, b) = tokio::join!(
            construct::<_, CatalogArgs>(&engine, nginx_chart(), ConstructRequest::new(NGINX_TYPE, "a")),
            construct::<_, CatalogArgs>(&engine, nginx_chart(), ConstructRequest::new(NGINX_TYPE, "b")),
        );

        assert_ne!(a.unwrap().urn, b.unwrap().urn);
        assert_eq!(engine.operation_counts().resources, 2);
    }
}
