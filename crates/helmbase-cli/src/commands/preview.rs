//! Preview command - construct a chart component against the in-memory engine

use console::style;
use helmbase_core::{Values, parse_set_values};
use helmbase_provider::{
    ConstructRequest, MockEngine, PropertyMap, Registration, RegistrationKind,
    construct_from_catalog,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// One engine call, as printed by the preview
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewEntry {
    kind: &'static str,
    #[serde(rename = "type")]
    type_token: String,
    name: String,
    urn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    properties: PropertyMap,
}

impl From<Registration> for PreviewEntry {
    fn from(registration: Registration) -> Self {
        let kind = match registration.kind {
            RegistrationKind::Component => "component",
            RegistrationKind::Resource => "resource",
            RegistrationKind::Outputs => "outputs",
        };
        Self {
            kind,
            type_token: registration.type_token,
            name: registration.name,
            urn: registration.urn.to_string(),
            parent: registration.parent.map(|p| p.to_string()),
            properties: registration.properties,
        }
    }
}

/// Options for the preview command
pub struct PreviewOptions<'a> {
    pub type_token: &'a str,
    pub name: &'a str,
    pub input_files: &'a [PathBuf],
    pub set: &'a [String],
    pub catalog: Option<&'a Path>,
    pub stack: &'a str,
    pub project: &'a str,
    pub json: bool,
}

/// Merge input files in order, then `--set` overrides
fn load_inputs(files: &[PathBuf], set: &[String]) -> Result<Values> {
    let mut inputs = Values::new();
    for file in files {
        if !file.exists() {
            return Err(CliError::input(format!(
                "input file not found: {}",
                file.display()
            )));
        }
        let values = Values::from_file(file)
            .map_err(|e| CliError::input(format!("{}: {}", file.display(), e)))?;
        inputs.merge(&values);
    }
    inputs.merge(&parse_set_values(set)?);
    Ok(inputs)
}

/// Run the preview command
pub async fn run(options: PreviewOptions<'_>) -> Result<()> {
    let catalog = super::load_catalog(options.catalog)?;
    let inputs = load_inputs(options.input_files, options.set)?;
    tracing::debug!(keys = inputs.len(), "loaded construct inputs");

    let engine = MockEngine::for_stack(options.stack, options.project);
    let request =
        ConstructRequest::new(options.type_token, options.name).with_inputs(inputs.into_inner());
    let result = construct_from_catalog(&engine, &catalog, request).await?;

    let entries: Vec<PreviewEntry> = engine
        .registrations()
        .into_iter()
        .map(PreviewEntry::from)
        .collect();

    if options.json {
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", json);
    } else {
        let yaml =
            serde_yaml::to_string(&entries).map_err(|e| CliError::internal(e.to_string()))?;
        print!("{}", yaml);
    }

    let counts = engine.operation_counts();
    let outputs = &result.release.outputs;
    let chart = outputs.get("chart").and_then(|v| v.as_str()).unwrap_or_default();
    let repo = outputs
        .get("repositoryOpts")
        .and_then(|o| o.get("repo"))
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    eprintln!(
        "{} {} '{}' would register {} resources (chart {} from {})",
        style("✓").green().bold(),
        style(&result.chart.entry().type_token).cyan(),
        options.name,
        counts.components + counts.resources,
        style(chart).bold(),
        repo,
    );

    Ok(())
}
