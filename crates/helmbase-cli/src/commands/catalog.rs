//! Chart catalog commands

use console::style;
use helmbase_core::{ChartCatalog, ChartEntry};
use std::path::Path;

use crate::error::{CliError, Result};

/// List declared charts
pub fn list(catalog_path: Option<&Path>, output_json: bool) -> Result<()> {
    let catalog = super::load_catalog(catalog_path)?;

    if output_json {
        let json = serde_json::to_string_pretty(&catalog.charts)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    if catalog.charts.is_empty() {
        println!("No charts declared");
        return Ok(());
    }

    println!(
        "{:<50} {:<25} {}",
        style("TYPE").bold(),
        style("CHART").bold(),
        style("REPOSITORY").bold()
    );
    for entry in &catalog.charts {
        println!("{:<50} {:<25} {}", entry.type_token, entry.chart, entry.repo);
    }

    Ok(())
}

/// Declare a new chart variant
pub fn add(
    catalog_path: Option<&Path>,
    type_token: &str,
    chart: &str,
    repo: &str,
    description: Option<&str>,
) -> Result<()> {
    let path = match catalog_path {
        Some(path) => path.to_path_buf(),
        None => ChartCatalog::default_path()?,
    };
    let mut catalog = if path.exists() {
        ChartCatalog::load_from(&path)?
    } else {
        ChartCatalog::default()
    };

    if catalog.get(type_token).is_some() {
        return Err(CliError::catalog_with_help(
            format!("chart type '{}' is already declared", type_token),
            format!("Edit {} to change it", path.display()),
        ));
    }

    let mut entry = ChartEntry::new(type_token, chart, repo);
    entry.description = description.map(str::to_string);
    catalog.add(entry)?;
    catalog.save_to(&path)?;
    tracing::debug!(path = %path.display(), "saved chart catalog");

    println!(
        "{} Declared {} (chart {} from {})",
        style("✓").green().bold(),
        style(type_token).cyan(),
        chart,
        repo
    );
    Ok(())
}

/// Remove a declared chart variant
pub fn remove(catalog_path: Option<&Path>, type_token: &str) -> Result<()> {
    let path = match catalog_path {
        Some(path) => path.to_path_buf(),
        None => ChartCatalog::default_path()?,
    };
    let mut catalog = ChartCatalog::load_from(&path)?;
    let entry = catalog.remove(type_token)?;
    catalog.save_to(&path)?;

    println!(
        "{} Removed {} (chart {})",
        style("✓").green().bold(),
        style(&entry.type_token).cyan(),
        entry.chart
    );
    Ok(())
}
