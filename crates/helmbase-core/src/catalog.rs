//! Chart catalog configuration
//!
//! Declares which chart variants a provider serves, stored by default in
//! `~/.config/helmbase/charts.yaml`:
//!
//! ```yaml
//! apiVersion: helmbase.io/v1
//! charts:
//!   - type: "kubernetes-ingress-nginx:index:IngressController"
//!     chart: ingress-nginx
//!     repo: https://kubernetes.github.io/ingress-nginx
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{CoreError, Result};

/// Chart catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartCatalog {
    /// API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Declared chart variants
    #[serde(default)]
    pub charts: Vec<ChartEntry>,
}

fn default_api_version() -> String {
    "helmbase.io/v1".to_string()
}

impl Default for ChartCatalog {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            charts: Vec::new(),
        }
    }
}

impl ChartCatalog {
    /// Load the catalog from its default location
    ///
    /// A missing file yields an empty catalog.
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate a catalog from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::CatalogNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let catalog: Self = serde_yaml::from_str(&content)?;
        catalog.validate()?;
        tracing::debug!(path = %path.display(), charts = catalog.charts.len(), "loaded chart catalog");
        Ok(catalog)
    }

    /// Save the catalog to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default catalog path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| CoreError::InvalidCatalog {
            message: "Could not determine config directory".to_string(),
        })?;
        Ok(config_dir.join("helmbase").join("charts.yaml"))
    }

    /// Look up a chart by type token
    pub fn get(&self, type_token: &str) -> Option<&ChartEntry> {
        self.charts.iter().find(|c| c.type_token == type_token)
    }

    /// Look up a chart by type token, failing if it is not declared
    pub fn require(&self, type_token: &str) -> Result<&ChartEntry> {
        self.get(type_token).ok_or_else(|| CoreError::ChartNotFound {
            type_token: type_token.to_string(),
        })
    }

    /// Add a chart after validating it
    pub fn add(&mut self, entry: ChartEntry) -> Result<()> {
        entry.validate()?;
        if self.get(&entry.type_token).is_some() {
            return Err(CoreError::DuplicateChart {
                type_token: entry.type_token,
            });
        }
        self.charts.push(entry);
        Ok(())
    }

    /// Remove a chart by type token
    pub fn remove(&mut self, type_token: &str) -> Result<ChartEntry> {
        let idx = self
            .charts
            .iter()
            .position(|c| c.type_token == type_token)
            .ok_or_else(|| CoreError::ChartNotFound {
                type_token: type_token.to_string(),
            })?;
        Ok(self.charts.remove(idx))
    }

    /// Validate every entry and reject duplicate type tokens
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for entry in &self.charts {
            entry.validate()?;
            if !seen.insert(entry.type_token.as_str()) {
                return Err(CoreError::DuplicateChart {
                    type_token: entry.type_token.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A chart variant: its type token plus default chart name and repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    /// Fully qualified type token, `<package>:<module>:<name>`
    #[serde(rename = "type")]
    pub type_token: String,

    /// Default chart name
    pub chart: String,

    /// Default repository URL
    pub repo: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ChartEntry {
    pub fn new(
        type_token: impl Into<String>,
        chart: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            type_token: type_token.into(),
            chart: chart.into(),
            repo: repo.into(),
            description: None,
        }
    }

    /// Check the type token shape, chart name and repository URL
    pub fn validate(&self) -> Result<()> {
        let segments: Vec<&str> = self.type_token.split(':').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(CoreError::InvalidCatalog {
                message: format!(
                    "type token '{}' must have the form <package>:<module>:<name>",
                    self.type_token
                ),
            });
        }

        if self.chart.trim().is_empty() {
            return Err(CoreError::InvalidCatalog {
                message: format!("chart name for '{}' is empty", self.type_token),
            });
        }

        let url = Url::parse(&self.repo).map_err(|e| CoreError::InvalidRepositoryUrl {
            url: self.repo.clone(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(CoreError::InvalidRepositoryUrl {
                url: self.repo.clone(),
                reason: "URL must be hierarchical (e.g. https://, oci://, file://)".to_string(),
            });
        }

        Ok(())
    }
}
