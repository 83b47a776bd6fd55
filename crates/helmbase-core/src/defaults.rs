//! Default-merging of a release configuration
//!
//! Strongly typed charts carry their settings as struct fields. The Helm
//! release only understands a weakly typed values map, so before the release
//! is created the typed payload is written over that map, using each field's
//! serde name as its key. The chart's default name and repository fill in
//! whatever the caller left unset.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::release::ReleaseConfiguration;
use crate::values::Values;

/// Input key carrying the release configuration itself
///
/// It is never forwarded as a chart value: the configuration would end up
/// referencing itself.
pub const FIELD_HELM_OPTIONS_INPUT: &str = "helmOptions";

/// Fill in the chart defaults and write the typed payload over the values map
///
/// - an unset (or empty) `chart` becomes `chart`
/// - an unset repository URL becomes `repo`
/// - unset `values` become an empty map
/// - every set field of `payload` replaces the value under the same key
/// - `helmOptions` is removed from the values
///
/// # Panics
///
/// Panics if `payload` cannot be serialized into a mapping. The payload is a
/// chart's own argument struct, so this is a bug in the chart definition
/// rather than something a caller can recover from.
pub fn init_defaults<P>(config: &mut ReleaseConfiguration, chart: &str, repo: &str, payload: &P)
where
    P: Serialize + ?Sized,
{
    if config.chart.as_deref().is_none_or(str::is_empty) {
        config.chart = Some(chart.to_string());
    }
    if config.repository_opts.repo.is_none() {
        config.repository_opts.repo = Some(repo.to_string());
    }

    let values = config.values.get_or_insert_with(Values::new);

    let fields = match serde_json::to_value(payload) {
        Ok(JsonValue::Object(fields)) => fields,
        Ok(other) => panic!("chart arguments must serialize to a mapping, got {}", other),
        Err(e) => panic!("chart arguments cannot be encoded as values: {}", e),
    };
    tracing::debug!(fields = fields.len(), "writing typed chart arguments over values");
    values.overlay(fields);

    values.remove(FIELD_HELM_OPTIONS_INPUT);
}
