use crate::model::BatchLog;

/// Serialise the whole batch log, for tooling that wants structured output.
pub fn render_json_report(batch: &BatchLog) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(batch)?)
}
